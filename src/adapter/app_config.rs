use std::env;
use std::path::PathBuf;

/// アプリケーション設定を管理する構造体
/// データファイルの配置と管理者認証情報を持つ
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub users_file: String,
    pub events_file: String,
    pub bookings_file: String,
    pub admin_username: String,
    pub admin_password: String,
}

/// 設定エラー
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// 環境変数から設定を読み取る
    /// 環境変数が設定されていない場合はデフォルト値を使用
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = env::var("TICKET_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        if data_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "TICKET_DATA_DIR must not be empty".to_string(),
            ));
        }

        let users_file = env::var("TICKET_USERS_FILE").unwrap_or_else(|_| "users.txt".to_string());
        let events_file =
            env::var("TICKET_EVENTS_FILE").unwrap_or_else(|_| "events.txt".to_string());
        let bookings_file =
            env::var("TICKET_BOOKINGS_FILE").unwrap_or_else(|_| "bookings.txt".to_string());

        let admin_username = env::var("TICKET_ADMIN_USER").unwrap_or_else(|_| "admin".to_string());
        let admin_password =
            env::var("TICKET_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            users_file,
            events_file,
            bookings_file,
            admin_username,
            admin_password,
        })
    }

    /// ユーザーファイルのフルパス
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    /// イベントファイルのフルパス
    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(&self.events_file)
    }

    /// 予約ファイルのフルパス
    pub fn bookings_path(&self) -> PathBuf {
        self.data_dir.join(&self.bookings_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // テスト間の環境変数の競合を防ぐためのロック
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_from_env_with_all_variables() {
        let _lock = ENV_LOCK.lock().unwrap();

        env::set_var("TICKET_DATA_DIR", "/tmp/tickets");
        env::set_var("TICKET_USERS_FILE", "u.txt");
        env::set_var("TICKET_EVENTS_FILE", "e.txt");
        env::set_var("TICKET_BOOKINGS_FILE", "b.txt");
        env::set_var("TICKET_ADMIN_USER", "root");
        env::set_var("TICKET_ADMIN_PASSWORD", "secret");

        let config = AppConfig::from_env().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/tickets"));
        assert_eq!(config.users_path(), PathBuf::from("/tmp/tickets/u.txt"));
        assert_eq!(config.events_path(), PathBuf::from("/tmp/tickets/e.txt"));
        assert_eq!(config.bookings_path(), PathBuf::from("/tmp/tickets/b.txt"));
        assert_eq!(config.admin_username, "root");
        assert_eq!(config.admin_password, "secret");

        // クリーンアップ
        env::remove_var("TICKET_DATA_DIR");
        env::remove_var("TICKET_USERS_FILE");
        env::remove_var("TICKET_EVENTS_FILE");
        env::remove_var("TICKET_BOOKINGS_FILE");
        env::remove_var("TICKET_ADMIN_USER");
        env::remove_var("TICKET_ADMIN_PASSWORD");
    }

    #[test]
    fn test_from_env_with_defaults() {
        let _lock = ENV_LOCK.lock().unwrap();

        env::remove_var("TICKET_DATA_DIR");
        env::remove_var("TICKET_USERS_FILE");
        env::remove_var("TICKET_EVENTS_FILE");
        env::remove_var("TICKET_BOOKINGS_FILE");
        env::remove_var("TICKET_ADMIN_USER");
        env::remove_var("TICKET_ADMIN_PASSWORD");

        let config = AppConfig::from_env().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.users_file, "users.txt");
        assert_eq!(config.events_file, "events.txt");
        assert_eq!(config.bookings_file, "bookings.txt");
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password, "admin123");
    }

    #[test]
    fn test_empty_data_dir_rejected() {
        let _lock = ENV_LOCK.lock().unwrap();

        env::set_var("TICKET_DATA_DIR", "  ");
        let result = AppConfig::from_env();
        assert!(result.is_err());

        env::remove_var("TICKET_DATA_DIR");
    }
}
