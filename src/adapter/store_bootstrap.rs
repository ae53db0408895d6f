use std::path::{Path, PathBuf};

use crate::adapter::app_config::AppConfig;
use crate::adapter::store_error::StoreError;

/// データストアの初期化を管理する構造体
/// データディレクトリと3つのコレクションファイルが存在することを保証する
pub struct StoreBootstrap {
    data_dir: PathBuf,
    files: Vec<PathBuf>,
}

impl StoreBootstrap {
    /// 設定からStoreBootstrapインスタンスを作成
    pub fn new(config: &AppConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            files: vec![
                config.users_path(),
                config.events_path(),
                config.bookings_path(),
            ],
        }
    }

    /// 初期化を実行
    /// べき等性を保証（既に存在するディレクトリ・ファイルには触れない）
    pub async fn run(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| {
                StoreError::BootstrapError(format!(
                    "failed to create data directory {}: {}",
                    self.data_dir.display(),
                    e
                ))
            })?;

        for path in &self.files {
            Self::ensure_file_exists(path).await?;
        }

        Ok(())
    }

    /// ファイルが存在しなければ空で作成する
    async fn ensure_file_exists(path: &Path) -> Result<(), StoreError> {
        let exists = tokio::fs::try_exists(path).await.map_err(|e| {
            StoreError::BootstrapError(format!("failed to probe {}: {}", path.display(), e))
        })?;

        if !exists {
            tokio::fs::write(path, "").await.map_err(|e| {
                StoreError::BootstrapError(format!("failed to create {}: {}", path.display(), e))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_in(dir: &Path) -> AppConfig {
        AppConfig {
            data_dir: dir.to_path_buf(),
            users_file: "users.txt".to_string(),
            events_file: "events.txt".to_string(),
            bookings_file: "bookings.txt".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_run_creates_directory_and_files() {
        let temp = tempfile::tempdir().unwrap();
        let data_dir = temp.path().join("store");
        let config = config_in(&data_dir);

        StoreBootstrap::new(&config).run().await.unwrap();

        assert!(config.users_path().exists());
        assert!(config.events_path().exists());
        assert!(config.bookings_path().exists());
    }

    #[tokio::test]
    async fn test_run_leaves_existing_files_untouched() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());

        tokio::fs::write(config.users_path(), "1,Alice\n")
            .await
            .unwrap();

        StoreBootstrap::new(&config).run().await.unwrap();

        let content = tokio::fs::read_to_string(config.users_path()).await.unwrap();
        assert_eq!(content, "1,Alice\n");
    }

    #[tokio::test]
    async fn test_run_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(&temp.path().join("nested"));
        let bootstrap = StoreBootstrap::new(&config);

        bootstrap.run().await.unwrap();
        bootstrap.run().await.unwrap();

        assert!(PathBuf::from(config.bookings_path()).exists());
    }
}
