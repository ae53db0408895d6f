use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::adapter::store_error::StoreError;
use crate::domain::model::{User, UserId};
use crate::domain::port::{RepositoryError, UserRepository};

/// フラットファイルユーザーリポジトリ
/// 行レイアウト: `id,name`（最初のカンマ以降すべてが表示名）
pub struct FlatFileUserRepository {
    path: PathBuf,
}

impl FlatFileUserRepository {
    /// ファイルパスを指定してリポジトリを作成
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn encode(user: &User) -> String {
        format!("{},{}", user.id(), user.name())
    }

    /// 壊れた行はNoneを返して読み込み側でスキップされる
    fn decode_line(line: &str) -> Option<User> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (id, name) = line.split_once(',')?;
        let id = id.parse::<u32>().ok()?;
        Some(User::new(UserId::new(id), name.to_string()))
    }
}

#[async_trait]
impl UserRepository for FlatFileUserRepository {
    async fn load_all(&self) -> Result<Vec<User>, RepositoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::ReadError(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                ))
                .into())
            }
        };

        Ok(content.lines().filter_map(Self::decode_line).collect())
    }

    async fn save_all(&self, users: &[User]) -> Result<(), RepositoryError> {
        let mut content = String::new();
        for user in users {
            content.push_str(&Self::encode(user));
            content.push('\n');
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| StoreError::WriteError(format!("{}: {}", self.path.display(), e)))
            .map_err(RepositoryError::from)
    }
}
