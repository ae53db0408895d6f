/// ストアエラー型
/// フラットファイルストア操作で発生するエラーを表現する
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// ファイルの読み込みエラー
    ReadError(String),
    /// ファイルの書き込みエラー
    WriteError(String),
    /// データディレクトリ・ファイルの初期化エラー
    BootstrapError(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::ReadError(msg) => write!(f, "Store read error: {}", msg),
            StoreError::WriteError(msg) => write!(f, "Store write error: {}", msg),
            StoreError::BootstrapError(msg) => write!(f, "Store bootstrap error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// StoreErrorからRepositoryErrorへの変換
impl From<StoreError> for crate::domain::port::RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ReadError(msg) => {
                crate::domain::port::RepositoryError::LoadFailed(msg)
            }
            StoreError::WriteError(msg) => {
                crate::domain::port::RepositoryError::SaveFailed(msg)
            }
            StoreError::BootstrapError(msg) => {
                crate::domain::port::RepositoryError::SaveFailed(msg)
            }
        }
    }
}
