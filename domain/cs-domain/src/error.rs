//! ドメインエラー型
//!
//! 標準ライブラリのみ使用（外部エラーハンドリングクレートなし）

use std::fmt;

/// ドメイン層のエラー型
/// 各バリアントは特定の失敗シナリオを表現
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 対象が見つからない（レジストリ上の一致なし、バックアップなし、キーなし）
    NotFound(String),

    /// レジストリアクセス拒否（管理者権限不足）
    RegistryAccessDenied(String),

    /// デバイス列挙APIが利用できない/失敗した
    BackendUnavailable(String),

    /// バックアップファイルが読めない/壊れている
    MalformedBackup(String),

    /// バリデーションエラー
    ValidationError(String),

    /// 設定ファイルの読み込み失敗
    ConfigLoadFailed(String),

    /// ファイルI/Oエラー
    IoError(String),

    /// プロセス起動失敗（管理者として再起動など）
    ProcessLaunchFailed(String),

    /// 不明なエラー
    Unknown(String),
}

impl DomainError {
    /// 権限不足に起因するエラーか
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::RegistryAccessDenied(_))
    }

    /// 「存在しない」系のエラーか
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(what) => {
                write!(f, "Not found: {}", what)
            }
            Self::RegistryAccessDenied(msg) => {
                write!(f, "Registry access denied: {}", msg)
            }
            Self::BackendUnavailable(msg) => {
                write!(f, "Enumeration backend unavailable: {}", msg)
            }
            Self::MalformedBackup(msg) => {
                write!(f, "Malformed backup document: {}", msg)
            }
            Self::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            Self::ConfigLoadFailed(msg) => {
                write!(f, "Configuration load failed: {}", msg)
            }
            Self::IoError(msg) => {
                write!(f, "IO error: {}", msg)
            }
            Self::ProcessLaunchFailed(msg) => {
                write!(f, "Process launch failed: {}", msg)
            }
            Self::Unknown(msg) => {
                write!(f, "Unknown error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}
