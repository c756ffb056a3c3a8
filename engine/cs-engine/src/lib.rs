//! cs-engine: カメラ列挙／レジストリ検索／改名／復元のワークフローを実装する層。
//! ドメイン（cs-domain）のポートにのみ依存する。

pub mod enumerate;
pub mod rename;
pub mod restore;
pub mod search;

#[cfg(test)]
mod mock;

pub use enumerate::{CameraScan, dedup_by_name, list_cameras};
pub use rename::{RenameReport, rename_camera};
pub use restore::{RestoreReport, restore_camera};
pub use search::find_entries;

use cs_domain::DomainError;

/// 1か所分の書き込み失敗
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub path: String,
    pub value_name: String,
    pub error: DomainError,
}

impl EntryFailure {
    pub fn is_access_denied(&self) -> bool {
        self.error.is_access_denied()
    }
}
