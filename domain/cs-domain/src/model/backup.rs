//! バックアップレコード
//!
//! 改名前のレジストリ値を元のカメラ名ごとに保持する。
//! 同じ名前で再度改名すると上書きされる（履歴は持たない）。

use super::RegistryEntryRef;
use crate::DomainError;

/// 元のカメラ名1件分のバックアップ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    original_name: String,
    entries: Vec<RegistryEntryRef>,
    /// 保存時刻（ISO 8601）。古い形式のファイルにはない。
    saved_at: Option<String>,
}

impl BackupRecord {
    pub fn new(
        original_name: impl Into<String>,
        entries: Vec<RegistryEntryRef>,
    ) -> Result<Self, DomainError> {
        let original_name = original_name.into();
        if original_name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "original_name must not be empty".into(),
            ));
        }
        Ok(Self {
            original_name,
            entries,
            saved_at: None,
        })
    }

    pub fn with_saved_at(mut self, saved_at: impl Into<String>) -> Self {
        self.saved_at = Some(saved_at.into());
        self
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn entries(&self) -> &[RegistryEntryRef] {
        &self.entries
    }

    pub fn saved_at(&self) -> Option<&str> {
        self.saved_at.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
