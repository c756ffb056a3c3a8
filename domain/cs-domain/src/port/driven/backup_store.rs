//! バックアップストアポート

use crate::error::DomainError;
use crate::model::BackupRecord;
use std::collections::BTreeMap;

/// 元のカメラ名 → バックアップの永続マッピング
pub trait BackupStore {
    /// レコードを保存（同名は上書き）
    fn save(&self, record: &BackupRecord) -> Result<(), DomainError>;

    /// 全体を読込（ファイルがなければ空）
    fn load(&self) -> Result<BTreeMap<String, BackupRecord>, DomainError>;

    /// 1件を読込
    fn load_record(&self, original_name: &str) -> Result<Option<BackupRecord>, DomainError> {
        Ok(self.load()?.remove(original_name))
    }

    /// バックアップ済みのカメラ名を列挙
    fn list_backed_up_names(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.load()?.into_keys().collect())
    }
}
