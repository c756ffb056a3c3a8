//! バックアップからの復元
//!
//! 記録された元の値をそのまま書き戻す（部分置換ではなく全体上書き）。
//! 復元後もバックアップは削除しない。

use crate::EntryFailure;
use cs_domain::DomainError;
use cs_domain::model::BackupRecord;
use cs_domain::port::driven::{BackupStore, RegistryHive};
use cs_domain::service::eq_ignore_case;

/// 復元結果の要約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    /// バックアップに記録されていた数
    pub recorded: usize,
    /// 書き戻しに成功した数
    pub restored: usize,
    pub failures: Vec<EntryFailure>,
}

impl RestoreReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

pub fn restore_camera<H, B>(
    hive: &H,
    backup: &B,
    original_name: &str,
) -> Result<RestoreReport, DomainError>
where
    H: RegistryHive + ?Sized,
    B: BackupStore + ?Sized,
{
    let record = find_record(backup, original_name)?
        .ok_or_else(|| DomainError::NotFound(format!("backup for '{}'", original_name)))?;

    let mut restored = 0;
    let mut failures = Vec::new();
    for entry in record.entries() {
        match hive.write_string(&entry.path, &entry.value_name, &entry.original_value, entry.kind) {
            Ok(()) => restored += 1,
            Err(error) => failures.push(EntryFailure {
                path: entry.path.clone(),
                value_name: entry.value_name.clone(),
                error,
            }),
        }
    }

    Ok(RestoreReport {
        recorded: record.entries().len(),
        restored,
        failures,
    })
}

/// 完全一致を優先し、なければ大文字小文字を無視して探す
fn find_record<B: BackupStore + ?Sized>(
    backup: &B,
    name: &str,
) -> Result<Option<BackupRecord>, DomainError> {
    let mut all = backup.load()?;
    if let Some(record) = all.remove(name) {
        return Ok(Some(record));
    }
    Ok(all
        .into_iter()
        .find(|(key, _)| eq_ignore_case(key, name))
        .map(|(_, record)| record))
}
