//! カメラ名の置換
//!
//! 1. 検索 → 2. 一致なしなら NotFound → 3. バックアップ保存 → 4. 各値を部分置換
//! バックアップは必ず書き込み前に保存する。途中で失敗しても変更前の状態が残る。

use crate::EntryFailure;
use crate::search::find_entries;
use cs_domain::DomainError;
use cs_domain::model::BackupRecord;
use cs_domain::port::driven::{BackupStore, Clock, RegistryHive};
use cs_domain::service::{eq_ignore_case, replace_ignore_case};

/// 改名結果の要約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameReport {
    /// 検索で見つかった値の数
    pub matched: usize,
    /// 書き換えに成功した数
    pub modified: usize,
    pub failures: Vec<EntryFailure>,
}

impl RenameReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// `old_name` を含むすべての文字列値で、一致部分を `new_name` に置き換える
pub fn rename_camera<H, B, C>(
    hive: &H,
    backup: &B,
    clock: &C,
    old_name: &str,
    new_name: &str,
    max_depth: u32,
) -> Result<RenameReport, DomainError>
where
    H: RegistryHive + ?Sized,
    B: BackupStore + ?Sized,
    C: Clock + ?Sized,
{
    validate_camera_name("old_name", old_name)?;
    validate_camera_name("new_name", new_name)?;
    // 検索も置換も大文字小文字を無視するので、大小だけの違いは何も変えない
    if eq_ignore_case(old_name, new_name) {
        return Err(DomainError::ValidationError(
            "new_name must differ from old_name (ignoring case)".into(),
        ));
    }

    let entries = find_entries(hive, old_name, max_depth);
    if entries.is_empty() {
        return Err(DomainError::NotFound(format!(
            "'{}' in the registry",
            old_name
        )));
    }

    // 書き込み前にバックアップ（大小違いを含む同名の既存バックアップは上書き）
    let key = backup
        .list_backed_up_names()?
        .into_iter()
        .find(|name| eq_ignore_case(name, old_name))
        .unwrap_or_else(|| old_name.to_string());
    let record = BackupRecord::new(key, entries)?.with_saved_at(clock.now_iso8601());
    backup.save(&record)?;

    let mut modified = 0;
    let mut failures = Vec::new();
    for entry in record.entries() {
        let replaced = replace_ignore_case(&entry.original_value, old_name, new_name);
        match hive.write_string(&entry.path, &entry.value_name, &replaced, entry.kind) {
            Ok(()) => modified += 1,
            Err(error) => failures.push(EntryFailure {
                path: entry.path.clone(),
                value_name: entry.value_name.clone(),
                error,
            }),
        }
    }

    Ok(RenameReport {
        matched: record.entries().len(),
        modified,
        failures,
    })
}

/// カメラ名として使えるか（空白のみ/NUL文字を拒否）
pub fn validate_camera_name(field: &str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::ValidationError(format!(
            "{} must not be empty",
            field
        )));
    }
    if name.contains('\0') {
        return Err(DomainError::ValidationError(format!(
            "{} must not contain NUL",
            field
        )));
    }
    Ok(())
}
