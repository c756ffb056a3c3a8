//! ファイルシステムアダプター（バックアップ/設定/ログ永続化）
//! JSONファイル＋JSONLログで実装。書き込みは一時ファイル経由で置き換える。
use cs_domain::error::DomainError;
use cs_domain::model::{
    BackupRecord, RegistryEntryRef, RegistryValueKind, SpooferConfig, UnknownPolicy,
};
use cs_domain::port::driven::{BackupStore, ConfigRepository, LogWriter, OperationLogRecord};
use cs_log_utils::utc_compact_timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

pub const BACKUP_FILE_NAME: &str = "camera_backup.json";
pub const CONFIG_FILE_NAME: &str = "camspoof.json";
pub const OPERATION_LOG_FILE_NAME: &str = "operation.log.jsonl";

#[derive(Debug)]
pub struct FsAdapter {
    backup_path: PathBuf,
    config_path: PathBuf,
    op_log_path: PathBuf,
    max_log_bytes: u64,
    log_lock: Mutex<()>,
}

impl FsAdapter {
    /// 指定ディレクトリ（通常は実行ファイルの場所）でアダプターを作成。ファイルは遅延作成。
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::with_paths(
            root.join(BACKUP_FILE_NAME),
            root.join(CONFIG_FILE_NAME),
            root.join("logs").join(OPERATION_LOG_FILE_NAME),
        )
    }

    pub fn with_paths(
        backup_path: impl Into<PathBuf>,
        config_path: impl Into<PathBuf>,
        op_log_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            backup_path: backup_path.into(),
            config_path: config_path.into(),
            op_log_path: op_log_path.into(),
            max_log_bytes: 5 * 1024 * 1024, // 5MB上限
            log_lock: Mutex::new(()),
        }
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn op_log_path(&self) -> &Path {
        &self.op_log_path
    }

    fn ensure_parent_dir(&self, path: &Path) -> Result<(), DomainError> {
        let Some(dir) = path.parent() else {
            return Ok(());
        };
        if dir.as_os_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| DomainError::IoError(format!("create_dir_all: {e}")))
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), DomainError> {
        self.ensure_parent_dir(path)?;
        let suffix = unique_suffix();
        let tmp_path = path.with_extension(format!("tmp.{suffix}"));
        {
            let mut f = fs::File::create(&tmp_path)
                .map_err(|e| DomainError::IoError(format!("create temp file: {e}")))?;
            f.write_all(data)
                .map_err(|e| DomainError::IoError(format!("write temp file: {e}")))?;
            let _ = f.sync_all();
        }
        #[cfg(windows)]
        {
            if path.exists() {
                if let Err(e) = replace_file(&tmp_path, path) {
                    let _ = fs::remove_file(&tmp_path);
                    return Err(e);
                }
                return Ok(());
            }
        }
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(DomainError::IoError(format!("rename temp file: {e}")));
        }
        Ok(())
    }
}

impl BackupStore for FsAdapter {
    fn save(&self, record: &BackupRecord) -> Result<(), DomainError> {
        let mut all = BackupStore::load(self)?;
        all.insert(record.original_name().to_string(), record.clone());
        self.write_backups(&all)
    }

    fn load(&self) -> Result<BTreeMap<String, BackupRecord>, DomainError> {
        if !self.backup_path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.backup_path)
            .map_err(|e| DomainError::IoError(format!("read backups: {e}")))?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let dtos: BTreeMap<String, BackupDto> = serde_json::from_str(&data).map_err(|e| {
            DomainError::MalformedBackup(format!("{}: {e}", self.backup_path.display()))
        })?;
        dtos.into_iter()
            .map(|(name, dto)| dto.into_record(&name).map(|rec| (name, rec)))
            .collect()
    }
}

impl ConfigRepository for FsAdapter {
    fn load(&self) -> Result<SpooferConfig, DomainError> {
        let buf = fs::read_to_string(&self.config_path)
            .map_err(|e| DomainError::ConfigLoadFailed(format!("read config: {e}")))?;
        let dto: ConfigDto =
            serde_json::from_str(&buf).map_err(|e| DomainError::ConfigLoadFailed(e.to_string()))?;
        let mut cfg = SpooferConfig::try_from(dto)?;
        cfg.normalize();
        cfg.validate()?;
        Ok(cfg)
    }

    fn save(&self, config: &SpooferConfig) -> Result<(), DomainError> {
        let dto = ConfigDto::from(config);
        let data = serde_json::to_string_pretty(&dto)
            .map_err(|e| DomainError::IoError(format!("serialize config: {e}")))?;
        self.write_atomic(&self.config_path, data.as_bytes())
            .map_err(|e| DomainError::IoError(format!("write config: {e}")))?;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.config_path.exists()
    }
}

impl LogWriter for FsAdapter {
    fn write_operation_log(&self, record: &OperationLogRecord) -> Result<(), DomainError> {
        let value = serde_json::json!({
            "timestamp": record.timestamp,
            "operation": record.operation,
            "success": record.success,
            "details": record.details,
            "targets": record.targets,
        });
        self.append_json_value(&self.op_log_path, &value)?;
        let _ = self.rotate_if_large(&self.op_log_path);
        Ok(())
    }
}

// ---------- 内部ヘルパー ----------

impl FsAdapter {
    fn write_backups(&self, all: &BTreeMap<String, BackupRecord>) -> Result<(), DomainError> {
        let data: BTreeMap<&str, BackupDto> = all
            .iter()
            .map(|(name, rec)| (name.as_str(), BackupDto::from(rec)))
            .collect();
        let s = serde_json::to_string_pretty(&data)
            .map_err(|e| DomainError::IoError(format!("serialize backups: {e}")))?;
        self.write_atomic(&self.backup_path, s.as_bytes())
    }

    fn append_json_value(&self, path: &Path, value: &serde_json::Value) -> Result<(), DomainError> {
        let _lock = self
            .log_lock
            .lock()
            .map_err(|_| DomainError::IoError("log lock poisoned".into()))?;
        self.ensure_parent_dir(path)?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| DomainError::IoError(format!("open log {:?}: {e}", path)))?;
        let line = serde_json::to_string(value)
            .map_err(|e| DomainError::IoError(format!("serialize log: {e}")))?;
        f.write_all(line.as_bytes())
            .and_then(|_| f.write_all(b"\n"))
            .map_err(|e| DomainError::IoError(format!("write log: {e}")))?;
        Ok(())
    }

    fn rotate_if_large(&self, path: &Path) -> Result<(), DomainError> {
        let _lock = match self.log_lock.lock() {
            Ok(guard) => guard,
            Err(_) => return Ok(()),
        };
        if let Ok(meta) = fs::metadata(path) {
            if meta.len() > self.max_log_bytes {
                let ts = utc_compact_timestamp();
                let rotated = path.with_extension(format!("{}.jsonl", ts));
                fs::rename(path, rotated)
                    .map_err(|e| DomainError::IoError(format!("rotate log: {e}")))?;
            }
        }
        Ok(())
    }
}

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{}.{}", std::process::id(), nanos)
}

#[cfg(windows)]
fn replace_file(src: &Path, dst: &Path) -> Result<(), DomainError> {
    use std::os::windows::ffi::OsStrExt;
    use windows::Win32::Storage::FileSystem::{REPLACE_FILE_FLAGS, ReplaceFileW};
    use windows::core::PCWSTR;

    fn to_wide(path: &Path) -> Vec<u16> {
        let mut wide: Vec<u16> = path.as_os_str().encode_wide().collect();
        wide.push(0);
        wide
    }

    let src_w = to_wide(src);
    let dst_w = to_wide(dst);
    unsafe {
        ReplaceFileW(
            PCWSTR(dst_w.as_ptr()),
            PCWSTR(src_w.as_ptr()),
            PCWSTR::null(),
            REPLACE_FILE_FLAGS(0),
            None,
            None,
        )
        .map_err(|e| DomainError::IoError(format!("ReplaceFileW failed: {}", e.message())))?;
    }
    Ok(())
}

// ---------- DTO 定義 ----------

/// camera_backup.json の1件（既存ファイルと互換）
#[derive(Serialize, Deserialize)]
struct BackupDto {
    original_name: String,
    registry_entries: Vec<EntryDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct EntryDto {
    path: String,
    value_name: String,
    original_value: String,
    /// 古い形式にはない（REG_SZ とみなす）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
}

impl From<&BackupRecord> for BackupDto {
    fn from(rec: &BackupRecord) -> Self {
        Self {
            original_name: rec.original_name().to_string(),
            registry_entries: rec
                .entries()
                .iter()
                .map(|e| EntryDto {
                    path: e.path.clone(),
                    value_name: e.value_name.clone(),
                    original_value: e.original_value.clone(),
                    kind: Some(e.kind.as_str().to_string()),
                })
                .collect(),
            saved_at: rec.saved_at().map(str::to_string),
        }
    }
}

impl BackupDto {
    /// キー名を正とする（original_name が空の古いデータも読めるように）
    fn into_record(self, key: &str) -> Result<BackupRecord, DomainError> {
        let name = if self.original_name.trim().is_empty() {
            key.to_string()
        } else {
            self.original_name
        };
        let entries = self
            .registry_entries
            .into_iter()
            .map(|e| {
                let kind = e
                    .kind
                    .as_deref()
                    .map(RegistryValueKind::from_reg_name)
                    .unwrap_or_default();
                RegistryEntryRef::new(e.path, e.value_name, e.original_value, kind)
            })
            .collect();
        let record = BackupRecord::new(name, entries)
            .map_err(|e| DomainError::MalformedBackup(e.to_string()))?;
        Ok(match self.saved_at {
            Some(ts) => record.with_saved_at(ts),
            None => record,
        })
    }
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct ConfigDto {
    search_depth: u32,
    /// "virtual" または "real"
    unknown_policy: String,
    default_target_name: String,
    extra_virtual_patterns: Vec<String>,
    extra_known_brands: Vec<String>,
}

impl Default for ConfigDto {
    fn default() -> Self {
        Self::from(&SpooferConfig::default())
    }
}

impl From<&SpooferConfig> for ConfigDto {
    fn from(cfg: &SpooferConfig) -> Self {
        Self {
            search_depth: cfg.search_depth,
            unknown_policy: cfg.unknown_policy.as_str().to_string(),
            default_target_name: cfg.default_target_name.clone(),
            extra_virtual_patterns: cfg.extra_virtual_patterns.clone(),
            extra_known_brands: cfg.extra_known_brands.clone(),
        }
    }
}

impl TryFrom<ConfigDto> for SpooferConfig {
    type Error = DomainError;

    fn try_from(dto: ConfigDto) -> Result<Self, Self::Error> {
        Ok(Self {
            search_depth: dto.search_depth,
            unknown_policy: dto.unknown_policy.parse::<UnknownPolicy>()?,
            default_target_name: dto.default_target_name,
            extra_virtual_patterns: dto.extra_virtual_patterns,
            extra_known_brands: dto.extra_known_brands,
        })
    }
}
