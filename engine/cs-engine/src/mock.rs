//! テスト用のインメモリポート実装

use cs_domain::DomainError;
use cs_domain::model::{BackupRecord, RegistryStringValue, RegistryValueKind};
use cs_domain::port::driven::{BackupStore, CaptureDeviceSource, Clock, RegistryHive};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

/// キーパス → 値リスト。キーパスは大文字小文字を区別しない。
#[derive(Default)]
pub struct MemoryHive {
    keys: RefCell<BTreeMap<String, (String, Vec<RegistryStringValue>)>>,
    denied_read: RefCell<BTreeSet<String>>,
    denied_write: RefCell<BTreeSet<String>>,
    pub writes: Cell<usize>,
}

impl MemoryHive {
    pub fn put(&self, path: &str, name: &str, data: &str) {
        self.put_kind(path, name, data, RegistryValueKind::String);
    }

    pub fn put_kind(&self, path: &str, name: &str, data: &str, kind: RegistryValueKind) {
        self.ensure_key(path);
        let mut keys = self.keys.borrow_mut();
        let (_, values) = keys.get_mut(&path.to_lowercase()).expect("key exists");
        match values.iter_mut().find(|v| v.name.eq_ignore_ascii_case(name)) {
            Some(v) => {
                v.data = data.to_string();
                v.kind = kind;
            }
            None => values.push(RegistryStringValue::new(name, data, kind)),
        }
    }

    pub fn get(&self, path: &str, name: &str) -> Option<String> {
        self.keys
            .borrow()
            .get(&path.to_lowercase())
            .and_then(|(_, values)| values.iter().find(|v| v.name.eq_ignore_ascii_case(name)))
            .map(|v| v.data.clone())
    }

    pub fn kind(&self, path: &str, name: &str) -> Option<RegistryValueKind> {
        self.keys
            .borrow()
            .get(&path.to_lowercase())
            .and_then(|(_, values)| values.iter().find(|v| v.name.eq_ignore_ascii_case(name)))
            .map(|v| v.kind)
    }

    pub fn deny_read(&self, path: &str) {
        self.denied_read.borrow_mut().insert(path.to_lowercase());
    }

    pub fn deny_write(&self, path: &str) {
        self.denied_write.borrow_mut().insert(path.to_lowercase());
    }

    pub fn allow_write(&self, path: &str) {
        self.denied_write.borrow_mut().remove(&path.to_lowercase());
    }

    fn ensure_key(&self, path: &str) {
        let mut keys = self.keys.borrow_mut();
        let mut current = String::new();
        for part in path.split('\\') {
            if !current.is_empty() {
                current.push('\\');
            }
            current.push_str(part);
            keys.entry(current.to_lowercase())
                .or_insert_with(|| (current.clone(), Vec::new()));
        }
    }

    fn check_read(&self, path: &str) -> Result<String, DomainError> {
        let lower = path.to_lowercase();
        if self.denied_read.borrow().contains(&lower) {
            return Err(DomainError::RegistryAccessDenied(path.to_string()));
        }
        if !self.keys.borrow().contains_key(&lower) {
            return Err(DomainError::NotFound(path.to_string()));
        }
        Ok(lower)
    }
}

impl RegistryHive for MemoryHive {
    fn subkeys(&self, path: &str) -> Result<Vec<String>, DomainError> {
        let lower = self.check_read(path)?;
        let prefix = format!("{}\\", lower);
        Ok(self
            .keys
            .borrow()
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix) && !k[prefix.len()..].contains('\\'))
            .map(|(_, (original, _))| original[prefix.len()..].to_string())
            .collect())
    }

    fn string_values(&self, path: &str) -> Result<Vec<RegistryStringValue>, DomainError> {
        let lower = self.check_read(path)?;
        Ok(self.keys.borrow()[&lower].1.clone())
    }

    fn read_string(&self, path: &str, value_name: &str) -> Result<Option<String>, DomainError> {
        self.check_read(path)?;
        Ok(self.get(path, value_name))
    }

    fn write_string(
        &self,
        path: &str,
        value_name: &str,
        data: &str,
        kind: RegistryValueKind,
    ) -> Result<(), DomainError> {
        let lower = path.to_lowercase();
        if self.denied_write.borrow().contains(&lower) {
            return Err(DomainError::RegistryAccessDenied(path.to_string()));
        }
        if !self.keys.borrow().contains_key(&lower) {
            return Err(DomainError::NotFound(path.to_string()));
        }
        self.put_kind(path, value_name, data, kind);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBackupStore {
    records: RefCell<BTreeMap<String, BackupRecord>>,
    pub saves: Cell<usize>,
    pub fail_save: Cell<bool>,
}

impl MemoryBackupStore {
    pub fn get(&self, name: &str) -> Option<BackupRecord> {
        self.records.borrow().get(name).cloned()
    }
}

impl BackupStore for MemoryBackupStore {
    fn save(&self, record: &BackupRecord) -> Result<(), DomainError> {
        if self.fail_save.get() {
            return Err(DomainError::IoError("disk full".into()));
        }
        self.records
            .borrow_mut()
            .insert(record.original_name().to_string(), record.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn load(&self) -> Result<BTreeMap<String, BackupRecord>, DomainError> {
        Ok(self.records.borrow().clone())
    }
}

pub struct FixedClock;

impl Clock for FixedClock {
    fn now_iso8601(&self) -> String {
        "2023-11-14T22:13:20.000Z".into()
    }
}

pub struct StaticSource(pub Result<Vec<String>, DomainError>);

impl StaticSource {
    pub fn names(names: &[&str]) -> Self {
        Self(Ok(names.iter().map(|s| s.to_string()).collect()))
    }
}

impl CaptureDeviceSource for StaticSource {
    fn capture_device_names(&self) -> Result<Vec<String>, DomainError> {
        self.0.clone()
    }
}
