//! テスト用のフェイクポート

use cs_domain::DomainError;
use cs_domain::model::{BackupRecord, RegistryStringValue, RegistryValueKind};
use cs_domain::port::driven::{
    BackupStore, CaptureDeviceSource, Clock, LogWriter, OperationLogRecord, RegistryHive,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

pub struct FakeSource(pub Vec<String>);

impl CaptureDeviceSource for FakeSource {
    fn capture_device_names(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.0.clone())
    }
}

/// 値を持つキーだけを保持し、途中のキーは暗黙に存在するものとする
#[derive(Default)]
pub struct FakeHive {
    keys: RefCell<BTreeMap<String, Vec<RegistryStringValue>>>,
    pub read_only: Cell<bool>,
}

impl FakeHive {
    pub fn put(&self, path: &str, name: &str, data: &str) {
        let mut keys = self.keys.borrow_mut();
        let values = keys.entry(path.to_string()).or_default();
        values.retain(|v| v.name != name);
        values.push(RegistryStringValue::new(name, data, RegistryValueKind::String));
    }

    pub fn get(&self, path: &str, name: &str) -> Option<String> {
        self.keys
            .borrow()
            .get(path)
            .and_then(|values| values.iter().find(|v| v.name == name))
            .map(|v| v.data.clone())
    }

    fn exists(&self, path: &str) -> bool {
        let prefix = format!("{}\\", path);
        self.keys
            .borrow()
            .keys()
            .any(|k| k == path || k.starts_with(&prefix))
    }
}

impl RegistryHive for FakeHive {
    fn subkeys(&self, path: &str) -> Result<Vec<String>, DomainError> {
        if !self.exists(path) {
            return Err(DomainError::NotFound(path.into()));
        }
        let prefix = format!("{}\\", path);
        let names: BTreeSet<String> = self
            .keys
            .borrow()
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter_map(|rest| rest.split('\\').next())
            .map(str::to_string)
            .collect();
        Ok(names.into_iter().collect())
    }

    fn string_values(&self, path: &str) -> Result<Vec<RegistryStringValue>, DomainError> {
        if !self.exists(path) {
            return Err(DomainError::NotFound(path.into()));
        }
        Ok(self.keys.borrow().get(path).cloned().unwrap_or_default())
    }

    fn read_string(&self, path: &str, value_name: &str) -> Result<Option<String>, DomainError> {
        Ok(self.get(path, value_name))
    }

    fn write_string(
        &self,
        path: &str,
        value_name: &str,
        data: &str,
        _kind: RegistryValueKind,
    ) -> Result<(), DomainError> {
        if self.read_only.get() {
            return Err(DomainError::RegistryAccessDenied(path.into()));
        }
        self.put(path, value_name, data);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeBackup {
    records: RefCell<BTreeMap<String, BackupRecord>>,
    pub malformed: Cell<bool>,
}

impl BackupStore for FakeBackup {
    fn save(&self, record: &BackupRecord) -> Result<(), DomainError> {
        self.records
            .borrow_mut()
            .insert(record.original_name().to_string(), record.clone());
        Ok(())
    }

    fn load(&self) -> Result<BTreeMap<String, BackupRecord>, DomainError> {
        if self.malformed.get() {
            return Err(DomainError::MalformedBackup("expected value at line 1".into()));
        }
        Ok(self.records.borrow().clone())
    }
}

#[derive(Default)]
pub struct FakeLog {
    pub records: RefCell<Vec<OperationLogRecord>>,
}

impl LogWriter for FakeLog {
    fn write_operation_log(&self, record: &OperationLogRecord) -> Result<(), DomainError> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}

pub struct FixedClock;

impl Clock for FixedClock {
    fn now_iso8601(&self) -> String {
        "2023-11-14T22:13:20.000Z".into()
    }
}
