//! カメラ名偽装のユースケース（アプリ層）。
//!
//! ここより外へはエラーを出さない。すべて `OperationOutcome` に変換する。

use cs_domain::DomainError;
use cs_domain::model::{
    CameraRecord, Classification, SpooferConfig, UnknownPolicy, real_camera_presets,
};
use cs_domain::port::driven::{
    BackupStore, CaptureDeviceSource, Clock, LogWriter, OperationLogRecord, RegistryHive,
};
use cs_domain::port::driving::{OperationOutcome, SpoofUseCase};
use cs_domain::service::Classifier;
use cs_engine::{CameraScan, list_cameras, rename_camera, restore_camera};

/// 表示メッセージ
pub mod messages {
    pub fn renamed(modified: usize) -> String {
        format!("Camera renamed successfully! ({} entries modified)", modified)
    }

    pub fn renamed_partially(modified: usize, failed: usize) -> String {
        format!(
            "Camera renamed successfully! ({} entries modified, {} could not be written)",
            modified, failed
        )
    }

    pub fn not_found_in_registry(old_name: &str) -> String {
        format!("Could not find '{}' in the registry.", old_name)
    }

    pub const RENAME_NEEDS_ADMIN: &str = "Could not modify any entry. Run as administrator.";

    pub fn backup_not_found(name: &str) -> String {
        format!("Backup not found for '{}'", name)
    }

    pub fn restored(restored: usize) -> String {
        format!("Original name restored! ({} entries)", restored)
    }

    pub fn restored_partially(restored: usize, failed: usize) -> String {
        format!(
            "Original name restored! ({} entries, {} could not be written)",
            restored, failed
        )
    }

    pub const RESTORE_NEEDS_ADMIN: &str = "Could not restore. Run as administrator.";
}

pub struct SpoofDeps<'a> {
    pub source: &'a dyn CaptureDeviceSource,
    pub hive: &'a dyn RegistryHive,
    pub backup: &'a dyn BackupStore,
    pub logger: &'a dyn LogWriter,
    pub clock: &'a dyn Clock,
}

pub struct SpoofService<'a> {
    deps: SpoofDeps<'a>,
    config: SpooferConfig,
    classifier: Classifier,
}

impl<'a> SpoofService<'a> {
    /// 設定は正規化してから保持する
    pub fn new(deps: SpoofDeps<'a>, mut config: SpooferConfig) -> Self {
        config.normalize();
        let classifier =
            Classifier::with_extras(&config.extra_virtual_patterns, &config.extra_known_brands);
        Self {
            deps,
            config,
            classifier,
        }
    }

    pub fn config(&self) -> &SpooferConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn unknown_policy(&self) -> UnknownPolicy {
        self.config.unknown_policy
    }

    /// 列挙の詳細（使用バックエンド/警告付き）
    pub fn scan(&self) -> CameraScan {
        let scan = list_cameras(
            self.deps.source,
            self.deps.hive,
            &self.classifier,
            self.config.unknown_policy,
        );
        if !scan.warnings.is_empty() {
            self.log("enumerate", false, &scan.warnings.join("; "), Vec::new());
        }
        scan
    }

    pub fn has_backups(&self) -> bool {
        !self.backed_up_names().is_empty()
    }

    pub fn presets(&self) -> &'static [(&'static str, &'static [&'static str])] {
        real_camera_presets()
    }

    /// 置換先省略時の名前
    pub fn default_target_name(&self) -> &str {
        &self.config.default_target_name
    }

    fn log(&self, operation: &str, success: bool, details: &str, targets: Vec<String>) {
        let record = OperationLogRecord {
            timestamp: self.deps.clock.now_iso8601(),
            operation: operation.to_string(),
            success,
            details: details.to_string(),
            targets,
        };
        let _ = self.deps.logger.write_operation_log(&record);
    }
}

impl SpoofUseCase for SpoofService<'_> {
    fn list_cameras(&self) -> Vec<CameraRecord> {
        self.scan().cameras
    }

    fn classify(&self, name: &str) -> Classification {
        self.classifier.classify(name)
    }

    fn rename(&self, old_name: &str, new_name: &str) -> OperationOutcome {
        let outcome = match rename_camera(
            self.deps.hive,
            self.deps.backup,
            self.deps.clock,
            old_name,
            new_name,
            self.config.search_depth,
        ) {
            Ok(report) if report.modified == 0 => {
                OperationOutcome::failure(messages::RENAME_NEEDS_ADMIN)
                    .counts(report.matched, 0, report.failed())
            }
            Ok(report) => {
                let message = if report.failed() == 0 {
                    messages::renamed(report.modified)
                } else {
                    messages::renamed_partially(report.modified, report.failed())
                };
                OperationOutcome::success(message).counts(
                    report.matched,
                    report.modified,
                    report.failed(),
                )
            }
            Err(DomainError::NotFound(_)) => {
                OperationOutcome::failure(messages::not_found_in_registry(old_name))
            }
            Err(err) => OperationOutcome::failure(format!("Rename failed: {}", err)),
        };
        self.log(
            "rename",
            outcome.ok,
            &outcome.message,
            vec![old_name.to_string(), new_name.to_string()],
        );
        outcome
    }

    fn restore(&self, original_name: &str) -> OperationOutcome {
        let outcome = match restore_camera(self.deps.hive, self.deps.backup, original_name) {
            Ok(report) if report.restored == 0 => {
                OperationOutcome::failure(messages::RESTORE_NEEDS_ADMIN)
                    .counts(report.recorded, 0, report.failed())
            }
            Ok(report) => {
                let message = if report.failed() == 0 {
                    messages::restored(report.restored)
                } else {
                    messages::restored_partially(report.restored, report.failed())
                };
                OperationOutcome::success(message).counts(
                    report.recorded,
                    report.restored,
                    report.failed(),
                )
            }
            Err(DomainError::NotFound(_)) => {
                OperationOutcome::failure(messages::backup_not_found(original_name))
            }
            Err(err) => OperationOutcome::failure(format!("Restore failed: {}", err)),
        };
        self.log(
            "restore",
            outcome.ok,
            &outcome.message,
            vec![original_name.to_string()],
        );
        outcome
    }

    fn backed_up_names(&self) -> Vec<String> {
        match self.deps.backup.list_backed_up_names() {
            Ok(names) => names,
            Err(err) => {
                self.log("backups", false, &err.to_string(), Vec::new());
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeBackup, FakeHive, FakeLog, FakeSource, FixedClock};
    use cs_domain::model::DEVICE_ENUM_ROOT;

    const OBS: &str = "OBS Virtual Camera";
    const C920: &str = "Logitech HD Webcam C920";

    struct World {
        source: FakeSource,
        hive: FakeHive,
        backup: FakeBackup,
        log: FakeLog,
        clock: FixedClock,
    }

    impl World {
        fn new() -> Self {
            Self {
                source: FakeSource(vec![OBS.into(), "Integrated Camera".into()]),
                hive: FakeHive::default(),
                backup: FakeBackup::default(),
                log: FakeLog::default(),
                clock: FixedClock,
            }
        }

        fn service(&self, config: SpooferConfig) -> SpoofService<'_> {
            SpoofService::new(
                SpoofDeps {
                    source: &self.source,
                    hive: &self.hive,
                    backup: &self.backup,
                    logger: &self.log,
                    clock: &self.clock,
                },
                config,
            )
        }
    }

    fn key() -> String {
        format!(r"{}\ROOT\IMAGE\0000", DEVICE_ENUM_ROOT)
    }

    #[test]
    fn rename_reports_count_and_logs() {
        let world = World::new();
        world.hive.put(&key(), "FriendlyName", "OBS Virtual Camera (Video)");
        let svc = world.service(SpooferConfig::default());

        let outcome = svc.rename(OBS, C920);
        assert!(outcome.ok);
        assert_eq!(outcome.message, "Camera renamed successfully! (1 entries modified)");
        assert_eq!(outcome.modified, 1);
        assert_eq!(
            world.hive.get(&key(), "FriendlyName").as_deref(),
            Some("Logitech HD Webcam C920 (Video)")
        );
        assert!(svc.has_backups());
        assert_eq!(svc.backed_up_names(), vec![OBS.to_string()]);

        let logs = world.log.records.borrow();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].operation, "rename");
        assert!(logs[0].success);
        assert_eq!(logs[0].targets, vec![OBS.to_string(), C920.to_string()]);
    }

    #[test]
    fn rename_without_match_reports_not_found() {
        let world = World::new();
        let svc = world.service(SpooferConfig::default());
        let outcome = svc.rename(OBS, C920);
        assert!(!outcome.ok);
        assert_eq!(outcome.message, "Could not find 'OBS Virtual Camera' in the registry.");
        assert!(!svc.has_backups());
        assert!(!world.log.records.borrow()[0].success);
    }

    #[test]
    fn rename_without_rights_asks_for_admin() {
        let world = World::new();
        world.hive.put(&key(), "FriendlyName", OBS);
        world.hive.read_only.set(true);
        let svc = world.service(SpooferConfig::default());

        let outcome = svc.rename(OBS, C920);
        assert!(!outcome.ok);
        assert_eq!(outcome.message, messages::RENAME_NEEDS_ADMIN);
        assert_eq!(outcome.matched, 1);
        assert_eq!(outcome.failed, 1);
    }

    #[test]
    fn restore_round_trip_and_missing_backup() {
        let world = World::new();
        world.hive.put(&key(), "FriendlyName", "OBS Virtual Camera (Video)");
        let svc = world.service(SpooferConfig::default());
        assert!(svc.rename(OBS, C920).ok);

        let outcome = svc.restore(OBS);
        assert!(outcome.ok);
        assert_eq!(outcome.message, "Original name restored! (1 entries)");
        assert_eq!(
            world.hive.get(&key(), "FriendlyName").as_deref(),
            Some("OBS Virtual Camera (Video)")
        );

        let outcome = svc.restore("Nope");
        assert!(!outcome.ok);
        assert_eq!(outcome.message, "Backup not found for 'Nope'");
    }

    #[test]
    fn restore_without_rights_asks_for_admin() {
        let world = World::new();
        world.hive.put(&key(), "FriendlyName", OBS);
        let svc = world.service(SpooferConfig::default());
        assert!(svc.rename(OBS, C920).ok);

        world.hive.read_only.set(true);
        let outcome = svc.restore(OBS);
        assert!(!outcome.ok);
        assert_eq!(outcome.message, messages::RESTORE_NEEDS_ADMIN);
    }

    #[test]
    fn malformed_backup_becomes_failure_outcome() {
        let world = World::new();
        world.hive.put(&key(), "FriendlyName", OBS);
        world.backup.malformed.set(true);
        let svc = world.service(SpooferConfig::default());

        let outcome = svc.restore(OBS);
        assert!(!outcome.ok);
        assert!(outcome.message.starts_with("Restore failed"));
        assert!(svc.backed_up_names().is_empty());
    }

    #[test]
    fn list_applies_policy_and_extra_patterns() {
        let world = World::new();
        let svc = world.service(SpooferConfig {
            unknown_policy: UnknownPolicy::TreatAsReal,
            extra_virtual_patterns: vec!["Integrated".into()],
            ..SpooferConfig::default()
        });
        let cams = svc.list_cameras();
        assert_eq!(cams.len(), 2);
        assert!(cams.iter().all(|c| c.is_virtual));
        assert_eq!(svc.classify("Totally Unknown"), Classification::Unknown);
        assert!(!svc.classifier().is_virtual("Totally Unknown", svc.unknown_policy()));
    }

    #[test]
    fn presets_and_default_target() {
        let world = World::new();
        let svc = world.service(SpooferConfig {
            default_target_name: "  ".into(),
            ..SpooferConfig::default()
        });
        assert_eq!(svc.default_target_name(), C920);
        assert!(!svc.presets().is_empty());
    }
}
