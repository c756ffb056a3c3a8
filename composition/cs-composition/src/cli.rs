//! CLI 用ランタイム配線。
//! CLI ユースケースの構成ルート。

use cs_adapter_camera::DirectShowSource;
use cs_adapter_clock::ClockAdapter;
use cs_adapter_fs::FsAdapter;
use cs_adapter_paths as paths;
use cs_adapter_privilege::PrivilegeAdapter;
use cs_adapter_registry::RegistryAdapter;
use cs_app::{ScanResult, SpoofDeps, SpoofService, spawn_scan};
use cs_domain::DomainError;
use cs_domain::model::SpooferConfig;
use cs_domain::port::driven::{ConfigRepository, PrivilegeProvider};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// CLI実行ファイル用の依存関係
pub struct CliRuntime {
    registry: Arc<RegistryAdapter>,
    camera: Arc<DirectShowSource>,
    fs: FsAdapter,
    clock: ClockAdapter,
    privilege: PrivilegeAdapter,
    app_dir: PathBuf,
    config: SpooferConfig,
    config_warning: Option<String>,
}

impl CliRuntime {
    /// 実行ファイルの場所で新規作成
    pub fn new() -> Self {
        Self::with_app_dir(paths::default_app_dir())
    }

    /// 指定ディレクトリのバックアップ/設定/ログを使う
    pub fn with_app_dir(app_dir: impl Into<PathBuf>) -> Self {
        let app_dir = app_dir.into();
        let fs = FsAdapter::new(&app_dir);
        let (config, config_warning) = resolve_config(fs.load_or_default());
        if let Some(warning) = &config_warning {
            cs_log_utils::write_lifecycle_line("cli", warning);
        }
        Self {
            registry: Arc::new(RegistryAdapter::new()),
            camera: Arc::new(DirectShowSource::new()),
            fs,
            clock: ClockAdapter::new(),
            privilege: PrivilegeAdapter::new(),
            app_dir,
            config,
            config_warning,
        }
    }

    /// アプリケーションサービス取得
    pub fn service(&self) -> SpoofService<'_> {
        SpoofService::new(
            SpoofDeps {
                source: self.camera.as_ref(),
                hive: self.registry.as_ref(),
                backup: &self.fs,
                logger: &self.fs,
                clock: &self.clock,
            },
            self.config.clone(),
        )
    }

    /// 列挙をバックグラウンドで開始
    pub fn spawn_scan(&self) -> Receiver<ScanResult> {
        let service = self.service();
        spawn_scan(
            Arc::clone(&self.camera),
            Arc::clone(&self.registry),
            service.classifier().clone(),
            service.unknown_policy(),
        )
    }

    pub fn privilege(&self) -> &dyn PrivilegeProvider {
        &self.privilege
    }

    pub fn is_elevated(&self) -> bool {
        self.privilege.is_elevated()
    }

    pub fn config(&self) -> &SpooferConfig {
        &self.config
    }

    /// 設定ファイルが読めなかった理由（既定値で続行している）
    pub fn config_warning(&self) -> Option<&str> {
        self.config_warning.as_deref()
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    pub fn backup_path(&self) -> &Path {
        self.fs.backup_path()
    }
}

impl Default for CliRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// 設定読込（失敗時はデフォルト＋警告）
fn resolve_config(
    loaded: Result<SpooferConfig, DomainError>,
) -> (SpooferConfig, Option<String>) {
    match loaded {
        Ok(mut config) => {
            config.normalize();
            (config, None)
        }
        Err(e) => (
            SpooferConfig::default(),
            Some(format!("config load failed, using defaults: {e}")),
        ),
    }
}
