//! 接続中ビデオキャプチャデバイスの列挙
//!
//! 一次バックエンド（DirectShow）が0件のときだけレジストリのデバイスクラスを走査する。
//! どちらのバックエンドの失敗も空リストとして扱い、警告として呼び出し元へ返す。

use cs_domain::model::{
    CameraRecord, DEVICE_PARAMETERS_SUBPATH, EnumerationBackend, FRIENDLY_NAME_VALUE,
    UnknownPolicy, VIDEO_CAMERA_CLASS_PATH, join_key_path,
};
use cs_domain::port::driven::{CaptureDeviceSource, RegistryHive};
use cs_domain::service::Classifier;
use std::collections::HashSet;

/// 列挙結果
#[derive(Debug, Clone, Default)]
pub struct CameraScan {
    pub cameras: Vec<CameraRecord>,
    /// 結果を返したバックエンド（どちらも0件なら None）
    pub backend: Option<EnumerationBackend>,
    /// バックエンドの失敗内容（ログ用）
    pub warnings: Vec<String>,
}

pub fn list_cameras<S, H>(
    source: &S,
    hive: &H,
    classifier: &Classifier,
    policy: UnknownPolicy,
) -> CameraScan
where
    S: CaptureDeviceSource + ?Sized,
    H: RegistryHive + ?Sized,
{
    let mut scan = CameraScan::default();

    match source.capture_device_names() {
        Ok(names) => {
            scan.cameras = names
                .into_iter()
                .filter(|n| !n.trim().is_empty())
                .enumerate()
                .map(|(idx, name)| {
                    let class = classifier.classify(&name);
                    CameraRecord::new(
                        name,
                        idx.to_string(),
                        class,
                        policy,
                        EnumerationBackend::DirectShow,
                    )
                })
                .collect();
        }
        Err(e) => scan.warnings.push(format!("directshow: {}", e)),
    }

    if !scan.cameras.is_empty() {
        scan.backend = Some(EnumerationBackend::DirectShow);
        scan.cameras = dedup_by_name(scan.cameras);
        return scan;
    }

    match registry_cameras(hive, classifier, policy) {
        Ok(cameras) => scan.cameras = cameras,
        Err(e) => scan.warnings.push(format!("registry: {}", e)),
    }
    if !scan.cameras.is_empty() {
        scan.backend = Some(EnumerationBackend::Registry);
    }
    scan.cameras = dedup_by_name(scan.cameras);
    scan
}

fn registry_cameras<H: RegistryHive + ?Sized>(
    hive: &H,
    classifier: &Classifier,
    policy: UnknownPolicy,
) -> Result<Vec<CameraRecord>, cs_domain::DomainError> {
    let subkeys = match hive.subkeys(VIDEO_CAMERA_CLASS_PATH) {
        Ok(keys) => keys,
        // クラス自体が未登録ならカメラなし
        Err(e) if e.is_not_found() => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut cameras = Vec::new();
    for sub in subkeys {
        let device_key = join_key_path(VIDEO_CAMERA_CLASS_PATH, &sub);
        let params = join_key_path(&device_key, DEVICE_PARAMETERS_SUBPATH);
        let name = match hive.read_string(&params, FRIENDLY_NAME_VALUE) {
            Ok(Some(name)) if !name.trim().is_empty() => name,
            _ => continue,
        };
        let class = classifier.classify(&name);
        cameras.push(
            CameraRecord::new(name, sub, class, policy, EnumerationBackend::Registry)
                .with_registry_path(device_key),
        );
    }
    Ok(cameras)
}

/// 同名を除去（最初の出現を残し順序を保つ）
pub fn dedup_by_name(cameras: Vec<CameraRecord>) -> Vec<CameraRecord> {
    let mut seen = HashSet::new();
    cameras
        .into_iter()
        .filter(|c| seen.insert(c.name.clone()))
        .collect()
}
