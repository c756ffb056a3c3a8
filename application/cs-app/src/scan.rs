//! バックグラウンド列挙
//!
//! 列挙はCOM初期化やレジストリ走査で時間がかかるため、呼び出しごとに
//! 1本のスレッドで実行し、結果をチャネルで返す。スキャン同士は協調しない。

use cs_domain::model::UnknownPolicy;
use cs_domain::port::driven::{CaptureDeviceSource, RegistryHive};
use cs_domain::service::Classifier;
use cs_engine::{CameraScan, list_cameras};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

pub type ScanResult = CameraScan;

/// 列挙をスレッドで開始し、結果1件を受け取るレシーバを返す
pub fn spawn_scan<S, H>(
    source: Arc<S>,
    hive: Arc<H>,
    classifier: Classifier,
    policy: UnknownPolicy,
) -> Receiver<ScanResult>
where
    S: CaptureDeviceSource + Send + Sync + ?Sized + 'static,
    H: RegistryHive + Send + Sync + ?Sized + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let scan = list_cameras(source.as_ref(), hive.as_ref(), &classifier, policy);
        // 受信側が先に破棄されていても問題ない
        let _ = tx.send(scan);
    });
    rx
}
