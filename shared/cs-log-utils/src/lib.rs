//! ログユーティリティ（stdのみ）

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const LIFECYCLE_LOG_FILE_NAME: &str = "camspoof-lifecycle.log";

/// UTCのRFC3339（ミリ秒付き）。例: 2025-01-15T10:30:00.123Z
pub fn utc_rfc3339_millis() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format_rfc3339_millis(now.as_secs(), now.subsec_millis())
}

/// エポック秒+ミリ秒をRFC3339へ
pub fn format_rfc3339_millis(secs: u64, millis: u32) -> String {
    let (year, month, day, hour, minute, second) = unix_seconds_to_utc_components(secs);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year, month, day, hour, minute, second, millis
    )
}

/// ファイル名向けの詰めた形式。例: 20250115103000
pub fn utc_compact_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format_compact(secs)
}

pub fn format_compact(secs: u64) -> String {
    let (year, month, day, hour, minute, second) = unix_seconds_to_utc_components(secs);
    format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}",
        year, month, day, hour, minute, second
    )
}

/// UTCタイムスタンプ付きのライフサイクル行を作成する。
pub fn lifecycle_line(component: &str, message: &str) -> String {
    let timestamp = utc_rfc3339_millis();
    format!("[{}] [{}] {}\n", timestamp, component, message)
}

/// ライフサイクルログの既定出力先（実行ファイルの隣 → 一時フォルダ）
pub fn default_lifecycle_log_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
    {
        paths.push(dir.join(LIFECYCLE_LOG_FILE_NAME));
    }
    paths.push(std::env::temp_dir().join(LIFECYCLE_LOG_FILE_NAME));
    paths
}

/// 指定された出力先のうち、書き込み可能な最初の場所にログを書き込む
pub fn write_line_to_paths(line: &str, paths: &[PathBuf]) {
    for path in paths {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
            return;
        }
    }
}

/// 既定の出力先にライフサイクル行を書き込む
pub fn write_lifecycle_line(component: &str, message: &str) {
    let line = lifecycle_line(component, message);
    write_line_to_paths(&line, &default_lifecycle_log_paths());
}

fn unix_seconds_to_utc_components(secs: u64) -> (i32, u32, u32, u32, u32, u32) {
    let days = (secs / 86_400) as i64;
    let rem = (secs % 86_400) as i64;
    let hour = (rem / 3_600) as u32;
    let minute = ((rem % 3_600) / 60) as u32;
    let second = (rem % 60) as u32;
    let (year, month, day) = civil_from_days(days);
    (year, month, day, hour, minute, second)
}

fn civil_from_days(days: i64) -> (i32, u32, u32) {
    // Howard Hinnant のアルゴリズム
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097; // [0, 146096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365; // [0, 399]
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = mp + if mp < 10 { 3 } else { -9 }; // [1, 12]
    let year = y + if m <= 2 { 1 } else { 0 };
    (year as i32, m as u32, d as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_instants() {
        assert_eq!(format_rfc3339_millis(0, 0), "1970-01-01T00:00:00.000Z");
        assert_eq!(
            format_rfc3339_millis(1_700_000_000, 7),
            "2023-11-14T22:13:20.007Z"
        );
        // うるう日
        assert_eq!(format_compact(951_782_400), "20000229000000");
    }

    #[test]
    fn lifecycle_line_shape() {
        let line = lifecycle_line("cli", "start");
        assert!(line.starts_with('['));
        assert!(line.ends_with("] [cli] start\n"));
        assert_eq!(utc_rfc3339_millis().len(), 24);
    }

    #[test]
    fn writes_to_first_usable_path() {
        let dir = std::env::temp_dir().join(format!(
            "cs-log-utils-{}-{}",
            std::process::id(),
            utc_compact_timestamp()
        ));
        let first = dir.join("a").join("life.log");
        write_line_to_paths("one\n", &[first.clone()]);
        write_line_to_paths("two\n", &[first.clone()]);
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "one\ntwo\n");
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn default_paths_end_with_temp_dir() {
        let paths = default_lifecycle_log_paths();
        assert_eq!(
            paths.last().unwrap(),
            &std::env::temp_dir().join(LIFECYCLE_LOG_FILE_NAME)
        );
    }
}
