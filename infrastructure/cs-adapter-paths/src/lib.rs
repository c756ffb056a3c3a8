//! camspoofの既定パス解決
//!
//! データはすべて実行ファイルと同じフォルダに置く（ポータブル運用）。

use std::path::{Path, PathBuf};

/// 既定のアプリケーションディレクトリ
///
/// - 実行ファイルのあるフォルダ
/// - 取得できなければカレントディレクトリ
pub fn default_app_dir() -> PathBuf {
    app_dir_for(std::env::current_exe().ok().as_deref())
}

/// 実行ファイルパスからアプリケーションディレクトリを決める
pub fn app_dir_for(exe: Option<&Path>) -> PathBuf {
    exe.and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
