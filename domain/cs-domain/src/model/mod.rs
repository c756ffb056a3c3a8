//! ドメインモデル
//!
//! 標準ライブラリのみ使用（外部依存なし）
//! 値オブジェクト、エンティティ、設定型を定義

mod backup;      // バックアップレコード
pub mod catalog; // 仮想カメラパターン、ブランド、置換先候補
mod camera;      // 列挙結果、判定結果
mod config;      // ユーザー設定
mod registry;    // レジストリ位置/値

pub use backup::*;
pub use camera::*;
pub use catalog::{all_real_camera_names, real_camera_presets, suggested_name};
pub use config::*;
pub use registry::*;
