pub mod classifier;
pub mod text_match;

// 便宜のため再エクスポート
pub use classifier::Classifier;
pub use text_match::{contains_ignore_case, eq_ignore_case, find_ignore_case, replace_ignore_case};
