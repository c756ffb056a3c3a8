use super::{DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH, UnknownPolicy, suggested_name};
use crate::DomainError;
use std::collections::BTreeSet;

/// ユーザー設定（実行ファイル横の camspoof.json）
///
/// ファイルがなければ既定値で動作する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpooferConfig {
    /// レジストリ検索の再帰深さ上限（ルートが0）
    pub search_depth: u32,
    /// Unknown判定の扱い（全バックエンド共通）
    pub unknown_policy: UnknownPolicy,
    /// 置換先を省略したときの名前
    pub default_target_name: String,
    /// 追加の仮想カメラパターン
    pub extra_virtual_patterns: Vec<String>,
    /// 追加のハードウェアブランド
    pub extra_known_brands: Vec<String>,
}

impl Default for SpooferConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            unknown_policy: UnknownPolicy::default(),
            default_target_name: suggested_name().to_string(),
            extra_virtual_patterns: Vec::new(),
            extra_known_brands: Vec::new(),
        }
    }
}

impl SpooferConfig {
    /// 範囲外の値を丸め、パターンを小文字化・重複除去する。
    pub fn normalize(&mut self) {
        self.search_depth = self.search_depth.clamp(1, MAX_SEARCH_DEPTH);
        self.default_target_name = self.default_target_name.trim().to_string();
        if self.default_target_name.is_empty() {
            self.default_target_name = suggested_name().to_string();
        }
        self.extra_virtual_patterns = normalize_patterns(&self.extra_virtual_patterns);
        self.extra_known_brands = normalize_patterns(&self.extra_known_brands);
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.search_depth == 0 || self.search_depth > MAX_SEARCH_DEPTH {
            return Err(DomainError::ValidationError(format!(
                "search_depth は 1-{} の範囲である必要があります (現在 {})",
                MAX_SEARCH_DEPTH, self.search_depth
            )));
        }
        if self.default_target_name.contains('\0') {
            return Err(DomainError::ValidationError(
                "default_target_name にNUL文字を含めることはできません".into(),
            ));
        }
        Ok(())
    }
}

fn normalize_patterns(list: &[String]) -> Vec<String> {
    let set: BTreeSet<String> = list
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty() && !p.contains('\0'))
        .collect();
    set.into_iter().collect()
}
