//! カメラ名の判定（仮想 / 実機 / 不明）
//!
//! パターン表は不変で、構築時に注入する。グローバル状態は持たない。

use crate::model::catalog::{KNOWN_HARDWARE_BRANDS, VIRTUAL_CAMERA_PATTERNS};
use crate::model::{Classification, UnknownPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    virtual_patterns: Vec<String>,
    known_brands: Vec<String>,
}

impl Classifier {
    /// 任意の表から構築（小文字化して保持）
    pub fn new<S: AsRef<str>>(virtual_patterns: &[S], known_brands: &[S]) -> Self {
        Self {
            virtual_patterns: lowercase_all(virtual_patterns),
            known_brands: lowercase_all(known_brands),
        }
    }

    /// 組み込みの表で構築
    pub fn builtin() -> Self {
        Self::new(VIRTUAL_CAMERA_PATTERNS, KNOWN_HARDWARE_BRANDS)
    }

    /// 組み込みの表に設定由来の追加分を足す
    pub fn with_extras(extra_virtual: &[String], extra_brands: &[String]) -> Self {
        let mut cls = Self::builtin();
        cls.virtual_patterns.extend(lowercase_all(extra_virtual));
        cls.known_brands.extend(lowercase_all(extra_brands));
        cls
    }

    /// 仮想パターン → ブランド の順に部分一致で判定
    pub fn classify(&self, name: &str) -> Classification {
        let lower = name.trim().to_lowercase();
        if lower.is_empty() {
            return Classification::Unknown;
        }
        if self.virtual_patterns.iter().any(|p| lower.contains(p.as_str())) {
            return Classification::Virtual;
        }
        if self.known_brands.iter().any(|b| lower.contains(b.as_str())) {
            return Classification::Real;
        }
        Classification::Unknown
    }

    /// 判定結果をポリシーで仮想/実機に解決
    pub fn is_virtual(&self, name: &str, policy: UnknownPolicy) -> bool {
        policy.resolve(self.classify(name))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builtin()
    }
}

fn lowercase_all<S: AsRef<str>>(list: &[S]) -> Vec<String> {
    list.iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permute_case(s: &str) -> Vec<String> {
        let alternating: String = s
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i % 2 == 0 {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect();
        vec![s.to_string(), s.to_uppercase(), alternating]
    }

    #[test]
    fn every_virtual_pattern_is_virtual_in_any_case() {
        let cls = Classifier::builtin();
        for pattern in VIRTUAL_CAMERA_PATTERNS {
            for name in permute_case(pattern) {
                assert_eq!(cls.classify(&name), Classification::Virtual, "{name}");
            }
        }
    }

    #[test]
    fn brands_without_virtual_pattern_are_real() {
        let cls = Classifier::builtin();
        for name in [
            "Logitech HD Webcam C920",
            "Integrated Camera",
            "Razer Kiyo Pro",
            "USB2.0 HD UVC WebCam",
            "Microsoft® LifeCam HD-3000",
        ] {
            assert_eq!(cls.classify(name), Classification::Real, "{name}");
        }
    }

    #[test]
    fn virtual_pattern_wins_over_brand() {
        // "webcam" はブランド表にもあるが仮想パターンが優先
        let cls = Classifier::builtin();
        assert_eq!(cls.classify("ManyCam Virtual Webcam"), Classification::Virtual);
    }

    #[test]
    fn unrecognized_is_unknown() {
        let cls = Classifier::builtin();
        assert_eq!(cls.classify("Mystery Device"), Classification::Unknown);
        assert_eq!(cls.classify(""), Classification::Unknown);
        assert!(cls.is_virtual("Mystery Device", UnknownPolicy::TreatAsVirtual));
        assert!(!cls.is_virtual("Mystery Device", UnknownPolicy::TreatAsReal));
    }

    #[test]
    fn extras_extend_builtin_tables() {
        let cls = Classifier::with_extras(&["Mystery".to_string()], &[]);
        assert_eq!(cls.classify("Mystery Device"), Classification::Virtual);
        let cls = Classifier::with_extras(&[], &["ACME".to_string()]);
        assert_eq!(cls.classify("acme eye"), Classification::Real);
    }
}
