//! カメラ列挙結果のモデル

use crate::DomainError;
use std::fmt;
use std::str::FromStr;

/// 列挙元から得られるメーカー名（どのバックエンドも報告しない）
pub const UNKNOWN_MANUFACTURER: &str = "Unknown";

/// デバイス状態（どちらのバックエンドも列挙できた時点で OK とする）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraStatus {
    #[default]
    Ok,
}

impl CameraStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
        }
    }
}

/// 名前ベースの判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// 既知の仮想カメラパターンに一致
    Virtual,
    /// 既知のハードウェアブランドに一致
    Real,
    /// どちらにも一致しない
    Unknown,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Virtual => "virtual",
            Self::Real => "real",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown判定をどちらに倒すか
///
/// 列挙バックエンドに関係なく同じポリシーを適用する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPolicy {
    /// 仮想として扱う（偽装対象として表示）
    #[default]
    TreatAsVirtual,
    /// 実機として扱う
    TreatAsReal,
}

impl UnknownPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TreatAsVirtual => "virtual",
            Self::TreatAsReal => "real",
        }
    }

    /// 判定結果を仮想/実機の2値に解決
    pub fn resolve(&self, classification: Classification) -> bool {
        match classification {
            Classification::Virtual => true,
            Classification::Real => false,
            Classification::Unknown => matches!(self, Self::TreatAsVirtual),
        }
    }
}

impl FromStr for UnknownPolicy {
    type Err = DomainError;

    /// 設定ファイルの綴り誤りは黙って既定値にせずエラーにする
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "virtual" | "treat_as_virtual" => Ok(Self::TreatAsVirtual),
            "real" | "treat_as_real" => Ok(Self::TreatAsReal),
            other => Err(DomainError::ValidationError(format!(
                "unknown_policy は \"virtual\" か \"real\" である必要があります (現在 \"{}\")",
                other
            ))),
        }
    }
}

/// どの列挙バックエンドから得たか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationBackend {
    /// DirectShow（ビデオ入力デバイスカテゴリ）
    DirectShow,
    /// レジストリのデバイスクラス走査
    Registry,
}

impl EnumerationBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectShow => "directshow",
            Self::Registry => "registry",
        }
    }
}

/// 列挙されたカメラ1台分
///
/// 問い合わせごとに新規作成され、永続化されない。同一性は `name` で判断する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraRecord {
    pub name: String,
    pub device_id: String,
    pub status: CameraStatus,
    pub is_virtual: bool,
    pub classification: Classification,
    pub manufacturer: String,
    /// レジストリ走査で見つかった場合のキーパス（HKLM相対）
    pub registry_path: Option<String>,
    pub backend: EnumerationBackend,
}

impl CameraRecord {
    pub fn new(
        name: impl Into<String>,
        device_id: impl Into<String>,
        classification: Classification,
        policy: UnknownPolicy,
        backend: EnumerationBackend,
    ) -> Self {
        Self {
            name: name.into(),
            device_id: device_id.into(),
            status: CameraStatus::Ok,
            is_virtual: policy.resolve(classification),
            classification,
            manufacturer: UNKNOWN_MANUFACTURER.to_string(),
            registry_path: None,
            backend,
        }
    }

    pub fn with_registry_path(mut self, path: impl Into<String>) -> Self {
        self.registry_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_resolves_unknown_only() {
        let virt = UnknownPolicy::TreatAsVirtual;
        let real = UnknownPolicy::TreatAsReal;
        assert!(virt.resolve(Classification::Unknown));
        assert!(!real.resolve(Classification::Unknown));
        assert!(real.resolve(Classification::Virtual));
        assert!(!virt.resolve(Classification::Real));
    }

    #[test]
    fn policy_parses_known_names_only() {
        assert_eq!("REAL".parse::<UnknownPolicy>(), Ok(UnknownPolicy::TreatAsReal));
        assert_eq!(" virtual ".parse::<UnknownPolicy>(), Ok(UnknownPolicy::TreatAsVirtual));
        for policy in [UnknownPolicy::TreatAsVirtual, UnknownPolicy::TreatAsReal] {
            assert_eq!(policy.as_str().parse::<UnknownPolicy>(), Ok(policy));
        }
        assert!(matches!(
            "reel".parse::<UnknownPolicy>(),
            Err(DomainError::ValidationError(_))
        ));
        assert!("".parse::<UnknownPolicy>().is_err());
    }

    #[test]
    fn record_defaults() {
        let rec = CameraRecord::new(
            "Mystery Cam",
            "0",
            Classification::Unknown,
            UnknownPolicy::TreatAsVirtual,
            EnumerationBackend::DirectShow,
        );
        assert!(rec.is_virtual);
        assert_eq!(rec.status, CameraStatus::Ok);
        assert_eq!(rec.manufacturer, UNKNOWN_MANUFACTURER);
        assert!(rec.registry_path.is_none());
    }
}
