//! レジストリ上の位置と値のモデル
//!
//! パスはすべて HKEY_LOCAL_MACHINE 相対で扱う。

/// デバイスクラス（インターフェースGUID）ルート
pub const DEVICE_CLASSES_ROOT: &str = r"SYSTEM\CurrentControlSet\Control\DeviceClasses";
/// デバイス列挙ツリー
pub const DEVICE_ENUM_ROOT: &str = r"SYSTEM\CurrentControlSet\Enum";
/// COMクラス登録
pub const CLSID_ROOT: &str = r"SOFTWARE\Classes\CLSID";

/// 名前検索の対象ルート（検索順）
pub const SEARCH_ROOTS: [&str; 3] = [DEVICE_CLASSES_ROOT, DEVICE_ENUM_ROOT, CLSID_ROOT];

/// KSCATEGORY_VIDEO_CAMERA のデバイスクラスキー
pub const VIDEO_CAMERA_CLASS_PATH: &str =
    r"SYSTEM\CurrentControlSet\Control\DeviceClasses\{e5323777-f976-4f5b-9b55-b94699c46e44}";
/// 各インターフェースキー配下のパラメータキー
pub const DEVICE_PARAMETERS_SUBPATH: &str = r"#\Device Parameters";
/// 表示名の値名
pub const FRIENDLY_NAME_VALUE: &str = "FriendlyName";

/// 既定の再帰深さ上限（ルートが深さ0）
pub const DEFAULT_SEARCH_DEPTH: u32 = 6;
/// 設定で許可する再帰深さの上限
pub const MAX_SEARCH_DEPTH: u32 = 16;

/// 文字列系の値型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryValueKind {
    /// REG_SZ
    #[default]
    String,
    /// REG_EXPAND_SZ
    ExpandString,
}

impl RegistryValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "REG_SZ",
            Self::ExpandString => "REG_EXPAND_SZ",
        }
    }

    /// 不明な値は REG_SZ とみなす
    pub fn from_reg_name(value: &str) -> Self {
        match value {
            "REG_EXPAND_SZ" => Self::ExpandString,
            _ => Self::String,
        }
    }
}

/// キー配下の文字列値1件（列挙結果）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStringValue {
    pub name: String,
    pub data: String,
    pub kind: RegistryValueKind,
}

impl RegistryStringValue {
    pub fn new(name: impl Into<String>, data: impl Into<String>, kind: RegistryValueKind) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            kind,
        }
    }
}

/// 書き換え対象として見つかった1か所
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntryRef {
    /// HKLM相対のキーパス
    pub path: String,
    /// 値名（既定値は空文字）
    pub value_name: String,
    /// 変更前の値
    pub original_value: String,
    pub kind: RegistryValueKind,
}

impl RegistryEntryRef {
    pub fn new(
        path: impl Into<String>,
        value_name: impl Into<String>,
        original_value: impl Into<String>,
        kind: RegistryValueKind,
    ) -> Self {
        Self {
            path: path.into(),
            value_name: value_name.into(),
            original_value: original_value.into(),
            kind,
        }
    }
}

/// `parent\child` 形式でキーパスを連結
pub fn join_key_path(parent: &str, child: &str) -> String {
    let parent = parent.trim_end_matches('\\');
    let child = child.trim_start_matches('\\');
    if parent.is_empty() {
        return child.to_string();
    }
    if child.is_empty() {
        return parent.to_string();
    }
    format!("{}\\{}", parent, child)
}
