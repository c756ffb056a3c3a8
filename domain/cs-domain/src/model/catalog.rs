//! 固定データ: 仮想カメラのパターン、ハードウェアブランド、置換先の実機名

/// 仮想カメラ判定用の部分文字列（小文字で比較）
pub const VIRTUAL_CAMERA_PATTERNS: &[&str] = &[
    // OBS Studio
    "obs virtual camera",
    "obs-camera",
    "obs virtual",
    // NDI
    "newtek ndi video",
    "ndi virtual input",
    "ndi webcam input",
    "ndi video",
    // vMix
    "vmix video",
    "vmix video virtual webcam",
    "vmix virtual",
    // ManyCam
    "manycam virtual webcam",
    "manycam",
    // XSplit
    "xsplit vcam",
    "xsplit broadcaster",
    // Snap Camera
    "snap camera",
    "snapcamera",
    // SplitCam
    "splitcam video driver",
    "splitcam",
    // CyberLink YouCam
    "cyberlink youcam",
    "youcam",
    // Prism Live Studio
    "prism live studio",
    "prism live",
    // e2eSoft
    "e2esoft vcam",
    "e2esoft ivcam",
    "vcam",
    // EpocCam
    "epoccam camera",
    "epoccam",
    // AlterCam
    "altercam virtual webcam",
    "altercam",
    // DroidCam
    "droidcam source",
    "droidcam",
    "ivcam",
    "camtwist",
    // 汎用
    "virtual camera",
    "virtual webcam",
    "fake camera",
    "screen capture",
    "capture card",
];

/// 物理カメラのブランド/製品名の部分文字列（小文字で比較）
pub const KNOWN_HARDWARE_BRANDS: &[&str] = &[
    "logitech", "microsoft", "dell", "hp", "lenovo", "asus", "razer", "creative", "acer", "genius",
    "trust", "elgato", "anker", "obsbot", "insta360", "avermedia", "a4tech", "canyon", "papalook",
    "webcam", "facecam", "lifecam", "brio", "kiyo", "integrated", "built-in", "usb",
];

/// ブランドごとの置換先候補
pub const REAL_CAMERA_PRESETS: &[(&str, &[&str])] = &[
    (
        "Logitech",
        &[
            "Logitech HD Webcam C920",
            "Logitech HD Pro Webcam C922",
            "Logitech BRIO 4K Ultra HD Webcam",
            "Logitech StreamCam",
        ],
    ),
    (
        "Microsoft",
        &[
            "Microsoft LifeCam HD-3000",
            "Microsoft LifeCam Studio",
            "Microsoft Modern Webcam",
        ],
    ),
    ("Dell", &["Dell UltraSharp Webcam", "Dell Pro Webcam WB5023"]),
    ("HP", &["HP TrueVision HD Camera", "HP 960 4K Streaming Webcam"]),
    ("Lenovo", &["Lenovo Integrated Camera", "Lenovo 500 FHD Webcam"]),
    (
        "Others",
        &[
            "Razer Kiyo",
            "Elgato Facecam",
            "OBSBOT Tiny 2",
            "Insta360 Link",
            "ASUS ROG Eye",
        ],
    ),
];

/// 既定の置換先（最も普及しているWebカメラ）
pub const SUGGESTED_CAMERA_NAME: &str = "Logitech HD Webcam C920";

/// ブランドごとの置換先候補（表示順）
pub fn real_camera_presets() -> &'static [(&'static str, &'static [&'static str])] {
    REAL_CAMERA_PRESETS
}

/// 置換先候補をフラットに列挙
pub fn all_real_camera_names() -> Vec<&'static str> {
    REAL_CAMERA_PRESETS
        .iter()
        .flat_map(|(_, names)| names.iter().copied())
        .collect()
}

/// 既定の置換先
pub fn suggested_name() -> &'static str {
    SUGGESTED_CAMERA_NAME
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_lowercase() {
        for p in VIRTUAL_CAMERA_PATTERNS.iter().chain(KNOWN_HARDWARE_BRANDS) {
            assert_eq!(*p, p.to_lowercase(), "pattern {p} must be lowercase");
        }
    }

    #[test]
    fn presets_flatten_in_order() {
        let names = all_real_camera_names();
        assert_eq!(names.first().copied(), Some("Logitech HD Webcam C920"));
        assert_eq!(names.last().copied(), Some("ASUS ROG Eye"));
        assert_eq!(names.len(), 18);
    }

    #[test]
    fn suggested_name_is_a_preset() {
        assert!(all_real_camera_names().contains(&suggested_name()));
    }
}
