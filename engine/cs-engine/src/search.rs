//! カメラ名を含むレジストリ文字列値の検索
//!
//! 3つのルート配下を深さ制限付きで再帰的に走査する。読み取りのみ。
//! キーが存在しない/アクセス拒否されたサブツリーは読み飛ばす。

use cs_domain::model::{RegistryEntryRef, SEARCH_ROOTS, join_key_path};
use cs_domain::port::driven::RegistryHive;
use cs_domain::service::contains_ignore_case;

/// 既定ルートから `needle` を含む値を集める
pub fn find_entries<H: RegistryHive + ?Sized>(
    hive: &H,
    needle: &str,
    max_depth: u32,
) -> Vec<RegistryEntryRef> {
    find_entries_under(hive, &SEARCH_ROOTS, needle, max_depth)
}

/// 任意のルート集合から検索（ルートの深さが0）
pub fn find_entries_under<H: RegistryHive + ?Sized>(
    hive: &H,
    roots: &[&str],
    needle: &str,
    max_depth: u32,
) -> Vec<RegistryEntryRef> {
    let mut found = Vec::new();
    if needle.is_empty() {
        return found;
    }
    for root in roots {
        search_key(hive, root, needle, 0, max_depth, &mut found);
    }
    found
}

fn search_key<H: RegistryHive + ?Sized>(
    hive: &H,
    path: &str,
    needle: &str,
    depth: u32,
    max_depth: u32,
    found: &mut Vec<RegistryEntryRef>,
) {
    if depth > max_depth {
        return;
    }

    // 値の取得に失敗したらキーごと読み飛ばす（権限不足/削除済み）
    let values = match hive.string_values(path) {
        Ok(v) => v,
        Err(_) => return,
    };
    for value in values {
        if contains_ignore_case(&value.data, needle) {
            found.push(RegistryEntryRef::new(path, value.name, value.data, value.kind));
        }
    }

    let subkeys = hive.subkeys(path).unwrap_or_default();
    for sub in subkeys {
        let child = join_key_path(path, &sub);
        search_key(hive, &child, needle, depth + 1, max_depth, found);
    }
}
