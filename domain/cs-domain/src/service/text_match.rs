//! 大文字小文字を無視した部分文字列の検索/置換
//!
//! 文字単位で比較するため、マッチ範囲は常に元文字列の文字境界に一致する。

/// `needle` が含まれるか（空の `needle` は一致しない）
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    find_ignore_case(haystack, needle).is_some()
}

/// 最初の一致範囲（バイトオフセット）
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    find_from(haystack, needle, 0)
}

/// 全体が大文字小文字を無視して等しいか
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    match_len_at(a, b) == Some(a.len())
}

/// 一致箇所をすべて `replacement` に置き換える。前後の文字列はそのまま残す。
pub fn replace_ignore_case(haystack: &str, needle: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut cursor = 0;
    while let Some((start, end)) = find_from(haystack, needle, cursor) {
        out.push_str(&haystack[cursor..start]);
        out.push_str(replacement);
        cursor = end;
    }
    out.push_str(&haystack[cursor..]);
    out
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<(usize, usize)> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    let rest = &haystack[from..];
    rest.char_indices().find_map(|(i, _)| {
        match_len_at(&rest[i..], needle).map(|len| (from + i, from + i + len))
    })
}

/// 先頭が `needle` に一致すれば、消費したバイト数を返す
fn match_len_at(haystack: &str, needle: &str) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for n in needle.chars() {
        let (_, h) = chars.next()?;
        if !chars_eq_ignore_case(h, n) {
            return None;
        }
    }
    Some(chars.next().map(|(i, _)| i).unwrap_or(haystack.len()))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
