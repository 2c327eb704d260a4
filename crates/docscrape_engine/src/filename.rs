use sha2::{Digest, Sha256};
use url::Url;

/// File name for a downloaded resource: the URL's final path segment, made safe
/// for every platform. `None` when the URL ends in a directory.
pub fn filename_from_url(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }
    Some(sanitize_component(last))
}

/// `{mode}_{timestamp}.csv`, e.g. `pep_2024-01-31_12-00-00.csv`.
pub fn results_filename(mode: &str, timestamp: &str) -> String {
    format!(
        "{}_{}.csv",
        sanitize_component(mode),
        sanitize_component(timestamp)
    )
}

const CACHE_KEY_BYTES: usize = 16;

/// Stable key for a URL, used to name cache entries.
pub fn cache_key(url: &str) -> String {
    hex_digest(url, CACHE_KEY_BYTES)
}

/// Whether `name` has the shape of a [`cache_key`].
pub(crate) fn is_cache_key(name: &str) -> bool {
    name.len() == CACHE_KEY_BYTES * 2
        && name
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn sanitize_component(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let mut cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if cleaned.is_empty() {
        cleaned = "untitled".to_string();
    }
    if is_reserved_windows_name(&cleaned) {
        cleaned.push('_');
    }
    cleaned
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn hex_digest(input: &str, bytes: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(bytes * 2);
    for byte in digest.iter().take(bytes) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
