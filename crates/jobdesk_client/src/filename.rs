use std::fmt::Write;

use sha2::{Digest, Sha256};

const MAX_STEM_CHARS: usize = 80;

/// Name for an exported copy of a file's content:
/// `{stem}.{mode}--{short_hash(file_id, filename)}.{extension}`.
///
/// Stable for the same file and mode, so a second export overwrites the first.
pub fn export_filename(file_id: u64, filename: &str, mode: &str, extension: &str) -> String {
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(filename);
    let stem = sanitize(stem);
    let mode = sanitize(&mode.to_ascii_lowercase());
    let extension = extension.trim_start_matches('.');
    let extension = if extension.is_empty() { "txt" } else { extension };
    let hash = short_hash(&format!("{file_id}:{filename}"));
    format!("{stem}.{mode}--{hash}.{extension}")
}

fn sanitize(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    for c in input.chars() {
        let c = if is_forbidden(c) { '_' } else { c };
        // Runs of replacements collapse into one underscore.
        if c == '_' && cleaned.ends_with('_') {
            continue;
        }
        cleaned.push(c);
    }
    let mut name: String = cleaned
        .trim_matches(['_', ' ', '.'])
        .chars()
        .take(MAX_STEM_CHARS)
        .collect();
    if name.is_empty() {
        name.push_str("untitled");
    }
    if is_reserved_windows_name(&name) {
        name.push('_');
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}')
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|reserved| reserved.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().take(4).fold(String::with_capacity(8), |mut hex, byte| {
        let _ = write!(hex, "{byte:02x}");
        hex
    })
}
