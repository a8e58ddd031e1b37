pub mod extractor;
pub mod file_magic;
pub mod parameter_error_handler;
pub mod sql;
pub mod validate;

pub use extractor::{SafeCode, SafeIDI64};
pub use file_magic::{MAGIC_HEADER_LEN, file_extension, validate_magic_bytes};
pub use parameter_error_handler::{json_error_handler, query_error_handler};
pub use sql::escape_like_pattern;

/// 四舍五入到两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 按字符数截断，不会切开多字节字符
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
