/// 判定文件类型最多需要的头部字节数（AVI 需要 12 字节）
pub const MAGIC_HEADER_LEN: usize = 12;

/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `extension` - 文件扩展名（包含点号，如 ".zip"）
///
/// # Returns
/// * `true` - 魔术字节匹配
/// * `false` - 魔术字节不匹配或类型未知
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // 项目压缩包（空压缩包以 PK\x05\x06 开头）
        ".zip" => {
            data.starts_with(&[0x50, 0x4B, 0x03, 0x04]) || data.starts_with(&[0x50, 0x4B, 0x05, 0x06])
        }

        // ISO BMFF 容器，偏移 4 处为 "ftyp"
        ".mp4" | ".mov" | ".m4v" => data.len() >= 8 && &data[4..8] == b"ftyp",

        // Matroska / WebM 共用 EBML 头
        ".webm" | ".mkv" => data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]),

        ".avi" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"AVI ",

        _ => false,
    }
}

/// 取文件名的小写扩展名（含点号）
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_magic() {
        let zip_header = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00];
        assert!(validate_magic_bytes(&zip_header, ".zip"));
        assert!(validate_magic_bytes(&zip_header, ".ZIP"));
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x05, 0x06], ".zip"));
        assert!(!validate_magic_bytes(b"Rar!\x1a\x07", ".zip"));
    }

    #[test]
    fn test_mp4_magic() {
        let mp4_header = [0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert!(validate_magic_bytes(&mp4_header, ".mp4"));
        assert!(validate_magic_bytes(&mp4_header, ".mov"));
        assert!(!validate_magic_bytes(&mp4_header, ".webm"));
    }

    #[test]
    fn test_webm_magic() {
        let webm_header = [0x1A, 0x45, 0xDF, 0xA3, 0x9F];
        assert!(validate_magic_bytes(&webm_header, ".webm"));
        assert!(validate_magic_bytes(&webm_header, ".mkv"));
    }

    #[test]
    fn test_avi_magic() {
        let avi_header = b"RIFF\x00\x00\x00\x00AVI LIST";
        assert!(validate_magic_bytes(avi_header, ".avi"));
        assert!(!validate_magic_bytes(b"RIFF\x00\x00\x00\x00WAVE", ".avi"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], ".zip"));
    }

    #[test]
    fn test_unknown_extension() {
        assert!(!validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04], ".exe"));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("project.ZIP").as_deref(), Some(".zip"));
        assert_eq!(file_extension("a.b.mp4").as_deref(), Some(".mp4"));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension(".hidden"), None);
        assert_eq!(file_extension("trailing."), None);
    }
}
