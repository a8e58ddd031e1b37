//! 从提交的 zip 包中提取源代码文本

use std::io::{Cursor, Read};

use tracing::{debug, warn};

use crate::config::EvaluationConfig;
use crate::errors::{CodeMentorError, Result};
use crate::utils::file_extension;

/// 压缩包中没有任何源文件时送去评测的占位程序
pub const PLACEHOLDER_PROGRAM: &str = r#"// Sample code file
public class Program {
    public static void Main() {
        System.Console.WriteLine("Hello World");
    }
}
"#;

/// 提取结果
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedCode {
    /// 所有源文件拼接后的文本
    pub code: String,
    pub files: Vec<String>,
    /// 有源文件因超出解压总量上限被跳过
    pub truncated: bool,
}

impl ExtractedCode {
    /// 没有提取到任何源文件
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// 提取压缩包内的源文件
///
/// 放不进剩余额度的文件会被跳过，后面较小的文件仍会继续提取。
pub fn extract_source_code(data: &[u8], config: &EvaluationConfig) -> Result<ExtractedCode> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    if archive.len() > config.max_archive_entries {
        return Err(CodeMentorError::archive(format!(
            "压缩包条目过多: {} (上限 {})",
            archive.len(),
            config.max_archive_entries
        )));
    }

    let mut parts = Vec::new();
    let mut files = Vec::new();
    let mut budget = config.max_extracted_bytes;
    let mut truncated = false;

    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        if entry.enclosed_name().is_none() {
            warn!("Skipping unsafe archive entry: {}", name);
            continue;
        }

        let accepted = file_extension(&name)
            .is_some_and(|ext| config.source_extensions.iter().any(|e| *e == ext));
        if !accepted {
            continue;
        }

        if entry.size() > budget as u64 {
            debug!("Skipping {} ({} bytes), over extraction budget", name, entry.size());
            truncated = true;
            continue;
        }

        // 声明的大小不可信，多读一个字节再确认
        let mut raw = Vec::new();
        entry.take(budget as u64 + 1).read_to_end(&mut raw)?;
        if raw.len() > budget {
            debug!("Skipping {}, over extraction budget", name);
            truncated = true;
            continue;
        }
        budget -= raw.len();

        let content = String::from_utf8_lossy(&raw);
        debug!("Extracted {} ({} bytes)", name, raw.len());
        parts.push(format!("// File: {name}\n{content}\n"));
        files.push(name);
    }

    if truncated {
        warn!(
            "Archive exceeds {} extracted bytes, oversized files skipped",
            config.max_extracted_bytes
        );
    }

    Ok(ExtractedCode {
        code: parts.join("\n\n"),
        files,
        truncated,
    })
}

#[cfg(test)]
pub(crate) fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, SimpleFileOptions::default())
                .unwrap();
        } else {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_matching_sources_in_order() {
        let data = build_zip(&[
            ("src/", ""),
            ("src/Program.cs", "class Program {}"),
            ("README.md", "# ignored"),
            ("src/Account.cs", "class Account {}"),
        ]);
        let out = extract_source_code(&data, &EvaluationConfig::default()).unwrap();
        assert_eq!(out.files, vec!["src/Program.cs", "src/Account.cs"]);
        assert_eq!(
            out.code,
            "// File: src/Program.cs\nclass Program {}\n\n\n// File: src/Account.cs\nclass Account {}\n"
        );
        assert!(!out.truncated);
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let data = build_zip(&[("Main.CS", "x")]);
        let out = extract_source_code(&data, &EvaluationConfig::default()).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn test_no_sources_is_empty() {
        let data = build_zip(&[("notes.md", "hello"), ("img.png", "....")]);
        let out = extract_source_code(&data, &EvaluationConfig::default()).unwrap();
        assert!(out.is_empty());
        assert!(!out.truncated);
    }

    #[test]
    fn test_skips_traversal_entries() {
        let data = build_zip(&[("../evil.cs", "bad"), ("ok.cs", "good")]);
        let out = extract_source_code(&data, &EvaluationConfig::default()).unwrap();
        assert_eq!(out.files, vec!["ok.cs"]);
    }

    #[test]
    fn test_entry_limit() {
        let config = EvaluationConfig {
            max_archive_entries: 1,
            ..EvaluationConfig::default()
        };
        let data = build_zip(&[("a.cs", "a"), ("b.cs", "b")]);
        let err = extract_source_code(&data, &config).unwrap_err();
        assert_eq!(err.code(), "E012");
    }

    #[test]
    fn test_size_budget_truncates() {
        let config = EvaluationConfig {
            max_extracted_bytes: 5,
            ..EvaluationConfig::default()
        };
        let data = build_zip(&[("a.cs", "1234"), ("b.cs", "5678")]);
        let out = extract_source_code(&data, &config).unwrap();
        assert_eq!(out.files, vec!["a.cs"]);
        assert!(out.truncated);
    }

    #[test]
    fn test_oversized_entry_does_not_hide_later_sources() {
        let config = EvaluationConfig {
            max_extracted_bytes: 64,
            ..EvaluationConfig::default()
        };
        let big = "x".repeat(200);
        let data = build_zip(&[("data.txt", big.as_str()), ("Program.cs", "class P{}")]);
        let out = extract_source_code(&data, &config).unwrap();
        assert_eq!(out.files, vec!["Program.cs"]);
        assert_eq!(out.code, "// File: Program.cs\nclass P{}\n");
        assert!(out.truncated);
    }

    #[test]
    fn test_only_oversized_entries_reports_truncation() {
        let config = EvaluationConfig {
            max_extracted_bytes: 8,
            ..EvaluationConfig::default()
        };
        let data = build_zip(&[("data.txt", "0123456789abcdef")]);
        let out = extract_source_code(&data, &config).unwrap();
        assert!(out.is_empty());
        assert!(out.truncated);
    }

    #[test]
    fn test_invalid_archive_is_error() {
        let err = extract_source_code(b"not a zip", &EvaluationConfig::default()).unwrap_err();
        assert_eq!(err.code(), "E012");
    }
}
