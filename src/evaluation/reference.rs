//! 历史评分样例
//!
//! 从 JSONL 文件加载教师以往的评分，按关键词重合度挑选相近样例放入提示词。

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::Result;
use crate::models::evaluation::entities::ReferenceStats;
use crate::utils::{round2, truncate_chars};

/// 样例代码在提示词中的最大字符数
const EXAMPLE_CODE_LIMIT: usize = 800;

/// 不参与匹配的常见关键字
const STOPWORDS: &[&str] = &[
    "using", "public", "private", "class", "void", "static", "string", "return", "this", "null",
    "true", "false",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferenceExample {
    #[serde(alias = "codigo", default)]
    pub code: String,
    #[serde(alias = "rubrica", default)]
    pub rubric: BTreeMap<String, Value>,
    #[serde(alias = "puntaje_total", default)]
    pub total_score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl ReferenceExample {
    fn rubric_value(&self, keys: &[&str]) -> String {
        keys.iter()
            .find_map(|k| self.rubric.get(*k))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    examples: Vec<ReferenceExample>,
}

impl ReferenceSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_examples(examples: Vec<ReferenceExample>) -> Self {
        Self { examples }
    }

    /// 加载 JSONL；路径为空或文件不存在时返回空集合
    pub fn load(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Ok(Self::empty());
        }
        if !Path::new(path).exists() {
            warn!("Reference dataset not found at {}, continuing without examples", path);
            return Ok(Self::empty());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse_jsonl(&content))
    }

    /// 无法解析的行会被跳过
    pub fn parse_jsonl(content: &str) -> Self {
        let mut examples = Vec::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<ReferenceExample>(line) {
                Ok(example) => examples.push(example),
                Err(e) => warn!("Skipping reference line {}: {}", number + 1, e),
            }
        }
        info!("Loaded {} reference evaluations", examples.len());
        Self { examples }
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// 按关键词命中数取前 `limit` 个样例，至少命中一次
    pub fn search(&self, code: &str, limit: usize) -> Vec<&ReferenceExample> {
        if self.examples.is_empty() || limit == 0 {
            return Vec::new();
        }

        let lowered = code.to_lowercase();
        let keywords: HashSet<&str> = lowered
            .split_whitespace()
            .filter(|w| w.chars().count() > 3 && !STOPWORDS.contains(w))
            .collect();

        let mut scored: Vec<(usize, &ReferenceExample)> = self
            .examples
            .iter()
            .map(|example| {
                let haystack = example.code.to_lowercase();
                let hits = keywords.iter().filter(|k| haystack.contains(**k)).count();
                (hits, example)
            })
            .collect();
        // 稳定排序，命中数相同时保持文件顺序
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(limit)
            .filter(|(hits, _)| *hits > 0)
            .map(|(_, example)| example)
            .collect()
    }

    /// 格式化为提示词片段
    pub fn format_for_prompt(examples: &[&ReferenceExample]) -> String {
        if examples.is_empty() {
            return String::new();
        }

        let mut text = String::from("Previous evaluations by the instructor (grade with the same criteria):\n\n");
        for (index, example) in examples.iter().enumerate() {
            let total = example
                .total_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            let mut code = truncate_chars(&example.code, EXAMPLE_CODE_LIMIT).to_string();
            if code.len() < example.code.len() {
                code.push_str("\n// ... (truncated)");
            }

            let _ = write!(
                text,
                "### Example {}: total {}/20\n\
                 - comprehension: {}/5\n\
                 - design: {}/5\n\
                 - implementation: {}/5\n\
                 - functionality: {}/5\n\
                 Instructor feedback:\n{}\n\
                 Code excerpt:\n```\n{}\n```\n---\n",
                index + 1,
                total,
                example.rubric_value(&["comprehension", "comprension"]),
                example.rubric_value(&["design", "diseno"]),
                example.rubric_value(&["implementation", "implementacion"]),
                example.rubric_value(&["functionality", "funcionalidad"]),
                example.feedback.as_deref().unwrap_or("No feedback"),
                code,
            );
        }
        text.push_str("\nGrade the new code consistently with the examples above.\n");
        text
    }

    pub fn stats(&self) -> ReferenceStats {
        if self.examples.is_empty() {
            return ReferenceStats::default();
        }

        let scores: Vec<f64> = self
            .examples
            .iter()
            .map(|e| e.total_score.unwrap_or(0.0))
            .collect();
        let sum: f64 = scores.iter().sum();
        ReferenceStats {
            total: scores.len(),
            loaded: true,
            average: round2(sum / scores.len() as f64),
            min: scores.iter().copied().fold(f64::INFINITY, f64::min),
            max: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}
