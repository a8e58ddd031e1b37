//! 提示词模板

use std::fmt::Write;

use crate::models::assignments::entities::{CRITERIA, Rubric, criterion_max};
use crate::utils::truncate_chars;

/// 代码评测提示词
///
/// 模型需要只返回 JSON，包含每个维度的 `{criterion}_score` 与 `{criterion}_feedback`。
pub fn evaluation_prompt(
    code: &str,
    requirements: &str,
    rubric: &Rubric,
    reference_examples: &str,
    code_limit: usize,
    requirements_limit: usize,
) -> String {
    let mut prompt = String::from(
        "You are a programming instructor grading a student team project.\n\
         Rate the code on each criterion below.\n\n\
         Criteria:\n",
    );

    for criterion in CRITERIA {
        let max = criterion_max(rubric, criterion);
        let description = rubric
            .get(criterion)
            .map(|c| c.criteria.as_str())
            .filter(|d| !d.is_empty())
            .unwrap_or("No description");
        let _ = writeln!(prompt, "- {criterion} (0-{max}): {description}");
    }

    if !reference_examples.is_empty() {
        prompt.push('\n');
        prompt.push_str(reference_examples);
    }

    prompt.push_str("\nRespond ONLY with a JSON object of this shape:\n{\n");
    let fields: Vec<String> = CRITERIA
        .iter()
        .map(|c| format!("  \"{c}_score\": <number>"))
        .chain(CRITERIA.iter().map(|c| format!("  \"{c}_feedback\": \"<text>\"")))
        .collect();
    prompt.push_str(&fields.join(",\n"));
    prompt.push_str("\n}\n\n");

    let _ = write!(
        prompt,
        "Requirements:\n{}\n\nCode to evaluate:\n{}\n\nONLY JSON, NO EXTRA TEXT:",
        truncate_chars(requirements, requirements_limit),
        truncate_chars(code, code_limit),
    );
    prompt
}

/// 视频讲解分析提示词，模型返回自由文本
pub fn video_prompt(transcript: &str, requirements: &str, requirements_limit: usize) -> String {
    format!(
        "Below is the transcript of a student team presenting their programming project.\n\
         Assess how well the team explains the design and implementation, whether the \
         explanation covers the assignment requirements, and how balanced the participation \
         seems. Give concise feedback with concrete suggestions.\n\n\
         Requirements:\n{}\n\nTranscript:\n{}\n",
        truncate_chars(requirements, requirements_limit),
        transcript
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::default_rubric;

    #[test]
    fn test_evaluation_prompt_contains_criteria_and_limits() {
        let code = "x".repeat(100);
        let prompt = evaluation_prompt(&code, "Build a bank", &default_rubric(), "", 10, 4);
        for c in CRITERIA {
            assert!(prompt.contains(&format!("- {c} (0-25)")));
            assert!(prompt.contains(&format!("\"{c}_score\"")));
            assert!(prompt.contains(&format!("\"{c}_feedback\"")));
        }
        assert!(prompt.contains("Code to evaluate:\nxxxxxxxxxx\n"));
        assert!(!prompt.contains(&"x".repeat(11)));
        assert!(prompt.contains("Requirements:\nBuil\n"));
        assert!(prompt.ends_with("ONLY JSON, NO EXTRA TEXT:"));
    }

    #[test]
    fn test_evaluation_prompt_includes_examples() {
        let prompt = evaluation_prompt("code", "", &default_rubric(), "EXAMPLES HERE", 100, 100);
        assert!(prompt.contains("EXAMPLES HERE"));
    }

    #[test]
    fn test_video_prompt() {
        let prompt = video_prompt("hola a todos", "requirements text", 8);
        assert!(prompt.contains("Transcript:\nhola a todos"));
        assert!(prompt.contains("Requirements:\nrequirem\n"));
    }
}
