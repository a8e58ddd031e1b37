//! 模型输出解析与分数换算

use serde_json::{Map, Value};

use crate::errors::{CodeMentorError, Result};
use crate::models::assignments::entities::{CRITERIA, Rubric, criterion_max};
use crate::models::feedback::entities::CriterionFeedback;
use crate::models::grades::entities::CriterionScores;
use crate::utils::round2;

/// 解析失败或调用失败时每个维度的分数
pub const FALLBACK_SCORE: f64 = 3.0;

pub const GENERAL_COMMENT: &str = "Evaluated automatically by AI";

/// 模型给出的原始分数（尚未换算）
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvaluation {
    pub scores: [f64; 4],
    pub feedback: CriterionFeedback,
}

impl RawEvaluation {
    pub fn fallback() -> Self {
        Self {
            scores: [FALLBACK_SCORE; 4],
            feedback: CriterionFeedback {
                comprehension: "The submission was received. A manual review is needed for a \
                                detailed assessment because automatic evaluation was not available."
                    .into(),
                design: "A basic structure is present. Review the architecture and the \
                         separation of responsibilities following OOP principles."
                    .into(),
                implementation: "The implementation is present. Review the language conventions \
                                 to improve readability."
                    .into(),
                functionality: "Manual verification is needed to confirm the functional \
                                requirements are met."
                    .into(),
            },
        }
    }

    /// 换算到 0–5 分
    pub fn scaled(&self, rubric: &Rubric) -> CriterionScores {
        let [c, d, i, f] = std::array::from_fn(|n| {
            scale_to_5(self.scores[n], criterion_max(rubric, CRITERIA[n]))
        });
        CriterionScores {
            comprehension: c,
            design: d,
            implementation: i,
            functionality: f,
        }
    }
}

/// 从模型回复中解析评分 JSON
///
/// 取第一个 `{` 到最后一个 `}` 之间的内容，四个 `_score` 字段必须都存在。
pub fn parse_evaluation(text: &str) -> Result<RawEvaluation> {
    let text = text.trim();
    let json_text = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    };

    let value: Value = serde_json::from_str(json_text)?;
    let object = value
        .as_object()
        .ok_or_else(|| CodeMentorError::validation("模型回复不是 JSON 对象"))?;

    let mut scores = [0.0; 4];
    for (slot, criterion) in scores.iter_mut().zip(CRITERIA) {
        let field = format!("{criterion}_score");
        *slot = object
            .get(&field)
            .and_then(number_of)
            .ok_or_else(|| CodeMentorError::validation(format!("模型回复缺少字段 {field}")))?;
    }

    Ok(RawEvaluation {
        scores,
        feedback: CriterionFeedback {
            comprehension: feedback_of(object, "comprehension", "Good understanding"),
            design: feedback_of(object, "design", "Clean design"),
            implementation: feedback_of(object, "implementation", "Well implemented"),
            functionality: feedback_of(object, "functionality", "Works correctly"),
        },
    })
}

/// 大于 5 的分数视为按维度满分打分，按比例换算；结果限制在 [0, 5]
pub fn scale_to_5(score: f64, criterion_max: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    let scaled = if score > 5.0 {
        score * 5.0 / criterion_max
    } else {
        score
    };
    round2(scaled.clamp(0.0, 5.0))
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn feedback_of(object: &Map<String, Value>, criterion: &str, default: &str) -> String {
    object
        .get(&format!("{criterion}_feedback"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::{RubricCriterion, default_rubric};

    #[test]
    fn test_parse_json_wrapped_in_prose() {
        let reply = r#"Sure! Here is the result:
{"comprehension_score": 20, "design_score": "18", "implementation_score": 22.5,
 "functionality_score": 4, "design_feedback": "Nice layering"}
Hope it helps."#;
        let raw = parse_evaluation(reply).unwrap();
        assert_eq!(raw.scores, [20.0, 18.0, 22.5, 4.0]);
        assert_eq!(raw.feedback.design, "Nice layering");
        assert_eq!(raw.feedback.comprehension, "Good understanding");
    }

    #[test]
    fn test_parse_missing_score_fails() {
        let reply = r#"{"comprehension_score": 4, "design_score": 4, "implementation_score": 4}"#;
        let err = parse_evaluation(reply).unwrap_err();
        assert!(err.message().contains("functionality_score"));
    }

    #[test]
    fn test_parse_non_json_fails() {
        assert!(parse_evaluation("I cannot grade this").is_err());
        assert!(parse_evaluation("} nope {").is_err());
    }

    #[test]
    fn test_scale_to_5() {
        assert_eq!(scale_to_5(20.0, 25.0), 4.0);
        assert_eq!(scale_to_5(4.5, 25.0), 4.5);
        assert_eq!(scale_to_5(5.0, 25.0), 5.0);
        assert_eq!(scale_to_5(-2.0, 25.0), 0.0);
        assert_eq!(scale_to_5(40.0, 25.0), 5.0);
        assert_eq!(scale_to_5(7.0, 10.0), 3.5);
        assert_eq!(scale_to_5(f64::NAN, 25.0), 0.0);
        assert_eq!(scale_to_5(3.456, 25.0), 3.46);
    }

    #[test]
    fn test_scaled_uses_rubric_max() {
        let mut rubric = default_rubric();
        rubric.insert(
            "design".into(),
            RubricCriterion {
                max_score: 10.0,
                criteria: String::new(),
                weight: None,
            },
        );
        let raw = RawEvaluation {
            scores: [20.0, 8.0, 3.0, 25.0],
            feedback: CriterionFeedback::default(),
        };
        let scores = raw.scaled(&rubric);
        assert_eq!(scores.comprehension, 4.0);
        assert_eq!(scores.design, 4.0);
        assert_eq!(scores.implementation, 3.0);
        assert_eq!(scores.functionality, 5.0);
        assert_eq!(scores.total(), 16.0);
    }

    #[test]
    fn test_fallback_totals_twelve() {
        let scores = RawEvaluation::fallback().scaled(&default_rubric());
        assert_eq!(scores.total(), 12.0);
    }
}
