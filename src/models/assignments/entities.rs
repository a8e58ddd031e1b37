use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 固定的四项评分维度
pub const CRITERIA: [&str; 4] = ["comprehension", "design", "implementation", "functionality"];

/// 每项维度默认满分
pub const DEFAULT_CRITERION_MAX: f64 = 25.0;

/// 评分细则中的单个维度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct RubricCriterion {
    pub max_score: f64,
    #[serde(default)]
    pub criteria: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// 评分细则：维度名 → 细则
pub type Rubric = BTreeMap<String, RubricCriterion>;

/// 默认评分细则
pub fn default_rubric() -> Rubric {
    let descriptions = [
        "Understanding of the problem and the requirements",
        "Structure, separation of responsibilities and OOP principles",
        "Code quality, conventions and readability",
        "The program works and fulfils the requirements",
    ];
    CRITERIA
        .iter()
        .zip(descriptions)
        .map(|(name, desc)| {
            (
                name.to_string(),
                RubricCriterion {
                    max_score: DEFAULT_CRITERION_MAX,
                    criteria: desc.to_string(),
                    weight: Some(0.25),
                },
            )
        })
        .collect()
}

/// 维度满分，缺失或非正数时回退为默认值
pub fn criterion_max(rubric: &Rubric, criterion: &str) -> f64 {
    rubric
        .get(criterion)
        .map(|c| c.max_score)
        .filter(|m| *m > 0.0)
        .unwrap_or(DEFAULT_CRITERION_MAX)
}

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub max_score: f64,
    pub requirements: Option<String>,
    pub rubric: Rubric,
    pub section_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rubric_has_all_criteria() {
        let rubric = default_rubric();
        for c in CRITERIA {
            assert_eq!(rubric[c].max_score, 25.0);
        }
    }

    #[test]
    fn test_criterion_max_fallback() {
        let mut rubric = Rubric::new();
        rubric.insert(
            "design".into(),
            RubricCriterion {
                max_score: 10.0,
                criteria: String::new(),
                weight: None,
            },
        );
        rubric.insert(
            "functionality".into(),
            RubricCriterion {
                max_score: 0.0,
                criteria: String::new(),
                weight: None,
            },
        );
        assert_eq!(criterion_max(&rubric, "design"), 10.0);
        assert_eq!(criterion_max(&rubric, "functionality"), 25.0);
        assert_eq!(criterion_max(&rubric, "comprehension"), 25.0);
    }
}
