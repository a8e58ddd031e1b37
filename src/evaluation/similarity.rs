use std::collections::HashSet;

use crate::utils::round2;

/// 余弦相似度，长度不同或存在零向量时为 0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// 以空白分词的 Jaccard 相似度
pub fn token_jaccard(a: &str, b: &str) -> f64 {
    let left: HashSet<&str> = a.split_whitespace().collect();
    let right: HashSet<&str> = b.split_whitespace().collect();

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    left.intersection(&right).count() as f64 / union as f64
}

/// 0–1 的相似度转为两位小数的百分比
pub fn as_percentage(similarity: f64) -> f64 {
    round2(similarity.clamp(0.0, 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_basic() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        let s = cosine_similarity(&[1.0, 1.0], &[1.0, 0.0]);
        assert!((s - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_token_jaccard() {
        assert_eq!(token_jaccard("a b c", "a b c"), 1.0);
        assert_eq!(token_jaccard("a b", "b c"), 1.0 / 3.0);
        assert_eq!(token_jaccard("", "   "), 0.0);
        assert_eq!(token_jaccard("a a a", "a"), 1.0);
    }

    #[test]
    fn test_as_percentage() {
        assert_eq!(as_percentage(0.876_54), 87.65);
        assert_eq!(as_percentage(1.000_001), 100.0);
        assert_eq!(as_percentage(-0.2), 0.0);
    }
}
