use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 学号、教学班编号等字符串主键
static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,20}$").expect("Invalid code regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 校验字符串主键（1~20 位字母、数字、下划线或连字符）
pub fn validate_code(code: &str) -> Result<(), &'static str> {
    if !CODE_RE.is_match(code) {
        return Err("Identifier must be 1-20 letters, digits, underscores or hyphens");
    }
    Ok(())
}

/// 校验单项分数在 [0, 5] 内
pub fn validate_criterion_score(score: f64) -> Result<(), &'static str> {
    if !score.is_finite() || !(0.0..=5.0).contains(&score) {
        return Err("Score must be between 0 and 5");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("student@uni.edu").is_ok());
        assert!(validate_email("a.b+c@mail.example.org").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("x@y").is_err());
    }

    #[test]
    fn test_validate_code() {
        assert!(validate_code("SEC001").is_ok());
        assert!(validate_code("EST-001_a").is_ok());
        assert!(validate_code("").is_err());
        assert!(validate_code("has space").is_err());
        assert!(validate_code("ABCDEFGHIJKLMNOPQRSTU").is_err());
    }

    #[test]
    fn test_validate_criterion_score() {
        assert!(validate_criterion_score(0.0).is_ok());
        assert!(validate_criterion_score(5.0).is_ok());
        assert!(validate_criterion_score(3.25).is_ok());
        assert!(validate_criterion_score(5.01).is_err());
        assert!(validate_criterion_score(-1.0).is_err());
        assert!(validate_criterion_score(f64::NAN).is_err());
    }
}
