use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

/// 用户名校验：长度 1..=max_len，只允许字母、数字、下划线、点或连字符
pub fn validate_username(username: &str, max_len: usize) -> Result<(), String> {
    if username.is_empty() || username.chars().count() > max_len {
        return Err(format!(
            "Username length must be between 1 and {max_len} characters"
        ));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must contain only letters, numbers, dots, underscores or hyphens".into(),
        );
    }
    Ok(())
}

/// 邮箱校验：格式 + 长度
pub fn validate_email(email: &str, max_len: usize) -> Result<(), String> {
    if email.chars().count() > max_len {
        return Err(format!("Email must be at most {max_len} characters"));
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid".into());
    }
    Ok(())
}
