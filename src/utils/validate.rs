use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9._-]*$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 -]{5,18}[0-9]$").expect("Invalid phone regex"));

const SEXES: [&str; 2] = ["male", "female"];

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 3 <= 长度 <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    // 字母开头，只含字母、数字、点、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must start with a letter and contain only letters, numbers, '.', '_' or '-'",
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > 254 || !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

pub fn validate_sex(sex: &str) -> Result<(), &'static str> {
    if !SEXES.contains(&sex) {
        return Err("Sex must be 'male' or 'female'");
    }
    Ok(())
}

/// 密码策略：至少 8 个字符，同时包含字母与数字，且不在弱密码表中
///
/// 返回全部不满足的条目，以 `; ` 连接。
pub fn validate_password(password: &str) -> Result<(), String> {
    let mut problems: Vec<&str> = Vec::new();

    if password.chars().count() < 8 {
        problems.push("Password must be at least 8 characters long");
    }
    if password.chars().count() > 128 {
        problems.push("Password must be at most 128 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        problems.push("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Password must contain at least one digit");
    }

    const WEAK: [&str; 6] = [
        "password1",
        "qwerty123",
        "admin123",
        "teacher123",
        "student123",
        "school123",
    ];
    if WEAK.iter().any(|weak| password.eq_ignore_ascii_case(weak)) {
        problems.push("Password is too common, please choose a stronger password");
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usernames() {
        assert!(validate_username("t.smith").is_ok());
        assert!(validate_username("student_01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("1student").is_err());
        assert!(validate_username("stu dent").is_err());
    }

    #[test]
    fn test_emails() {
        assert!(validate_email("parent@school.test").is_ok());
        assert!(validate_email("parent@school").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_phone_and_sex() {
        assert!(validate_phone("+44 20 7946 0958").is_ok());
        assert!(validate_phone("555-0100").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_sex("female").is_ok());
        assert!(validate_sex("Female").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Secure123").is_ok());
        assert!(validate_password("lowercase99").is_ok());

        let err = validate_password("short").unwrap_err();
        assert!(err.contains("at least 8 characters"));
        assert!(err.contains("at least one digit"));

        assert!(validate_password("12345678").unwrap_err().contains("letter"));
        assert!(validate_password("School123").unwrap_err().contains("too common"));
    }
}
