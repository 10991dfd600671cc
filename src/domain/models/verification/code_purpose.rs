use std::fmt;

/// 이메일 인증 코드의 용도
///
/// 용도별로 Redis 키와 메일 본문이 분리되므로 회원가입 코드로 로그인할 수 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    Register,
    Login,
}

impl CodePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Register => "register",
            CodePurpose::Login => "login",
        }
    }
}

impl fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_strings() {
        assert_eq!(CodePurpose::Register.to_string(), "register");
        assert_eq!(CodePurpose::Login.as_str(), "login");
    }
}
