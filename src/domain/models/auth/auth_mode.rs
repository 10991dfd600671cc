/// 인증 미들웨어의 동작 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 유효한 토큰이 없으면 401로 거부
    Strict,
    /// 토큰이 있으면 검증하고, 없거나 유효하지 않으면 사용자 없이 통과
    Lenient,
}
