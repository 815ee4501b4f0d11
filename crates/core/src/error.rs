//! 에러 타입 -- 도메인별 에러 정의

/// LogFlux 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LogfluxError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 규칙 제외 정책 에러
    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 규칙 제외 정책 에러
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// 규칙 제외 항목이 유효하지 않음 (범위, 제거 방식, 값 등)
    #[error("invalid rule exclusion: {0}")]
    InvalidExclusion(String),

    /// 처리할 수 없는 제안 문구 (크기 초과 등)
    #[error("suggestion rejected: {0}")]
    SuggestionRejected(String),
}
