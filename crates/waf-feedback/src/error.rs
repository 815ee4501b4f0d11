//! WAF 피드백 에러 타입
//!
//! [`FeedbackError`]는 규칙 제외 초안/지시문 생성과 스캐너 구성 중 발생하는
//! 에러를 표현합니다. 제안 문구 스캔 자체는 실패하지 않으며 (빈 결과로 표현),
//! 이 타입은 보조 경로에서만 사용됩니다.
//!
//! `From<FeedbackError> for LogfluxError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use logflux_core::error::{LogfluxError, PolicyError};

/// WAF 피드백 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    /// 알 수 없는 적용 범위
    #[error("invalid policy scope type: {0}")]
    InvalidScope(String),

    /// 알 수 없는 제거 방식
    #[error("invalid policy remove type: {0}")]
    InvalidRemoveType(String),

    /// 허용되지 않는 HTTP 메서드
    #[error("invalid policy method: {0}")]
    InvalidMethod(String),

    /// 범위에 필요한 필드 누락 (site → host, route → path)
    #[error("{scope} scope requires {field}")]
    MissingScopeField {
        /// 적용 범위
        scope: String,
        /// 누락된 필드명
        field: String,
    },

    /// 제거 대상 값이 비어 있음
    #[error("remove value is required")]
    EmptyRemoveValue,

    /// 제안 문구가 허용 크기를 초과
    #[error("suggestion too large: {size} bytes (max: {max})")]
    SuggestionTooLarge {
        /// 입력 크기
        size: usize,
        /// 허용 최대 크기
        max: usize,
    },

    /// 피드백 레코드 JSON 역직렬화 실패
    #[error("invalid feedback payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 정규식 컴파일 에러
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl From<FeedbackError> for LogfluxError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::SuggestionTooLarge { .. } => {
                LogfluxError::Policy(PolicyError::SuggestionRejected(err.to_string()))
            }
            other => LogfluxError::Policy(PolicyError::InvalidExclusion(other.to_string())),
        }
    }
}
