//! 스캐너 설정 -- core 설정에서 파생
//!
//! [`ScannerConfig`]는 `logflux-core`의 [`FeedbackConfig`](logflux_core::config::FeedbackConfig)에서
//! 생성되며, 제안 문구 스캐너가 사용하는 옵션을 담습니다.
//!
//! # 사용 예시
//! ```ignore
//! let core_config = LogfluxConfig::load("logflux.toml").await?;
//! let scanner_config = ScannerConfig::from_core(&core_config.feedback);
//! let scanner = SuggestionScanner::new(&scanner_config)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;

/// 기본 제안 문구 최대 크기 (64 KiB)
pub const DEFAULT_MAX_SUGGESTION_BYTES: usize = 64 * 1024;

/// 제안 문구 스캐너 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// 키워드 없이 등장하는 5~7자리 숫자를 규칙 ID로 간주할지 여부
    pub fallback_numeric_scan: bool,
    /// 스캔을 허용하는 제안 문구 최대 크기 (바이트)
    pub max_suggestion_bytes: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            fallback_numeric_scan: true,
            max_suggestion_bytes: DEFAULT_MAX_SUGGESTION_BYTES,
        }
    }
}

impl ScannerConfig {
    /// core 설정에서 스캐너 설정을 생성합니다.
    pub fn from_core(core: &logflux_core::config::FeedbackConfig) -> Self {
        Self {
            fallback_numeric_scan: core.fallback_numeric_scan,
            max_suggestion_bytes: core.max_suggestion_bytes,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), FeedbackError> {
        if self.max_suggestion_bytes == 0 {
            return Err(FeedbackError::Config {
                field: "max_suggestion_bytes".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }
        Ok(())
    }

    /// 제안 문구 크기가 허용 범위인지 확인합니다.
    ///
    /// 스캔 자체는 입력 크기와 무관하게 동작하므로, 외부 입력을 받는 호출자가
    /// 스캔 전에 사용합니다.
    pub fn check_size(&self, suggestion: &str) -> Result<(), FeedbackError> {
        let size = suggestion.len();
        if size > self.max_suggestion_bytes {
            return Err(FeedbackError::SuggestionTooLarge {
                size,
                max: self.max_suggestion_bytes,
            });
        }
        Ok(())
    }
}
