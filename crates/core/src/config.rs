//! 설정 관리 -- logflux.toml 파싱 및 런타임 설정
//!
//! [`LogfluxConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LOGFLUX_FEEDBACK_FALLBACK_NUMERIC_SCAN=false` 형식)
//! 3. 설정 파일 (`logflux.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), logflux_core::error::LogfluxError> {
//! use logflux_core::config::LogfluxConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LogfluxConfig::load("logflux.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LogfluxConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LogfluxError};

/// 제안 문구 최대 크기 상한 (1MB)
const MAX_SUGGESTION_BYTES_LIMIT: usize = 1024 * 1024;

/// 범위 지정 규칙 시작 ID 상한 (`i32::MAX`)
const MAX_SCOPED_RULE_ID_BASE: u64 = 2_147_483_647;

/// 범위 지정 규칙 ID 간격 상한
const MAX_SCOPED_RULE_ID_STEP: u64 = 1_000_000;

/// LogFlux 통합 설정
///
/// `logflux.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogfluxConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 오탐 피드백 제안 문구 스캐너 설정
    #[serde(default)]
    pub feedback: FeedbackConfig,
    /// 규칙 제외 초안/지시문 생성 설정
    #[serde(default)]
    pub exclusion: ExclusionConfig,
}

impl LogfluxConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogfluxError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일 없이 기본값 + 환경변수 오버라이드로 설정을 구성합니다.
    pub fn load_defaults() -> Result<Self, LogfluxError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LogfluxError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogfluxError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LogfluxError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LogfluxError> {
        toml::from_str(toml_str).map_err(|e| {
            LogfluxError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGFLUX_{SECTION}_{FIELD}`
    /// 예: `LOGFLUX_EXCLUSION_SCOPED_RULE_ID_BASE=980000`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LOGFLUX_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGFLUX_GENERAL_LOG_FORMAT");

        // Feedback
        override_bool(
            &mut self.feedback.fallback_numeric_scan,
            "LOGFLUX_FEEDBACK_FALLBACK_NUMERIC_SCAN",
        );
        override_usize(
            &mut self.feedback.max_suggestion_bytes,
            "LOGFLUX_FEEDBACK_MAX_SUGGESTION_BYTES",
        );

        // Exclusion
        override_u64(
            &mut self.exclusion.scoped_rule_id_base,
            "LOGFLUX_EXCLUSION_SCOPED_RULE_ID_BASE",
        );
        override_u64(
            &mut self.exclusion.scoped_rule_id_step,
            "LOGFLUX_EXCLUSION_SCOPED_RULE_ID_STEP",
        );
        override_string(
            &mut self.exclusion.name_prefix,
            "LOGFLUX_EXCLUSION_NAME_PREFIX",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogfluxError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.feedback.max_suggestion_bytes == 0
            || self.feedback.max_suggestion_bytes > MAX_SUGGESTION_BYTES_LIMIT
        {
            return Err(ConfigError::InvalidValue {
                field: "feedback.max_suggestion_bytes".to_owned(),
                reason: format!("must be between 1 and {MAX_SUGGESTION_BYTES_LIMIT}"),
            }
            .into());
        }

        if self.exclusion.scoped_rule_id_base == 0
            || self.exclusion.scoped_rule_id_base > MAX_SCOPED_RULE_ID_BASE
        {
            return Err(ConfigError::InvalidValue {
                field: "exclusion.scoped_rule_id_base".to_owned(),
                reason: format!("must be between 1 and {MAX_SCOPED_RULE_ID_BASE}"),
            }
            .into());
        }

        if self.exclusion.scoped_rule_id_step == 0
            || self.exclusion.scoped_rule_id_step > MAX_SCOPED_RULE_ID_STEP
        {
            return Err(ConfigError::InvalidValue {
                field: "exclusion.scoped_rule_id_step".to_owned(),
                reason: format!("must be between 1 and {MAX_SCOPED_RULE_ID_STEP}"),
            }
            .into());
        }

        if self.exclusion.name_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "exclusion.name_prefix".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 오탐 피드백 제안 문구 스캐너 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// 키워드 없이 등장한 5~7자리 숫자를 규칙 ID 후보로 수집할지 여부
    pub fallback_numeric_scan: bool,
    /// 처리할 제안 문구의 최대 크기 (바이트)
    pub max_suggestion_bytes: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            fallback_numeric_scan: true,
            max_suggestion_bytes: 64 * 1024, // 64KB
        }
    }
}

/// 규칙 제외 초안/지시문 생성 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// 범위 지정(site/route) 제외 규칙에 부여하는 첫 SecRule ID
    pub scoped_rule_id_base: u64,
    /// 범위 지정 제외 규칙마다 증가하는 ID 간격
    pub scoped_rule_id_step: u64,
    /// 초안 이름 접두어
    pub name_prefix: String,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            scoped_rule_id_base: 990_000,
            scoped_rule_id_step: 10,
            name_prefix: "fp-feedback".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_has_sane_values() {
        let config = LogfluxConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "json");
        assert!(config.feedback.fallback_numeric_scan);
        assert_eq!(config.feedback.max_suggestion_bytes, 65536);
        assert_eq!(config.exclusion.scoped_rule_id_base, 990_000);
        assert_eq!(config.exclusion.scoped_rule_id_step, 10);
        assert_eq!(config.exclusion.name_prefix, "fp-feedback");
    }

    #[test]
    fn default_config_passes_validation() {
        let config = LogfluxConfig::default();
        config.validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = LogfluxConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert!(config.feedback.fallback_numeric_scan);
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[general]
log_level = "debug"

[feedback]
fallback_numeric_scan = false
"#;
        let config = LogfluxConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_level, "debug");
        // log_format은 기본값 유지
        assert_eq!(config.general.log_format, "json");
        assert!(!config.feedback.fallback_numeric_scan);
        assert_eq!(config.feedback.max_suggestion_bytes, 65536);
        assert_eq!(config.exclusion.scoped_rule_id_base, 990_000);
    }

    #[test]
    fn from_str_full_toml() {
        let toml = r#"
[general]
log_level = "warn"
log_format = "pretty"

[feedback]
fallback_numeric_scan = false
max_suggestion_bytes = 4096

[exclusion]
scoped_rule_id_base = 980000
scoped_rule_id_step = 5
name_prefix = "waf-fp"
"#;
        let config = LogfluxConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.feedback.max_suggestion_bytes, 4096);
        assert_eq!(config.exclusion.scoped_rule_id_base, 980_000);
        assert_eq!(config.exclusion.scoped_rule_id_step, 5);
        assert_eq!(config.exclusion.name_prefix, "waf-fp");
        config.validate().unwrap();
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let result = LogfluxConfig::parse("invalid = [[[toml");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            LogfluxError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = LogfluxConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = LogfluxConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_zero_suggestion_limit() {
        let mut config = LogfluxConfig::default();
        config.feedback.max_suggestion_bytes = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_suggestion_bytes"));
    }

    #[test]
    fn validate_rejects_oversized_suggestion_limit() {
        let mut config = LogfluxConfig::default();
        config.feedback.max_suggestion_bytes = MAX_SUGGESTION_BYTES_LIMIT + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_rule_id_step() {
        let mut config = LogfluxConfig::default();
        config.exclusion.scoped_rule_id_step = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scoped_rule_id_step"));
    }

    #[test]
    fn validate_bounds_rule_id_base_and_step() {
        let mut config = LogfluxConfig::default();
        config.exclusion.scoped_rule_id_base = u64::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scoped_rule_id_base"));

        config.exclusion.scoped_rule_id_base = MAX_SCOPED_RULE_ID_BASE;
        config.exclusion.scoped_rule_id_step = MAX_SCOPED_RULE_ID_STEP;
        assert!(config.validate().is_ok());

        config.exclusion.scoped_rule_id_step = MAX_SCOPED_RULE_ID_STEP + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scoped_rule_id_step"));
    }

    #[test]
    fn validate_rejects_blank_name_prefix() {
        let mut config = LogfluxConfig::default();
        config.exclusion.name_prefix = "   ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("name_prefix"));
    }

    #[test]
    #[serial]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: serial 테스트에서만 환경변수를 조작합니다.
        unsafe { std::env::set_var("TEST_LOGFLUX_STR", "overridden") };
        override_string(&mut val, "TEST_LOGFLUX_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_LOGFLUX_STR") };
    }

    #[test]
    #[serial]
    fn env_override_bool_invalid_keeps_original() {
        let mut val = true;
        // SAFETY: serial 테스트에서만 환경변수를 조작합니다.
        unsafe { std::env::set_var("TEST_LOGFLUX_BOOL_BAD", "not-a-bool") };
        override_bool(&mut val, "TEST_LOGFLUX_BOOL_BAD");
        assert!(val); // 원래 값 유지
        unsafe { std::env::remove_var("TEST_LOGFLUX_BOOL_BAD") };
    }

    #[test]
    #[serial]
    fn env_override_u64_valid() {
        let mut val = 1_u64;
        // SAFETY: serial 테스트에서만 환경변수를 조작합니다.
        unsafe { std::env::set_var("TEST_LOGFLUX_U64", "980000") };
        override_u64(&mut val, "TEST_LOGFLUX_U64");
        assert_eq!(val, 980_000);
        unsafe { std::env::remove_var("TEST_LOGFLUX_U64") };
    }

    #[test]
    #[serial]
    fn apply_env_overrides_updates_sections() {
        // SAFETY: serial 테스트에서만 환경변수를 조작합니다.
        unsafe {
            std::env::set_var("LOGFLUX_FEEDBACK_FALLBACK_NUMERIC_SCAN", "false");
            std::env::set_var("LOGFLUX_EXCLUSION_NAME_PREFIX", "env-prefix");
        }
        let mut config = LogfluxConfig::default();
        config.apply_env_overrides();
        unsafe {
            std::env::remove_var("LOGFLUX_FEEDBACK_FALLBACK_NUMERIC_SCAN");
            std::env::remove_var("LOGFLUX_EXCLUSION_NAME_PREFIX");
        }
        assert!(!config.feedback.fallback_numeric_scan);
        assert_eq!(config.exclusion.name_prefix, "env-prefix");
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_LOGFLUX_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = LogfluxConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = LogfluxConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(
            config.exclusion.scoped_rule_id_base,
            parsed.exclusion.scoped_rule_id_base
        );
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let result = LogfluxConfig::from_file("/nonexistent/path/logflux.toml").await;
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            LogfluxError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
