//! 제안 문구 스캐너 -- 자유 형식 텍스트에서 규칙 제외 후보 추출
//!
//! 오탐 피드백의 제안 문구는 중국어/영어가 섞여 있고, 따옴표나 전각 구두점,
//! HTML 조각 같은 잡음을 포함할 수 있습니다. [`SuggestionScanner`]는
//! 정해진 순서의 정규식 패스를 차례로 적용하여 후보를 수집합니다.
//!
//! # 스캔 순서
//!
//! 1. 앞뒤 공백(BOM 포함) 제거 후 비어 있으면 빈 결과
//! 2. 연속 공백을 공백 하나로 정규화
//! 3. 태그 패스: `ruleRemoveByTag` 구문, 자연어 태그 표현
//! 4. ID 패스: `ruleRemoveById` 구문, 자연어 ID 표현 (3~7자리)
//! 5. 폴백: 단독으로 등장하는 5~7자리 숫자 (설정으로 끌 수 있음)
//!
//! 각 패스는 왼쪽에서 오른쪽으로 겹치지 않게 매칭하며, 결과는 처음 발견된
//! 순서를 유지한 채 중복이 제거됩니다.
//!
//! 스캔은 실패하지 않습니다. 후보가 없으면 빈 목록 또는
//! [`ExclusionCandidate::empty()`]를 반환합니다.

pub mod patterns;

use std::sync::LazyLock;

use regex::Regex;

use logflux_core::types::{ExclusionCandidate, RemoveType};

use crate::candidate::CandidateSet;
use crate::config::ScannerConfig;
use crate::error::FeedbackError;
use crate::whitespace::trim_js;

/// 내장 패턴과 기본 설정으로 만든 프로세스 공용 스캐너
static SHARED_SCANNER: LazyLock<SuggestionScanner> = LazyLock::new(|| {
    SuggestionScanner::new(&ScannerConfig::default())
        .expect("built-in suggestion patterns must compile")
});

/// 하나의 스캔 패스: 매칭 결과를 어떤 제거 방식으로 수집할지와 정규식
#[derive(Debug, Clone)]
struct ScanPass {
    remove_type: RemoveType,
    pattern: Regex,
}

/// 제안 문구 스캐너
///
/// 정규식은 생성 시 한 번만 컴파일합니다. 스캐너는 불변이므로
/// 여러 스레드에서 동시에 사용할 수 있습니다.
#[derive(Debug, Clone)]
pub struct SuggestionScanner {
    passes: Vec<ScanPass>,
    /// 폴백 숫자 스캔용 ASCII 단어 토큰 패턴 (비활성화 시 `None`)
    fallback: Option<Regex>,
    whitespace: Regex,
}

impl SuggestionScanner {
    /// 설정으로 스캐너를 생성합니다.
    pub fn new(config: &ScannerConfig) -> Result<Self, FeedbackError> {
        config.validate()?;

        let mut passes = Vec::new();
        for (remove_type, pattern) in patterns::builtin_passes() {
            passes.push(ScanPass {
                remove_type,
                pattern: Regex::new(&pattern)?,
            });
        }

        let fallback = if config.fallback_numeric_scan {
            Some(Regex::new(patterns::ASCII_WORD_PATTERN)?)
        } else {
            None
        };

        Ok(Self {
            passes,
            fallback,
            whitespace: Regex::new(&patterns::whitespace_run())?,
        })
    }

    /// 기본 설정의 공용 스캐너를 반환합니다.
    pub fn shared() -> &'static Self {
        &SHARED_SCANNER
    }

    /// 폴백 숫자 스캔 활성화 여부
    pub fn fallback_enabled(&self) -> bool {
        self.fallback.is_some()
    }

    /// 제안 문구에서 규칙 제외 후보를 모두 수집합니다.
    ///
    /// 결과는 처음 매칭된 순서를 유지하며 `(remove_type, remove_value)` 쌍마다
    /// 최대 한 번만 등장합니다.
    pub fn collect(&self, suggestion: &str) -> Vec<ExclusionCandidate> {
        let trimmed = trim_suggestion(suggestion);
        if trimmed.is_empty() {
            return Vec::new();
        }

        let normalized = self.whitespace.replace_all(trimmed, " ");
        let mut candidates = CandidateSet::new();

        for pass in &self.passes {
            for caps in pass.pattern.captures_iter(&normalized) {
                if let Some(value) = caps.get(1) {
                    candidates.insert(pass.remove_type, value.as_str());
                }
            }
        }

        if let Some(word) = &self.fallback {
            for token in word.find_iter(&normalized) {
                let token = token.as_str();
                if is_fallback_rule_id(token) {
                    candidates.insert(RemoveType::Id, token);
                }
            }
        }

        candidates.into_vec()
    }

    /// 첫 번째 후보만 반환합니다.
    pub fn first(&self, suggestion: &str) -> Option<ExclusionCandidate> {
        self.collect(suggestion).into_iter().next()
    }
}

/// 공용 스캐너로 후보를 모두 수집합니다.
pub fn collect_exclusion_candidates(suggestion: &str) -> Vec<ExclusionCandidate> {
    SuggestionScanner::shared().collect(suggestion)
}

/// 공용 스캐너로 첫 번째 후보를 반환합니다.
///
/// 후보가 없으면 `(id, "")` 형태의 [`ExclusionCandidate::empty()`]를 반환합니다.
pub fn parse_exclusion_candidate(suggestion: &str) -> ExclusionCandidate {
    SuggestionScanner::shared()
        .first(suggestion)
        .unwrap_or_else(ExclusionCandidate::empty)
}

fn trim_suggestion(suggestion: &str) -> &str {
    trim_js(suggestion)
}

/// ASCII 단어 토큰 전체가 5~7자리 숫자인지 확인합니다.
fn is_fallback_rule_id(token: &str) -> bool {
    patterns::FALLBACK_ID_DIGITS.contains(&token.len())
        && token.bytes().all(|b| b.is_ascii_digit())
}
