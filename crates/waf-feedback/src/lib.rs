#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`candidate`]: 후보 키 코덱 및 순서 보존 중복 제거 집합
//! - [`suggestion`]: 자유 형식 제안 문구 스캐너
//! - [`selection`]: 페이지네이션 테이블의 페이지 간 선택 병합
//! - [`exclusion`]: 적용 범위 정규화, 피드백 초안, SecLang 지시문 생성
//! - [`config`]: 스캐너 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//! - [`whitespace`]: 브라우저(ECMAScript)와 같은 공백 판단
//!
//! # 아키텍처
//!
//! ```text
//! suggestion text -> SuggestionScanner -> Vec<ExclusionCandidate> -> ExclusionDraft -> DirectiveBuilder
//!                        |                                               |
//!                  tag/id/fallback passes                       scope inference + normalize
//! ```

pub mod candidate;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod selection;
pub mod suggestion;
pub mod whitespace;

// --- 주요 타입 re-export ---

// 후보 키
pub use candidate::{CandidateSet, build_candidate_key, parse_candidate_key};

// 스캐너
pub use suggestion::{SuggestionScanner, collect_exclusion_candidates, parse_exclusion_candidate};

// 선택 병합
pub use selection::{CrossPageSelection, RowKey, merge_checked_row_keys};

// 규칙 제외
pub use exclusion::{
    DirectiveBuilder, DraftOptions, ExclusionDraft, ExclusionScope, FalsePositiveFeedback,
    FeedbackStatus, RuleExclusion, draft_exclusions,
};

// 설정
pub use config::ScannerConfig;

// 에러
pub use error::FeedbackError;
