//! 규칙 제외 -- 적용 범위 정규화, 피드백 초안, 지시문 생성
//!
//! # 흐름
//!
//! ```text
//! FalsePositiveFeedback -> SuggestionScanner -> ExclusionDraft -> RuleExclusion -> DirectiveBuilder
//!        (제안 문구)          (후보 추출)         (폼 초안)         (저장 형태)       (SecLang)
//! ```

pub mod directive;
pub mod draft;
pub mod scope;

pub use directive::{DirectiveBuilder, RuleExclusion};
pub use draft::{
    DraftOptions, ExclusionDraft, FalsePositiveFeedback, FeedbackStatus, draft_exclusions,
};
pub use scope::ExclusionScope;
