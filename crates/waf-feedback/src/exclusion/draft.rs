//! 오탐 피드백으로부터 규칙 제외 초안 생성
//!
//! 콘솔은 오탐 피드백을 처리할 때 제안 문구에서 추출한 후보로 규칙 제외
//! 생성 폼을 미리 채웁니다. [`ExclusionDraft`]가 그 폼의 내용이며,
//! 적용 범위는 피드백이 가리키는 요청(host/path/method)에서 추론합니다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use logflux_core::types::{ExclusionCandidate, RemoveType};

use crate::error::FeedbackError;
use crate::exclusion::scope::ExclusionScope;
use crate::suggestion::SuggestionScanner;

/// 초안 이름 최대 길이 (문자 수)
pub const NAME_MAX_CHARS: usize = 120;

/// 초안 설명 최대 길이 (문자 수)
pub const DESCRIPTION_MAX_CHARS: usize = 255;

/// 피드백 처리 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    /// 접수됨
    #[default]
    Pending,
    /// 오탐으로 확인됨
    Confirmed,
    /// 처리 완료
    Resolved,
}

fn default_block_status() -> u16 {
    403
}

/// 오탐 피드백 레코드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FalsePositiveFeedback {
    pub id: u64,
    /// 0은 전역/미지정 정책
    #[serde(default)]
    pub policy_id: u64,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub method: String,
    /// 차단 시 응답 상태 코드
    #[serde(default = "default_block_status")]
    pub status: u16,
    #[serde(default)]
    pub feedback_status: FeedbackStatus,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub sample_uri: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub process_note: String,
}

impl FalsePositiveFeedback {
    /// 단일 레코드 또는 레코드 배열 형태의 JSON을 읽습니다.
    pub fn parse_batch(json: &str) -> Result<Vec<Self>, FeedbackError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Batch {
            Many(Vec<FalsePositiveFeedback>),
            One(Box<FalsePositiveFeedback>),
        }

        match serde_json::from_str::<Batch>(json) {
            Ok(Batch::Many(items)) => Ok(items),
            Ok(Batch::One(item)) => Ok(vec![*item]),
            // untagged 에러 메시지는 정보가 없으므로 단일 레코드로 다시 파싱하여 원인을 보고
            Err(_) => Ok(vec![serde_json::from_str::<Self>(json)?]),
        }
    }
}

/// 초안 생성 옵션
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOptions {
    /// 초안 이름 접두어
    pub name_prefix: String,
    pub name_max_chars: usize,
    pub description_max_chars: usize,
}

impl Default for DraftOptions {
    fn default() -> Self {
        Self {
            name_prefix: "fp-feedback".to_owned(),
            name_max_chars: NAME_MAX_CHARS,
            description_max_chars: DESCRIPTION_MAX_CHARS,
        }
    }
}

impl DraftOptions {
    /// core 설정에서 초안 옵션을 생성합니다.
    pub fn from_core(core: &logflux_core::config::ExclusionConfig) -> Self {
        Self {
            name_prefix: core.name_prefix.trim().to_owned(),
            ..Self::default()
        }
    }
}

/// 규칙 제외 생성 폼 초안
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionDraft {
    /// 대상 정책 (피드백의 정책이 미지정이면 `None`)
    pub policy_id: Option<u64>,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    #[serde(flatten)]
    pub scope: ExclusionScope,
    pub remove_type: RemoveType,
    pub remove_value: String,
}

impl ExclusionDraft {
    /// 피드백과 후보 하나로 초안을 만듭니다.
    ///
    /// 빈 후보(`ExclusionCandidate::empty()`)는 거부합니다.
    pub fn from_feedback(
        feedback: &FalsePositiveFeedback,
        candidate: &ExclusionCandidate,
        options: &DraftOptions,
    ) -> Result<Self, FeedbackError> {
        let remove_value = candidate.remove_value.trim();
        if remove_value.is_empty() {
            return Err(FeedbackError::EmptyRemoveValue);
        }

        let scope = ExclusionScope::infer(&feedback.host, &feedback.path, &feedback.method)?;

        let name = truncate_chars(
            &format!(
                "{}-{}-{}-{}",
                options.name_prefix, feedback.id, candidate.remove_type, remove_value
            ),
            options.name_max_chars,
        );
        let description = truncate_chars(feedback.reason.trim(), options.description_max_chars);

        Ok(Self {
            policy_id: (feedback.policy_id != 0).then_some(feedback.policy_id),
            name,
            description,
            enabled: true,
            scope,
            remove_type: candidate.remove_type,
            remove_value: remove_value.to_owned(),
        })
    }
}

/// 피드백의 제안 문구에서 찾은 후보마다 초안을 하나씩 만듭니다.
///
/// 후보가 없으면 빈 목록을 반환합니다. 순서는 스캐너의 수집 순서를 따릅니다.
pub fn draft_exclusions(
    feedback: &FalsePositiveFeedback,
    scanner: &SuggestionScanner,
    options: &DraftOptions,
) -> Result<Vec<ExclusionDraft>, FeedbackError> {
    let candidates = scanner.collect(&feedback.suggestion);
    debug!(
        feedback_id = feedback.id,
        candidates = candidates.len(),
        "collected exclusion candidates from feedback suggestion"
    );

    candidates
        .iter()
        .map(|candidate| ExclusionDraft::from_feedback(feedback, candidate, options))
        .collect()
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => value[..byte_index].to_owned(),
        None => value.to_owned(),
    }
}
