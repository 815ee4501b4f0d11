//! 도메인 타입 -- 규칙 제외(rule exclusion) 관련 공통 타입
//!
//! WAF 오탐 피드백에서 추출한 규칙 제외 후보와, 제외 규칙의 적용 범위를
//! 표현합니다. 각 크레이트는 이 타입들을 사용하여 데이터를 교환합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// 규칙 제거 방식
///
/// WAF 엔진에 특정 규칙을 ID로 제거할지, 태그로 묶인 규칙 그룹을 제거할지를 나타냅니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoveType {
    /// 숫자 규칙 ID로 제거 (`SecRuleRemoveById`)
    #[default]
    Id,
    /// 규칙 태그로 제거 (`SecRuleRemoveByTag`)
    Tag,
}

impl RemoveType {
    /// 소문자 문자열 표현 (`"id"`, `"tag"`)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Tag => "tag",
        }
    }
}

impl fmt::Display for RemoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemoveType {
    type Err = PolicyError;

    /// 정확히 `"id"` 또는 `"tag"`만 허용합니다 (대소문자 구분).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "tag" => Ok(Self::Tag),
            other => Err(PolicyError::InvalidExclusion(format!(
                "invalid remove type: {other}"
            ))),
        }
    }
}

/// 규칙 제외 후보
///
/// 자유 형식 제안 문구에서 추출한 하나의 규칙 제외 지시입니다.
/// `(remove_type, remove_value)` 쌍의 구조적 동등성 외에 별도의 식별자는 없습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionCandidate {
    /// 제거 방식
    pub remove_type: RemoveType,
    /// 제거 대상 값 (규칙 ID 또는 태그), 공백 제거됨
    pub remove_value: String,
}

impl ExclusionCandidate {
    /// 새 후보를 생성합니다.
    pub fn new(remove_type: RemoveType, remove_value: impl Into<String>) -> Self {
        Self {
            remove_type,
            remove_value: remove_value.into(),
        }
    }

    /// "후보 없음"을 나타내는 빈 값 (`id`, `""`)
    pub fn empty() -> Self {
        Self::default()
    }

    /// 제거 대상 값이 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.remove_value.is_empty()
    }
}

impl fmt::Display for ExclusionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.remove_type, self.remove_value)
    }
}

/// 규칙 제외 적용 범위
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    /// 모든 요청에 적용
    #[default]
    Global,
    /// 특정 호스트에만 적용
    Site,
    /// 특정 경로(선택적으로 호스트/메서드 포함)에만 적용
    Route,
}

impl ScopeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Site => "site",
            Self::Route => "route",
        }
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeType {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Self::Global),
            "site" => Ok(Self::Site),
            "route" => Ok(Self::Route),
            other => Err(PolicyError::InvalidExclusion(format!(
                "invalid policy scope type: {other}"
            ))),
        }
    }
}
