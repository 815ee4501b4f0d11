//! 후보 키 코덱과 순서 보존 후보 집합
//!
//! UI 테이블의 체크박스 값처럼 문자열 하나로 후보를 식별해야 하는 곳에서
//! `(remove_type, remove_value)` 쌍을 NUL 구분자로 이어 붙인 키를 사용합니다.
//! 크레이트 내부의 중복 제거는 키 문자열 대신 [`ExclusionCandidate`] 자체를
//! 해시 키로 사용합니다.

use std::collections::HashSet;

use logflux_core::types::{ExclusionCandidate, RemoveType};

use crate::whitespace::trim_js;

/// 후보 키 구분자
pub const CANDIDATE_KEY_SEPARATOR: char = '\u{0}';

/// `remove_type` + NUL + `remove_value` 형태의 후보 키를 만듭니다.
///
/// 값은 검증하지 않습니다. 나중에 [`parse_candidate_key`]에서 거부될 값이어도
/// 키 생성은 항상 성공합니다.
pub fn build_candidate_key(remove_type: RemoveType, remove_value: &str) -> String {
    let mut key = String::with_capacity(remove_type.as_str().len() + 1 + remove_value.len());
    key.push_str(remove_type.as_str());
    key.push(CANDIDATE_KEY_SEPARATOR);
    key.push_str(remove_value);
    key
}

/// 후보 키를 해석합니다.
///
/// 다음 경우 `None`을 반환합니다.
/// - 구분자가 없거나 맨 앞(인덱스 0)에 있음
/// - 구분자 앞부분이 정확히 `id`/`tag`가 아님
/// - 구분자 뒷부분이 공백 제거 후 비어 있음
pub fn parse_candidate_key(key: &str) -> Option<ExclusionCandidate> {
    let separator_index = key.find(CANDIDATE_KEY_SEPARATOR)?;
    if separator_index == 0 {
        return None;
    }

    let remove_type = key[..separator_index].parse::<RemoveType>().ok()?;
    let remove_value = trim_js(&key[separator_index + CANDIDATE_KEY_SEPARATOR.len_utf8()..]);
    if remove_value.is_empty() {
        return None;
    }

    Some(ExclusionCandidate::new(remove_type, remove_value))
}

/// 삽입 순서를 보존하면서 중복을 제거하는 후보 집합
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    items: Vec<ExclusionCandidate>,
    seen: HashSet<ExclusionCandidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 후보를 추가합니다.
    ///
    /// 값은 앞뒤 공백을 제거한 뒤 사용하며, 빈 값이나 이미 있는 후보는 무시합니다.
    /// 새로 추가된 경우에만 `true`를 반환합니다.
    pub fn insert(&mut self, remove_type: RemoveType, raw_value: &str) -> bool {
        let value = trim_js(raw_value);
        if value.is_empty() {
            return false;
        }

        let candidate = ExclusionCandidate::new(remove_type, value);
        if self.seen.contains(&candidate) {
            return false;
        }
        self.seen.insert(candidate.clone());
        self.items.push(candidate);
        true
    }

    pub fn contains(&self, candidate: &ExclusionCandidate) -> bool {
        self.seen.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExclusionCandidate> {
        self.items.iter()
    }

    /// 삽입 순서대로 후보 목록을 반환합니다.
    pub fn into_vec(self) -> Vec<ExclusionCandidate> {
        self.items
    }
}
