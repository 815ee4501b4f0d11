//! 페이지 간 선택 병합
//!
//! 페이지네이션된 피드백 테이블은 현재 보이는 페이지의 체크 상태만 보고합니다.
//! [`merge_checked_row_keys`]는 보이지 않는 페이지의 선택은 그대로 두고,
//! 현재 페이지의 선택만 최신 보고로 교체합니다.
//!
//! 테이블 위젯은 행 키를 숫자 또는 숫자 문자열로 보고하므로 [`RowKey`]로
//! 두 형태를 모두 받습니다. 양의 정수로 해석되지 않는 키는 조용히 버립니다.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::whitespace::trim_js;

/// `i64` 범위를 벗어나는 첫 값 (2^63)
const I64_EXCLUSIVE_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// 테이블 위젯이 보고하는 행 키
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowKey {
    /// 정수 키 (정밀도 손실 없음)
    Integer(i64),
    /// 숫자 키 (JSON 실수, 2^53 초과 정수는 정밀도가 떨어질 수 있음)
    Number(f64),
    /// 문자열 키 (보통 숫자 문자열)
    Text(String),
}

impl RowKey {
    /// 행 키를 양의 정수 행 ID로 변환합니다.
    ///
    /// 숫자는 유한하고 정수이며 0보다 커야 합니다. 문자열은 앞뒤 공백을 제거한 뒤
    /// 10진수(소수점, 지수 표기 포함) 또는 `0x`/`0o`/`0b` 접두어 정수로 해석합니다.
    /// `i64` 범위를 넘는 값은 거부합니다.
    pub fn row_id(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => (*value > 0).then_some(*value),
            Self::Number(value) => positive_integer(*value),
            Self::Text(text) => parse_numeric_text(text).and_then(positive_integer),
        }
    }
}

impl From<i64> for RowKey {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for RowKey {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RowKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RowKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn positive_integer(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value > 0.0 && value < I64_EXCLUSIVE_BOUND {
        Some(value as i64)
    } else {
        None
    }
}

/// 숫자 문자열을 해석합니다. 해석할 수 없으면 `None`.
fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = trim_js(text);
    if trimmed.is_empty() {
        return None;
    }

    if let Some((radix, digits)) = radix_prefixed(trimmed) {
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
    }

    // Rust의 float 파서는 "inf"/"nan" 표기도 받지만 유한성 검사에서 걸러집니다.
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn radix_prefixed(text: &str) -> Option<(u32, &str)> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    Some((radix, &text[2..]))
}

/// 이전 선택과 현재 페이지의 체크 상태를 병합합니다.
///
/// 1. 이전 선택에서 양의 정수만 유지
/// 2. 현재 페이지에 속한 ID는 체크 여부와 무관하게 제거
/// 3. 현재 페이지에서 체크된 키 중 양의 정수를 추가
///
/// 결과 순서는 남은 이전 선택, 새로 추가된 ID 순이지만 호출자는 순서에
/// 의존하지 않아야 합니다. 같은 입력에 대해 항상 같은 결과를 반환합니다.
pub fn merge_checked_row_keys(
    previous: &[i64],
    current_page_ids: &[i64],
    checked_in_current_page: &[RowKey],
) -> Vec<i64> {
    let page: HashSet<i64> = current_page_ids.iter().copied().collect();

    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for &id in previous {
        if id > 0 && !page.contains(&id) && seen.insert(id) {
            merged.push(id);
        }
    }

    for id in checked_in_current_page.iter().filter_map(RowKey::row_id) {
        if seen.insert(id) {
            merged.push(id);
        }
    }

    merged
}

/// 페이지 이동 사이에 유지되는 선택 상태
#[derive(Debug, Clone, Default)]
pub struct CrossPageSelection {
    ids: Vec<i64>,
}

impl CrossPageSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 페이지의 체크 상태 보고를 반영합니다.
    pub fn apply_page(&mut self, current_page_ids: &[i64], checked: &[RowKey]) {
        self.ids = merge_checked_row_keys(&self.ids, current_page_ids, checked);
    }

    /// 선택을 모두 해제합니다. (필터 변경, 일괄 처리 완료 후)
    pub fn reset(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// 일괄 상태 변경 요청에 보낼 ID 목록
    ///
    /// 양의 정수만, 중복 없이, 선택 순서대로 반환합니다.
    pub fn batch_ids(&self) -> Vec<i64> {
        let mut seen = HashSet::new();
        self.ids
            .iter()
            .copied()
            .filter(|id| *id > 0 && seen.insert(*id))
            .collect()
    }
}
