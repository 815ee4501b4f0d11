//! 내장 제안 문구 패턴
//!
//! 키워드는 ASCII 대소문자를 구분하지 않고, 캡처하는 값은 ASCII 문자 클래스로
//! 한정합니다 (`\d` 대신 `[0-9]`: Unicode 숫자를 배제).
//! 모든 패턴은 첫 번째 캡처 그룹으로 값을 반환합니다.
//! 패턴 안의 `\s`는 컴파일 전에 ECMAScript 공백 클래스로 바뀝니다.

use logflux_core::types::RemoveType;

use crate::whitespace::with_js_whitespace;

/// 태그 값 문자 클래스
const TAG_VALUE: &str = r"([a-zA-Z0-9_./:-]+)";

/// 규칙 ID 값 (3~7자리 ASCII 숫자)
const ID_VALUE: &str = r"([0-9]{3,7})";

/// 선택적 여는/닫는 따옴표
const QUOTE: &str = r#"['"`]?"#;

/// `ruleRemoveByTag=...` 형태의 기계 구문
pub const TAG_MACHINE_PATTERN: &str = r"(?i:ruleremovebytag)\s*[=:：]?\s*";

/// 자연어 태그 표현 ("remove by tag", "标签", "按标签移除" 등)
pub const TAG_NATURAL_PATTERN: &str = r"(?i:remove\s*by\s*tag|removebytag|rule\s*tag|tag|标签|移除标签|排除标签|按标签(?:移除|排除)?)\s*[#:：=]?\s*";

/// `ruleRemoveById=...` 형태의 기계 구문
pub const ID_MACHINE_PATTERN: &str = r"(?i:ruleremovebyid)\s*[=:：]?\s*";

/// 자연어 규칙 ID 표현. 단독 `id`는 마지막 대안
pub const ID_NATURAL_PATTERN: &str = r"(?i:remove\s*by\s*id|removebyid|rule\s*id|ruleid|规则id|规则编号|按id(?:移除|排除)?|移除规则|排除规则|id)\s*[#:：=]?\s*";

/// 폴백 스캔용 ASCII 단어 토큰 (`\w`와 같은 범위)
pub const ASCII_WORD_PATTERN: &str = r"[0-9A-Za-z_]+";

/// 공백 정규화 대상 (ECMAScript 공백, BOM 포함)
pub const WHITESPACE_RUN_PATTERN: &str = r"\s+";

/// 폴백 스캔이 규칙 ID로 간주하는 숫자 길이 범위
pub const FALLBACK_ID_DIGITS: std::ops::RangeInclusive<usize> = 5..=7;

/// 적용 순서대로 나열한 내장 스캔 패스
///
/// 태그 패스 두 개가 ID 패스보다 먼저 실행됩니다.
pub fn builtin_passes() -> Vec<(RemoveType, String)> {
    vec![
        (RemoveType::Tag, with_value(TAG_MACHINE_PATTERN, TAG_VALUE)),
        (RemoveType::Tag, with_value(TAG_NATURAL_PATTERN, TAG_VALUE)),
        (RemoveType::Id, with_value(ID_MACHINE_PATTERN, ID_VALUE)),
        (RemoveType::Id, with_value(ID_NATURAL_PATTERN, ID_VALUE)),
    ]
}

/// 공백 정규화 패턴
pub fn whitespace_run() -> String {
    with_js_whitespace(WHITESPACE_RUN_PATTERN)
}

fn with_value(prefix: &str, value: &str) -> String {
    with_js_whitespace(&format!("{prefix}{QUOTE}{value}{QUOTE}"))
}
