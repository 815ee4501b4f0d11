//! 대시보드 공백 규칙
//!
//! 제안 문구와 행 키는 브라우저에서 넘어오므로 공백 판단은 ECMAScript `\s`
//! 집합(WhiteSpace + LineTerminator)을 따릅니다. Rust `char::is_whitespace`와
//! 달리 U+0085(NEL)는 공백이 아니고, U+FEFF(BOM)는 공백입니다.

/// 정규식 문자 클래스로 쓴 ECMAScript 공백 집합
pub const JS_WHITESPACE_CLASS: &str =
    r"[\t\n\x0B\x0C\r \u{A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}]";

/// ECMAScript `\s`에 속하는 문자인지 확인합니다.
pub fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// `String.prototype.trim`과 같은 규칙으로 앞뒤 공백을 제거합니다.
pub fn trim_js(text: &str) -> &str {
    text.trim_matches(is_js_whitespace)
}

/// 패턴의 `\s`를 ECMAScript 공백 클래스로 바꿉니다.
pub(crate) fn with_js_whitespace(pattern: &str) -> String {
    pattern.replace(r"\s", JS_WHITESPACE_CLASS)
}
