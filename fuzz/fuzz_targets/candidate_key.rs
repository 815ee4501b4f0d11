#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use logflux_core::types::RemoveType;
use logflux_waf_feedback::{build_candidate_key, parse_candidate_key};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    is_tag: bool,
    value: String,
    raw_key: String,
}

fuzz_target!(|input: FuzzInput| {
    // 임의 문자열 파싱은 패닉 없이 끝나야 함
    let _ = parse_candidate_key(&input.raw_key);

    let remove_type = if input.is_tag {
        RemoveType::Tag
    } else {
        RemoveType::Id
    };
    let key = build_candidate_key(remove_type, &input.value);
    if let Some(parsed) = parse_candidate_key(&key) {
        assert_eq!(parsed.remove_type, remove_type);
    }
});
