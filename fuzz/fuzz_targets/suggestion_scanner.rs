#![no_main]

use libfuzzer_sys::fuzz_target;
use logflux_waf_feedback::{collect_exclusion_candidates, parse_exclusion_candidate};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let candidates = collect_exclusion_candidates(text);

        // 후보 값은 항상 비어 있지 않고 앞뒤 공백이 없어야 함
        for candidate in &candidates {
            assert!(!candidate.remove_value.is_empty());
            assert_eq!(candidate.remove_value.trim(), candidate.remove_value);
        }

        let first = parse_exclusion_candidate(text);
        match candidates.first() {
            Some(head) => assert_eq!(&first, head),
            None => assert!(first.remove_value.is_empty()),
        }
    }
});
