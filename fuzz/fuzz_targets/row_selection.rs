#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use logflux_waf_feedback::{RowKey, merge_checked_row_keys};

#[derive(Arbitrary, Debug)]
enum FuzzKey {
    Integer(i64),
    Number(f64),
    Text(String),
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    previous: Vec<i64>,
    current_page: Vec<i64>,
    checked: Vec<FuzzKey>,
}

fuzz_target!(|input: FuzzInput| {
    let checked: Vec<RowKey> = input
        .checked
        .into_iter()
        .map(|key| match key {
            FuzzKey::Integer(n) => RowKey::Integer(n),
            FuzzKey::Number(n) => RowKey::Number(n),
            FuzzKey::Text(s) => RowKey::Text(s),
        })
        .collect();

    let merged = merge_checked_row_keys(&input.previous, &input.current_page, &checked);
    assert!(merged.iter().all(|&id| id > 0));

    let again = merge_checked_row_keys(&merged, &input.current_page, &checked);
    let mut left = merged.clone();
    let mut right = again;
    left.sort_unstable();
    right.sort_unstable();
    assert_eq!(left, right);
});
