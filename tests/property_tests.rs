//! Property-based tests for numbering and progress rules.

use batchtrack_api::services::lifecycle::{
    batch_number, completion_percentage, next_work_order_number, parse_suffix, product_code,
};
use proptest::prelude::*;

fn product_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 %-]{0,40}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn percentage_stays_in_bounds(completed in 0u64..10_000, total in 0u64..10_000) {
        let pct = completion_percentage(completed, total);
        prop_assert!((0..=100).contains(&pct));
        if total > 0 && completed >= total {
            prop_assert_eq!(pct, 100);
        }
    }

    #[test]
    fn percentage_never_decreases_as_steps_complete(total in 1u64..500, completed in 0u64..500) {
        let completed = completed.min(total - 1);
        prop_assert!(
            completion_percentage(completed, total) <= completion_percentage(completed + 1, total)
        );
    }

    #[test]
    fn next_number_follows_the_last_suffix(year in 2000i32..2100, last in proptest::option::of(0u32..998)) {
        let number = next_work_order_number(year, last);
        let prefix = format!("WO-{}-", year);
        prop_assert!(number.starts_with(&prefix));
        prop_assert_eq!(parse_suffix(&number), Some(last.unwrap_or(0) + 1));
    }

    #[test]
    fn product_code_is_two_uppercase_characters(name in product_name_strategy()) {
        let code = product_code(&name);
        prop_assert!(!code.is_empty());
        prop_assert!(code.chars().count() <= 2);
        prop_assert!(code.chars().all(|c| !c.is_lowercase()));
    }

    #[test]
    fn batch_number_reuses_the_work_order_sequence(
        name in product_name_strategy(),
        year in 2000i32..2100,
        seq in 1u32..999,
        size in 1i32..100_000,
    ) {
        let wo = format!("WO-{}-{:03}", year, seq);
        let batch = batch_number(&name, &wo, size).expect("well-formed work order number");
        let expected_tail = format!("-{:02}-{:03}-{}", year % 100, seq, size);
        prop_assert!(batch.ends_with(&expected_tail), "{} vs {}", batch, expected_tail);
        prop_assert!(batch.starts_with(&product_code(&name)));
    }

    #[test]
    fn malformed_work_order_numbers_yield_no_batch_number(junk in "[a-z]{1,8}") {
        prop_assert!(batch_number("Serum", &junk, 10).is_none());
    }
}
