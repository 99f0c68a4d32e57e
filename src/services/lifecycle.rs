//! Numbering and progress rules of the work order lifecycle.
//!
//! Everything here is pure; services call these inside their transactions.

pub const WORK_ORDER_PREFIX: &str = "WO";

/// Two letters used when a product name has no alphanumeric characters.
const FALLBACK_PRODUCT_CODE: &str = "XX";

/// Template for a manufacturing step seeded into a new batch record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub sort_order: i32,
}

/// Template for a quality control test seeded into a new batch record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestTemplate {
    pub name: &'static str,
    pub acceptable_range: &'static str,
}

/// Standard cream process.
pub const DEFAULT_STEPS: [StepTemplate; 6] = [
    StepTemplate {
        name: "Raw Material Preparation",
        description: "Weigh and prepare all raw materials according to formula",
        sort_order: 1,
    },
    StepTemplate {
        name: "Oil Phase Mixing",
        description: "Combine oil phase ingredients and heat to the required temperature",
        sort_order: 2,
    },
    StepTemplate {
        name: "Water Phase Preparation",
        description: "Combine water phase ingredients and heat to the required temperature",
        sort_order: 3,
    },
    StepTemplate {
        name: "Emulsification",
        description: "Add oil phase to water phase while mixing at high speed",
        sort_order: 4,
    },
    StepTemplate {
        name: "Cooling and Addition of Actives",
        description: "Cool to appropriate temperature and add heat-sensitive ingredients",
        sort_order: 5,
    },
    StepTemplate {
        name: "Filling and Packaging",
        description: "Fill product into containers and seal",
        sort_order: 6,
    },
];

pub const DEFAULT_TESTS: [TestTemplate; 4] = [
    TestTemplate {
        name: "pH Test",
        acceptable_range: "6.5-7.5",
    },
    TestTemplate {
        name: "Viscosity Test",
        acceptable_range: "10,000-20,000 cP",
    },
    TestTemplate {
        name: "Appearance",
        acceptable_range: "White to off-white cream",
    },
    TestTemplate {
        name: "Microbial Test",
        acceptable_range: "No significant growth",
    },
];

/// `WO-<year>-<seq>` with the sequence zero-padded to three digits.
pub fn work_order_number(year: i32, seq: u32) -> String {
    format!("{}-{}-{:03}", WORK_ORDER_PREFIX, year, seq)
}

/// Number following the highest existing suffix of the year.
pub fn next_work_order_number(year: i32, last_suffix: Option<u32>) -> String {
    work_order_number(year, last_suffix.unwrap_or(0) + 1)
}

/// Numeric suffix after the last `-`.
pub fn parse_suffix(number: &str) -> Option<u32> {
    let (_, suffix) = number.rsplit_once('-')?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// Splits `WO-<year>-<seq>` into its year and the raw sequence text.
fn split_work_order_number(number: &str) -> Option<(i32, &str)> {
    let mut parts = number.splitn(3, '-');
    if parts.next()? != WORK_ORDER_PREFIX {
        return None;
    }
    let year = parts.next()?.parse().ok()?;
    let seq = parts.next()?;
    parse_suffix(number)?;
    Some((year, seq))
}

/// First two alphanumeric characters of the product name, uppercased.
pub fn product_code(product_name: &str) -> String {
    let code: String = product_name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if code.is_empty() {
        FALLBACK_PRODUCT_CODE.to_string()
    } else {
        code
    }
}

/// `<PP>-<YY>-<NNN>-<batchSize>`, taking year and sequence from the work order number.
///
/// Returns `None` when the work order number is not in `WO-<year>-<seq>` form.
pub fn batch_number(product_name: &str, work_order_number: &str, batch_size: i32) -> Option<String> {
    let (year, seq) = split_work_order_number(work_order_number)?;
    Some(format!(
        "{}-{:02}-{}-{}",
        product_code(product_name),
        year.rem_euclid(100),
        seq,
        batch_size
    ))
}

/// `floor(100 * completed / total)`, zero for a batch without steps.
pub fn completion_percentage(completed: u64, total: u64) -> i32 {
    if total == 0 {
        return 0;
    }
    let pct = completed.min(total) * 100 / total;
    pct as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn first_work_order_of_the_year_is_001() {
        assert_eq!(next_work_order_number(2024, None), "WO-2024-001");
        assert_eq!(next_work_order_number(2024, Some(41)), "WO-2024-042");
        assert_eq!(next_work_order_number(2024, Some(999)), "WO-2024-1000");
    }

    #[rstest]
    #[case("WO-2024-001", Some(1))]
    #[case("WO-2024-120", Some(120))]
    #[case("WO-2024-", None)]
    #[case("WO-2024-1a", None)]
    #[case("garbage", None)]
    fn parses_suffix(#[case] number: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_suffix(number), expected);
    }

    #[rstest]
    #[case("Hydrating Moisturizer", "HY")]
    #[case("SPF 50 Sunscreen", "SP")]
    #[case("a b", "AB")]
    #[case("  ", "XX")]
    fn derives_product_code(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(product_code(name), expected);
    }

    #[test]
    fn batch_number_reuses_work_order_year_and_sequence() {
        assert_eq!(
            batch_number("Hydrating Moisturizer", "WO-2024-001", 500).as_deref(),
            Some("HY-24-001-500")
        );
        assert_eq!(
            batch_number("Clay Face Mask", "WO-2031-017", 250).as_deref(),
            Some("CL-31-017-250")
        );
        assert_eq!(batch_number("Clay Face Mask", "PO-2031-017", 250), None);
    }

    #[rstest]
    #[case(0, 6, 0)]
    #[case(1, 6, 16)]
    #[case(2, 3, 66)]
    #[case(6, 6, 100)]
    #[case(0, 0, 0)]
    fn completion_is_floored(#[case] completed: u64, #[case] total: u64, #[case] expected: i32) {
        assert_eq!(completion_percentage(completed, total), expected);
    }

    #[test]
    fn default_templates_are_in_process_order() {
        let orders: Vec<i32> = DEFAULT_STEPS.iter().map(|s| s.sort_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(DEFAULT_TESTS.len(), 4);
    }
}
