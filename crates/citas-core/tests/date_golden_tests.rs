//! Golden tests for appointment date normalization.

use citas_core::fusion::normalize_date;

/// Raw `fecha` value and its expected normalized form.
struct GoldenCase {
    id: &'static str,
    input: &'static str,
    expected: &'static str,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase { id: "iso", input: "2025-11-06", expected: "2025-11-06" },
        GoldenCase { id: "iso-padded", input: "  2025-11-06 ", expected: "2025-11-06" },
        GoldenCase { id: "day-first-slash", input: "06/11/2025", expected: "2025-11-06" },
        GoldenCase { id: "day-first-dash", input: "06-11-2025", expected: "2025-11-06" },
        GoldenCase { id: "year-first-slash", input: "2025/11/06", expected: "2025-11-06" },
        GoldenCase { id: "year-day-month", input: "2025-30-10", expected: "2025-10-30" },
        GoldenCase { id: "unpadded", input: "6/11/2025", expected: "2025-11-06" },
        GoldenCase { id: "short-year", input: "6/11/25", expected: "2025-11-06" },
        GoldenCase { id: "short-year-dash", input: "30-10-25", expected: "2025-10-30" },
        GoldenCase { id: "trailing-time", input: "30/10/2025 09:00", expected: "2025-10-30" },
        GoldenCase { id: "leap-day", input: "29/02/2024", expected: "2024-02-29" },
        GoldenCase { id: "not-a-leap-day", input: "29/02/2025", expected: "29/02/2025" },
        GoldenCase { id: "underscores", input: "06_11_25", expected: "06_11_25" },
        GoldenCase { id: "words", input: "próximo lunes", expected: "próximo lunes" },
        GoldenCase { id: "empty", input: "", expected: "" },
    ]
}

#[test]
fn test_golden_cases() {
    for case in get_golden_cases() {
        assert_eq!(
            normalize_date(case.input),
            case.expected,
            "Case {}: normalization mismatch",
            case.id
        );
    }
}

#[test]
fn test_normalization_is_idempotent() {
    for case in get_golden_cases() {
        let once = normalize_date(case.input);
        assert_eq!(normalize_date(&once), once, "Case {}: not idempotent", case.id);
    }
}
