//! Remedial hints for failed comparisons.
//!
//! Each rule looks at the expected and actual values independently, so a
//! single failure can produce several clauses.

use crate::value::Value;

/// Returns every hint clause that applies to the mismatch, in a fixed order.
pub fn clauses(expected: &Value, actual: &Value) -> Vec<String> {
    let mut clauses = Vec::new();

    if expected.kind() != actual.kind() {
        clauses.push(format!(
            "The function returned {}, but we expected {}",
            actual.kind().with_article(),
            expected.kind().with_article()
        ));
    }

    if let Some(too_small) = actual.numeric_lt(expected) {
        let size = if too_small { "small" } else { "large" };
        clauses.push(format!("The result ({}) is too {}", actual, size));
    }

    if let (Some(want), Some(got)) = (expected.as_str(), actual.as_str()) {
        let (want_len, got_len) = (want.chars().count(), got.chars().count());
        if want_len != got_len {
            clauses.push(format!(
                "The string lengths don't match: expected {}, got {}",
                want_len, got_len
            ));
        }
    }

    clauses
}

/// Builds the hint line for a failed test, or an empty string when no rule applies.
///
/// ```rust
/// use testbench::hint::hint;
/// use testbench::value::Value;
/// assert_eq!(hint(&Value::Int(5), &Value::Int(4)), "Hint: The result (4) is too small");
/// assert_eq!(hint(&Value::Bool(true), &Value::Bool(false)), "");
/// ```
pub fn hint(expected: &Value, actual: &Value) -> String {
    let clauses = clauses(expected, actual);
    if clauses.is_empty() {
        String::new()
    } else {
        format!("Hint: {}", clauses.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large() {
        assert_eq!(
            hint(&Value::Int(3), &Value::Float(3.5)),
            "Hint: The result (3.5) is too large"
        );
    }

    #[test]
    fn kind_mismatch_names_both_kinds() {
        assert_eq!(
            hint(&Value::Int(1), &Value::from("1")),
            "Hint: The function returned a string, but we expected a number"
        );
    }

    #[test]
    fn string_length_mismatch() {
        assert_eq!(
            hint(&Value::from("abc"), &Value::from("ab")),
            "Hint: The string lengths don't match: expected 3, got 2"
        );
    }

    #[test]
    fn equal_length_strings_get_no_hint() {
        assert_eq!(hint(&Value::from("abc"), &Value::from("abd")), "");
    }

    #[test]
    fn lengths_count_characters() {
        assert_eq!(clauses(&Value::from("é"), &Value::from("e")), Vec::<String>::new());
    }

    #[test]
    fn nil_against_number_only_reports_kinds() {
        assert_eq!(
            clauses(&Value::Int(0), &Value::Nil),
            vec!["The function returned nothing, but we expected a number".to_string()]
        );
        assert_eq!(
            clauses(&Value::Nil, &Value::from(vec![1])),
            vec!["The function returned a list, but we expected nothing".to_string()]
        );
    }
}
