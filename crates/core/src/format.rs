//! Pure formatting of stored list elements.

/// Pretty-prints a stored value when it is valid JSON.
///
/// Valid JSON is re-serialized with two-space indentation. Anything else is
/// returned verbatim; a value that is not JSON is not an error.
///
/// # Examples
///
/// ```
/// use rediscan_core::format::format_value;
///
/// assert_eq!(format_value("[1,2]"), "[\n  1,\n  2\n]");
/// assert_eq!(format_value("not json"), "not json");
/// ```
pub fn format_value(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_is_indented() {
        let formatted = format_value(r#"{"age":30,"name":"Alice"}"#);
        assert_eq!(formatted, "{\n  \"age\": 30,\n  \"name\": \"Alice\"\n}");
    }

    #[test]
    fn test_non_json_is_returned_unchanged() {
        assert_eq!(format_value("not json"), "not json");
        assert_eq!(format_value(""), "");
        assert_eq!(format_value("{broken"), "{broken");
        assert_eq!(format_value("  padded text  "), "  padded text  ");
    }

    #[test]
    fn test_scalars_are_json() {
        assert_eq!(format_value("42"), "42");
        assert_eq!(format_value("true"), "true");
        assert_eq!(format_value("null"), "null");
        assert_eq!(format_value(r#""quoted""#), r#""quoted""#);
    }

    #[test]
    fn test_formatted_value_parses_to_same_json() {
        let inputs = [
            r#"{"a":[1,2,{"b":null}],"c":"d"}"#,
            r#"[ "x" , 1.5 , false ]"#,
            r#"{"nested":{"deep":{"deeper":[]}}}"#,
            "  {\"spaced\" : 1}  ",
        ];

        for input in inputs {
            let original: serde_json::Value = serde_json::from_str(input).unwrap();
            let reparsed: serde_json::Value = serde_json::from_str(&format_value(input)).unwrap();
            assert_eq!(original, reparsed, "round trip failed for {input}");
        }
    }

    #[test]
    fn test_nested_indentation_uses_two_spaces() {
        let formatted = format_value(r#"{"a":{"b":1}}"#);
        assert_eq!(formatted, "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
    }

    #[test]
    fn test_unicode_survives() {
        let formatted = format_value(r#"{"greeting":"héllo ☃"}"#);
        assert!(formatted.contains("héllo ☃"));
    }
}
