//! JSONC to strict JSON.
//!
//! Windows Terminal's `settings.json` allows `//` line comments, `/* */` block
//! comments, and trailing commas. [`strip`] removes all three in one
//! left-to-right pass and leaves string contents untouched, so the result can
//! be handed to `serde_json`. Stripping never fails: malformed input simply
//! produces text that fails to parse downstream, and that parse is the real
//! validation gate.

/// Remove comments and trailing commas from JSONC source.
///
/// - `//` consumes through end of line (the newline itself is kept).
/// - `/*` consumes through the first `*/`; blocks do not nest and an
///   unterminated block consumes the rest of the input.
/// - A `,` whose next significant character is `}` or `]` is dropped.
///   Whitespace, comments and further commas are skipped when looking ahead.
pub fn strip(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut in_string = false;
    let mut escape_next = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if in_string {
            if escape_next {
                escape_next = false;
            } else if ch == '\\' {
                escape_next = true;
            } else if ch == '"' {
                in_string = false;
            }
            out.push(ch);
            i += 1;
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
                i += 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                i = skip_line_comment(&chars, i);
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i = skip_block_comment(&chars, i);
            }
            ',' if closes_after(&chars, i + 1) => {
                i += 1;
            }
            _ => {
                out.push(ch);
                i += 1;
            }
        }
    }

    out
}

/// Index of the newline ending the line comment starting at `start`
/// (or end of input).
fn skip_line_comment(chars: &[char], start: usize) -> usize {
    let mut i = start + 2;
    while i < chars.len() && chars[i] != '\n' {
        i += 1;
    }
    i
}

/// Index just past the `*/` closing the block comment starting at `start`
/// (or end of input).
fn skip_block_comment(chars: &[char], start: usize) -> usize {
    let mut i = start + 2;
    while i < chars.len() {
        if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
            return i + 2;
        }
        i += 1;
    }
    chars.len()
}

/// Whether the next significant character from `from` is a closer.
fn closes_after(chars: &[char], from: usize) -> bool {
    let mut i = from;
    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() => i += 1,
            ',' => i += 1,
            '/' if chars.get(i + 1) == Some(&'/') => i = skip_line_comment(chars, i),
            '/' if chars.get(i + 1) == Some(&'*') => i = skip_block_comment(chars, i),
            '}' | ']' => return true,
            _ => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_line_comments() {
        let input = "{\"key\": \"value\" // comment\n}";
        let result = strip(input);
        assert_eq!(result, "{\"key\": \"value\" \n}");
    }

    #[test]
    fn test_strips_block_comments() {
        let input = r#"{"key": /* block */ "value"}"#;
        assert_eq!(strip(input), r#"{"key":  "value"}"#);
    }

    #[test]
    fn test_preserves_comment_markers_inside_strings() {
        let input = r#"{"key": "value // not a comment", "glob": "/* nope */"}"#;
        assert_eq!(strip(input), input);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let input = r#"{"key": "say \"hi\" // still text"}"#;
        assert_eq!(strip(input), input);
    }

    #[test]
    fn test_escaped_backslash_before_quote_ends_string() {
        let input = "{\"path\": \"C:\\\\\" // gone\n}";
        assert_eq!(strip(input), "{\"path\": \"C:\\\\\" \n}");
    }

    #[test]
    fn test_strips_trailing_commas() {
        assert_eq!(strip(r#"{"a": 1, "b": 2,}"#), r#"{"a": 1, "b": 2}"#);
        assert_eq!(strip("[1, 2,\n  ]"), "[1, 2\n  ]");
    }

    #[test]
    fn test_keeps_separating_commas() {
        let input = r#"{"a": [1, 2], "b": {"c": 3}}"#;
        assert_eq!(strip(input), input);
    }

    #[test]
    fn test_trailing_comma_before_comment_and_closer() {
        let input = "{\"a\": 1, /* keep */ \"b\": 2, // trailing\n}";
        let result = strip(input);
        assert_eq!(result, "{\"a\": 1,  \"b\": 2 \n}");

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed, serde_json::json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_unterminated_block_comment_consumes_rest() {
        assert_eq!(strip("{\"a\": 1 /* never closed"), "{\"a\": 1 ");
    }

    #[test]
    fn test_comment_free_input_is_unchanged() {
        let input = "{\n    \"profiles\": {\"list\": []},\n    \"theme\": \"dark\"\n}";
        assert_eq!(strip(input), input);
    }

    #[test]
    fn test_stripping_is_idempotent() {
        let inputs = [
            "{\"a\": 1, /* x */ \"b\": [1, 2,],}",
            "[1,,]",
            "{\"s\": \"// keep\", // drop\n \"t\": 2,\n}",
            "/* lead */ {\"a\": \"\\\"\"}",
        ];
        for input in inputs {
            let once = strip(input);
            assert_eq!(strip(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_non_ascii_content_survives() {
        let input = "{\"name\": \"Ünïcødé ✓\", // 注释\n\"x\": 1}";
        assert_eq!(strip(input), "{\"name\": \"Ünïcødé ✓\", \n\"x\": 1}");
    }
}
