//! Render JSON values as Python literal source.
//!
//! Layout rules:
//!   • scalars and empty collections stay on one line
//!   • a list of only strings stays on one line while the joined items
//!     are shorter than `INLINE_LIMIT` characters
//!   • everything else gets one child per line, one indent level deeper,
//!     with the closing bracket at the parent's indentation
//!
//! Mapping keys are always emitted as string literals and keep their
//! insertion order.

use serde_json::{Map, Value};

const INDENT: &str = "    ";
const INLINE_LIMIT: usize = 80;

pub fn format_value(value: &Value, indent_level: usize) -> String {
    let indent = INDENT.repeat(indent_level);

    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => format_list(items, indent_level, &indent),
        Value::Object(map) => format_dict(map, indent_level, &indent),
    }
}

fn format_list(items: &[Value], indent_level: usize, indent: &str) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }

    let rendered: Vec<String> = items
        .iter()
        .map(|item| format_value(item, indent_level + 1))
        .collect();

    if items.iter().all(Value::is_string) {
        let joined = rendered.join(", ");
        if joined.chars().count() < INLINE_LIMIT {
            return format!("[{joined}]");
        }
    }

    let body = rendered
        .iter()
        .map(|item| format!("{indent}{INDENT}{item}"))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("[\n{body}\n{indent}]")
}

fn format_dict(map: &Map<String, Value>, indent_level: usize, indent: &str) -> String {
    if map.is_empty() {
        return "{}".to_string();
    }

    let body = map
        .iter()
        .map(|(key, val)| {
            format!(
                "{indent}{INDENT}{}: {}",
                quote(key),
                format_value(val, indent_level + 1)
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n{body}\n{indent}}}")
}

/// Quote `s` the way Python's `repr` does: single quotes unless the text
/// holds a `'` and no `"`.
pub fn quote(s: &str) -> String {
    let q = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(q);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c if is_printable(c) => out.push(c),
            c if (c as u32) < 0x100 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if (c as u32) < 0x10000 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push_str(&format!("\\U{:08x}", c as u32)),
        }
    }
    out.push(q);
    out
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    // format characters and private use
    !matches!(
        c,
        '\u{00AD}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
            | '\u{E000}'..='\u{F8FF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::literal;
    use serde_json::json;

    fn round_trip(value: Value) {
        let text = format_value(&value, 0);
        let back = literal::parse(&text).unwrap_or_else(|e| panic!("{e}\n{text}"));
        assert_eq!(back, value, "emitted:\n{text}");
    }

    #[test]
    fn scalars() {
        assert_eq!(format_value(&Value::Null, 0), "None");
        assert_eq!(format_value(&json!(true), 0), "True");
        assert_eq!(format_value(&json!(false), 3), "False");
        assert_eq!(format_value(&json!(42), 0), "42");
        assert_eq!(format_value(&json!(-7), 0), "-7");
        assert_eq!(format_value(&json!(2.5), 0), "2.5");
        assert_eq!(format_value(&json!([]), 2), "[]");
        assert_eq!(format_value(&json!({}), 2), "{}");
    }

    #[test]
    fn quote_picks_python_quote_style() {
        assert_eq!(quote("abc"), "'abc'");
        assert_eq!(quote("it's"), "\"it's\"");
        assert_eq!(quote("say \"hi\""), "'say \"hi\"'");
        assert_eq!(quote("both ' and \""), "'both \\' and \"'");
        assert_eq!(quote("back\\slash"), "'back\\\\slash'");
        assert_eq!(quote("line\nbreak\t"), "'line\\nbreak\\t'");
        assert_eq!(quote("bell\u{7}"), "'bell\\x07'");
        assert_eq!(quote("Aß→🧬"), "'Aß→🧬'");
        assert_eq!(quote("zw\u{200B}"), "'zw\\u200b'");
    }

    #[test]
    fn numbers_keep_their_json_text() {
        let big: Value = serde_json::from_str("18446744073709551616").unwrap();
        assert_eq!(format_value(&big, 0), "18446744073709551616");

        let v: Value = serde_json::from_str(r#"{"vol": 1.0, "n": -12, "tiny": 2.5e-3}"#).unwrap();
        assert_eq!(
            format_value(&v, 0),
            "{\n    'vol': 1.0,\n    'n': -12,\n    'tiny': 2.5e-3\n}"
        );
        round_trip(v);
    }

    #[test]
    fn short_string_list_is_inline() {
        let v = json!(["A1", "B2", "C3"]);
        assert_eq!(format_value(&v, 0), "['A1', 'B2', 'C3']");
    }

    #[test]
    fn long_string_list_breaks_lines() {
        let items: Vec<String> = (0..20).map(|i| format!("part_{i:03}")).collect();
        let text = format_value(&json!(items), 1);
        assert!(text.starts_with("[\n        'part_000',\n"));
        assert!(text.ends_with("\n    ]"));
        assert_eq!(text.lines().count(), 22);
    }

    #[test]
    fn inline_limit_is_exclusive() {
        // quoting adds two characters
        let one = "x".repeat(77);
        assert_eq!(format_value(&json!([one.clone()]), 0), format!("['{one}']"));

        let exact = "x".repeat(78);
        assert!(format_value(&json!([exact]), 0).starts_with("[\n"));
    }

    #[test]
    fn mixed_list_is_multiline() {
        let text = format_value(&json!(["a", 1]), 0);
        assert_eq!(text, "[\n    'a',\n    1\n]");
    }

    #[test]
    fn nested_mapping_layout() {
        let v = json!({"Product": "p1", "PartsList": ["x", "y"], "meta": {"n": null}});
        let expected = "{\n    'Product': 'p1',\n    'PartsList': ['x', 'y'],\n    'meta': {\n        'n': None\n    }\n}";
        assert_eq!(format_value(&v, 0), expected);
    }

    #[test]
    fn mapping_keeps_insertion_order() {
        let v: Value = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        assert_eq!(
            format_value(&v, 0),
            "{\n    'z': 1,\n    'a': 2,\n    'm': 3\n}"
        );
    }

    #[test]
    fn round_trips_quotes_and_nesting() {
        round_trip(json!({"a": [1, 2], "b": "qu\"ote"}));
        round_trip(json!({"it's": "mixed ' and \" \\ \n", "empty": [], "e": {}}));
        round_trip(json!([[], {}, [[1.5, -2, null, true]], "ünï©ødé 🧫"]));
        round_trip(json!({"deep": {"deeper": {"deepest": ["a", {"k": false}]}}}));
    }
}
