//! Markdown building blocks: headings, fenced code and YAML front-matter.

use std::collections::BTreeMap;

use crate::error::ConvertError;

pub const FRONT_MATTER_DELIMITER: &str = "---";

/// How front-matter strings containing a newline are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultilineStyle {
    /// Literal block scalar (`|`), so embedded newlines survive exactly as authored.
    #[default]
    Literal,
    /// Whatever `serde_yaml` picks for the string. Selected with `multiline_style: serializer`
    /// in the CLI config.
    Serializer,
}

pub fn heading(title: &str, depth: usize) -> String {
    format!("{} {}", "#".repeat(depth), title)
}

/// Fenced code block with `lang` on the opening fence and one line per element.
pub fn code_block<S: AsRef<str>>(lines: &[S], lang: &str) -> String {
    let mut block = format!("```{lang}");
    for line in lines {
        block.push('\n');
        block.push_str(line.as_ref());
    }
    block.push_str("\n```");
    block
}

/// Front-matter block delimited by `---` lines. Keys are written in sorted order.
pub fn front_matter(
    fields: &BTreeMap<&str, &str>,
    style: MultilineStyle,
) -> Result<String, ConvertError> {
    let mut lines = vec![FRONT_MATTER_DELIMITER.to_string()];
    for (key, value) in fields {
        let rendered = match style {
            MultilineStyle::Literal if needs_escaping(value) => double_quoted(key, value),
            MultilineStyle::Literal if value.contains('\n') => {
                literal_block(key, value).unwrap_or_else(|| double_quoted(key, value))
            }
            _ => serialized_entry(key, value)?,
        };
        lines.push(rendered);
    }
    lines.push(FRONT_MATTER_DELIMITER.to_string());
    Ok(lines.join("\n"))
}

fn serialized_entry(key: &str, value: &str) -> Result<String, ConvertError> {
    let mut entry = BTreeMap::new();
    entry.insert(key, value);
    let yaml = serde_yaml::to_string(&entry)?;
    // Only the document's own line break goes; the rest may belong to a `|+` scalar.
    Ok(yaml.strip_suffix('\n').unwrap_or(&yaml).to_string())
}

/// Characters YAML treats as line breaks or strips, which only survive as escapes.
fn needs_escaping(value: &str) -> bool {
    value.chars().any(|c| {
        matches!(c, '\r' | '\u{feff}' | '\u{2028}' | '\u{2029}')
            || (c.is_control() && c != '\n' && c != '\t')
    })
}

/// `key: "..."` with every break and control character escaped.
fn double_quoted(key: &str, value: &str) -> String {
    let mut entry = format!("{key}: \"");
    for c in value.chars() {
        match c {
            '"' => entry.push_str("\\\""),
            '\\' => entry.push_str("\\\\"),
            '\n' => entry.push_str("\\n"),
            '\r' => entry.push_str("\\r"),
            '\t' => entry.push_str("\\t"),
            c if c.is_control() || matches!(c, '\u{feff}' | '\u{2028}' | '\u{2029}') => {
                entry.push_str(&format!("\\u{:04X}", u32::from(c)));
            }
            c => entry.push(c),
        }
    }
    entry.push('"');
    entry
}

/// `key: |` block for `value`, or `None` when the value is nothing but newlines.
fn literal_block(key: &str, value: &str) -> Option<String> {
    let content = value.trim_end_matches('\n');
    if content.is_empty() {
        return None;
    }
    let trailing = value.len() - content.len();
    let chomping = match trailing {
        0 => "-",
        1 => "",
        _ => "+",
    };
    // Auto-detected indentation breaks when the first content line starts with blanks.
    let first_line = content.lines().find(|line| !line.is_empty()).unwrap_or("");
    let indent = if first_line.starts_with([' ', '\t']) {
        "2"
    } else {
        ""
    };

    let mut block = format!("{key}: |{indent}{chomping}");
    for line in content.split('\n') {
        block.push('\n');
        if !line.is_empty() {
            block.push_str("  ");
            block.push_str(line);
        }
    }
    for _ in 1..trailing {
        block.push('\n');
    }
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_front_matter(block: &str) -> BTreeMap<String, String> {
        let inner = block
            .strip_prefix("---\n")
            .and_then(|rest| rest.strip_suffix("---"))
            .expect("delimited block");
        serde_yaml::from_str(inner).expect("valid yaml")
    }

    #[test]
    fn heading_depth_is_marker_count() {
        assert_eq!(heading("Basic filters", 2), "## Basic filters");
        assert_eq!(heading("Identity", 3), "### Identity");
    }

    #[test]
    fn code_block_single_and_multi_line() {
        assert_eq!(code_block(&["."], "jq"), "```jq\n.\n```");
        assert_eq!(code_block(&["1", "2"], "json"), "```json\n1\n2\n```");
        assert_eq!(code_block::<&str>(&[], "json"), "```json\n```");
    }

    #[test]
    fn single_line_values_are_plain_scalars() {
        let mut fields = BTreeMap::new();
        fields.insert("title", "jq 1.7 Manual");
        let block = front_matter(&fields, MultilineStyle::Literal).unwrap();
        assert_eq!(block, "---\ntitle: jq 1.7 Manual\n---");
    }

    #[test]
    fn keys_are_sorted() {
        let mut fields = BTreeMap::new();
        fields.insert("manpage_intro", "b");
        fields.insert("headline", "a");
        fields.insert("manpage_epilogue", "c");
        let block = front_matter(&fields, MultilineStyle::Literal).unwrap();
        assert_eq!(
            block,
            "---\nheadline: a\nmanpage_epilogue: c\nmanpage_intro: b\n---"
        );
    }

    #[test]
    fn multi_line_values_use_literal_blocks() {
        let mut fields = BTreeMap::new();
        fields.insert("manpage_intro", "first line\n\nthird line\n");
        let block = front_matter(&fields, MultilineStyle::Literal).unwrap();
        assert_eq!(
            block,
            "---\nmanpage_intro: |\n  first line\n\n  third line\n---"
        );
        assert_eq!(
            parse_front_matter(&block)["manpage_intro"],
            "first line\n\nthird line\n"
        );
    }

    #[test]
    fn literal_blocks_round_trip_trailing_newlines_and_indentation() {
        for value in [
            "no trailing\nnewline",
            "two trailing\nnewlines\n\n",
            "  indented first\nline\n",
            "\nleading blank line",
            "tabs\tinside\nare fine",
            "\tleading tab\nline",
            "\n\tleading tab after blank\n",
            "line\u{2028}separator\nparagraph\u{2029}separator",
        ] {
            let mut fields = BTreeMap::new();
            fields.insert("body", value);
            let block = front_matter(&fields, MultilineStyle::Literal).unwrap();
            assert!(block.contains("body: "), "body entry expected: {block}");
            assert_eq!(parse_front_matter(&block)["body"], value, "block was: {block}");
        }
    }

    #[test]
    fn trailing_newlines_round_trip_in_both_styles() {
        for style in [MultilineStyle::Literal, MultilineStyle::Serializer] {
            for value in ["\n", "\n\n", "a\n\n", "a\nb\n\n\n"] {
                let mut fields = BTreeMap::new();
                fields.insert("body", value);
                let block = front_matter(&fields, style).unwrap();
                assert_eq!(
                    parse_front_matter(&block)["body"],
                    value,
                    "{style:?} block was: {block}"
                );
            }
        }
    }

    #[test]
    fn unrepresentable_values_are_double_quoted() {
        let mut fields = BTreeMap::new();
        fields.insert("body", "windows\r\nline endings");
        let block = front_matter(&fields, MultilineStyle::Literal).unwrap();
        assert_eq!(block, "---\nbody: \"windows\\r\\nline endings\"\n---");
        assert_eq!(parse_front_matter(&block)["body"], "windows\r\nline endings");

        for value in ["one\u{2028}line", "nul\u{0}and \"quote\" \\ slash\n", "\u{85}next"] {
            let mut fields = BTreeMap::new();
            fields.insert("body", value);
            let block = front_matter(&fields, MultilineStyle::Literal).unwrap();
            assert_eq!(parse_front_matter(&block)["body"], value, "block was: {block}");
        }
    }

    #[test]
    fn serializer_style_still_round_trips() {
        let mut fields = BTreeMap::new();
        fields.insert("body", "a\nb");
        let block = front_matter(&fields, MultilineStyle::Serializer).unwrap();
        assert_eq!(parse_front_matter(&block)["body"], "a\nb");
    }
}
