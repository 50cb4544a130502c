//! Schema-driven extraction of manual records, including the completeness check.
//!
//! Every record kind declares the field names it understands. Extraction reads those
//! fields (in schema order, never in source order) into the typed structs of
//! [`crate::model`] and then compares the record's own field names against the
//! declaration. Anything left over is reported as [`ConvertError::UnconsumedFields`],
//! listing the names in the order they were authored.
//!
//! The parsed YAML tree is only borrowed; nothing is removed from it.
//!
//! Checks run once per record at every level, depth first: an example is checked
//! before its entry, an entry before its section, a section before the document.

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::ConvertError;
use crate::model::{Code, Document, Entry, Example, Section};

pub const DOCUMENT_FIELDS: &[&str] = &[
    "headline",
    "manpage_intro",
    "manpage_epilogue",
    "body",
    "sections",
];
pub const SECTION_FIELDS: &[&str] = &["title", "body", "entries"];
pub const ENTRY_FIELDS: &[&str] = &["title", "body", "examples"];
pub const EXAMPLE_FIELDS: &[&str] = &["program", "input", "output"];

const ROOT: &str = "document";

/// Read a parsed manual into a [`Document`], failing on missing, mistyped or unknown fields.
pub fn read_document(value: &Value) -> Result<Document, ConvertError> {
    let record = Record::new(value, ROOT.to_string())?;

    let headline = record.string("headline")?;
    let manpage_intro = record.string("manpage_intro")?;
    let manpage_epilogue = record.string("manpage_epilogue")?;
    let body = record.string("body")?;
    let sections = record
        .required_records("sections")?
        .into_iter()
        .map(read_section)
        .collect::<Result<Vec<_>, _>>()?;

    record.finish(DOCUMENT_FIELDS)?;
    debug!(sections = sections.len(), "Read document");
    Ok(Document {
        headline,
        body,
        manpage_intro,
        manpage_epilogue,
        sections,
    })
}

fn read_section(record: Record<'_>) -> Result<Section, ConvertError> {
    let title = record.string("title")?;
    let body = record.optional_string("body")?;
    let entries = record
        .optional_records("entries")?
        .into_iter()
        .map(read_entry)
        .collect::<Result<Vec<_>, _>>()?;

    record.finish(SECTION_FIELDS)?;
    Ok(Section {
        title,
        body,
        entries,
    })
}

fn read_entry(record: Record<'_>) -> Result<Entry, ConvertError> {
    let title = record.string("title")?;
    let body = record.string("body")?;
    let examples = record
        .optional_records("examples")?
        .into_iter()
        .map(read_example)
        .collect::<Result<Vec<_>, _>>()?;

    record.finish(ENTRY_FIELDS)?;
    Ok(Entry {
        title,
        body,
        examples,
    })
}

fn read_example(record: Record<'_>) -> Result<Example, ConvertError> {
    let program = record.code("program")?;
    let input = record.code("input")?;
    let output = record.code("output")?;

    record.finish(EXAMPLE_FIELDS)?;
    Ok(Example {
        program,
        input,
        output,
    })
}

/// Fail with the names of all fields in `map` that are not in `declared`, in source order.
pub fn ensure_all_fields_used(
    map: &Mapping,
    declared: &[&str],
    path: &str,
) -> Result<(), ConvertError> {
    let leftover: Vec<String> = map
        .keys()
        .filter(|key| match key {
            Value::String(name) => !declared.contains(&name.as_str()),
            _ => true,
        })
        .map(field_name)
        .collect();

    if leftover.is_empty() {
        Ok(())
    } else {
        Err(ConvertError::UnconsumedFields {
            path: path.to_string(),
            fields: leftover,
        })
    }
}

fn field_name(key: &Value) -> String {
    match key {
        Value::String(name) => name.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => format!("{other:?}"),
    }
}

/// A borrowed mapping plus the path used in error messages.
struct Record<'a> {
    path: String,
    map: &'a Mapping,
}

impl<'a> Record<'a> {
    fn new(value: &'a Value, path: String) -> Result<Self, ConvertError> {
        match value {
            Value::Mapping(map) => Ok(Self { path, map }),
            _ => Err(ConvertError::NotARecord { path }),
        }
    }

    fn invalid(&self, field: impl Into<String>, expected: &'static str) -> ConvertError {
        ConvertError::InvalidField {
            path: self.path.clone(),
            field: field.into(),
            expected,
        }
    }

    fn child_path(&self, field: &str, index: usize) -> String {
        if self.path == ROOT {
            format!("{field}[{index}]")
        } else {
            format!("{}.{field}[{index}]", self.path)
        }
    }

    fn string(&self, field: &'static str) -> Result<String, ConvertError> {
        self.optional_string(field)?
            .ok_or_else(|| ConvertError::MissingField {
                path: self.path.clone(),
                field,
            })
    }

    fn optional_string(&self, field: &'static str) -> Result<Option<String>, ConvertError> {
        match self.map.get(field) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(_) => Err(self.invalid(field, "a string")),
        }
    }

    fn code(&self, field: &'static str) -> Result<Code, ConvertError> {
        const EXPECTED: &str = "a string or a list of strings";
        match self.map.get(field) {
            None => Err(ConvertError::MissingField {
                path: self.path.clone(),
                field,
            }),
            Some(Value::String(text)) => Ok(Code::Text(text.clone())),
            Some(Value::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::String(line) => Ok(line.clone()),
                    _ => Err(self.invalid(format!("{field}[{index}]"), EXPECTED)),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Code::Lines),
            Some(_) => Err(self.invalid(field, EXPECTED)),
        }
    }

    fn required_records(&self, field: &'static str) -> Result<Vec<Record<'a>>, ConvertError> {
        if self.map.get(field).is_none() {
            return Err(ConvertError::MissingField {
                path: self.path.clone(),
                field,
            });
        }
        self.optional_records(field)
    }

    fn optional_records(&self, field: &'static str) -> Result<Vec<Record<'a>>, ConvertError> {
        match self.map.get(field) {
            None => Ok(Vec::new()),
            Some(Value::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| Record::new(item, self.child_path(field, index)))
                .collect(),
            Some(_) => Err(self.invalid(field, "a list")),
        }
    }

    fn finish(self, declared: &[&str]) -> Result<(), ConvertError> {
        ensure_all_fields_used(self.map, declared, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    const MINIMAL: &str = r#"
headline: jq Manual
body: intro text
manpage_intro: man intro
manpage_epilogue: man epilogue
sections:
  - title: Invoking jq
    body: how to run it
  - title: Basic filters
    entries:
      - title: "Identity: `.`"
        body: returns its input
        examples:
          - program: "."
            input: '"Hello"'
            output: ['"Hello"']
"#;

    #[test]
    fn reads_a_complete_document_in_order() {
        let doc = read_document(&parse(MINIMAL)).expect("document");
        assert_eq!(doc.headline, "jq Manual");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].title, "Invoking jq");
        assert!(doc.sections[0].entries.is_empty());
        let example = &doc.sections[1].entries[0].examples[0];
        assert_eq!(example.program, Code::Text(".".into()));
        assert_eq!(example.output, Code::Lines(vec!["\"Hello\"".into()]));
    }

    #[test]
    fn leftover_fields_are_listed_in_source_order() {
        let value = parse("zeta: 1\ntitle: t\nalpha: 2\n");
        let Value::Mapping(map) = &value else {
            panic!("mapping expected");
        };
        let err = ensure_all_fields_used(map, SECTION_FIELDS, "sections[0]").unwrap_err();
        match err {
            ConvertError::UnconsumedFields { path, fields } => {
                assert_eq!(path, "sections[0]");
                assert_eq!(fields, vec!["zeta".to_string(), "alpha".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn example_extra_field_is_reported_with_its_path() {
        let yaml = MINIMAL.replace("output: ['\"Hello\"']", "output: ['\"Hello\"']\n            note: x");
        let err = read_document(&parse(&yaml)).unwrap_err();
        assert!(err.is_unconsumed());
        assert_eq!(
            err.to_string(),
            r#"sections[1].entries[0].examples[0] still contains fields ["note"]"#
        );
    }

    #[test]
    fn entry_without_body_is_a_lookup_failure() {
        let yaml = MINIMAL.replace("        body: returns its input\n", "");
        let err = read_document(&parse(&yaml)).unwrap_err();
        assert!(
            matches!(&err, ConvertError::MissingField { path, field: "body" } if path == "sections[1].entries[0]"),
            "got {err:?}"
        );
    }

    #[test]
    fn null_section_body_is_rejected() {
        let yaml = MINIMAL.replace("body: how to run it", "body: ~");
        let err = read_document(&parse(&yaml)).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidField { .. }), "got {err:?}");
    }

    #[test]
    fn code_lines_must_be_strings() {
        let yaml = MINIMAL.replace("output: ['\"Hello\"']", "output: [1]");
        let err = read_document(&parse(&yaml)).unwrap_err();
        match err {
            ConvertError::InvalidField { field, .. } => assert_eq!(field, "output[0]"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn document_must_be_a_mapping() {
        let err = read_document(&parse("- just\n- a list\n")).unwrap_err();
        assert!(matches!(err, ConvertError::NotARecord { path } if path == "document"));
    }
}
