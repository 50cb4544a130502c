//! Typed records of a manual, produced by [`crate::schema`] and consumed by [`crate::render`].

/// A complete manual.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub headline: String,
    pub body: String,
    pub manpage_intro: String,
    pub manpage_epilogue: String,
    pub sections: Vec<Section>,
}

/// A top-level section; becomes a `##` heading (or its own page in multi-file mode).
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub body: Option<String>,
    /// Empty when the source has no `entries` key.
    pub entries: Vec<Entry>,
}

/// A `###` entry inside a section.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub title: String,
    pub body: String,
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub program: Code,
    pub input: Code,
    pub output: Code,
}

/// Contents of a fenced code block: either one string or a list of lines.
#[derive(Debug, Clone, PartialEq)]
pub enum Code {
    Text(String),
    Lines(Vec<String>),
}

impl Code {
    /// One element per rendered line; a single string counts as one element.
    pub fn lines(&self) -> &[String] {
        match self {
            Code::Text(text) => std::slice::from_ref(text),
            Code::Lines(lines) => lines,
        }
    }
}
