//! Output assembly: joining blocks into documents and naming the files they go to.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ConvertError;
use crate::render::Page;

pub const DOCUMENT_EXTENSION: &str = "md";

/// One assembled document, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    pub file_name: String,
    pub contents: String,
}

pub fn join_blocks<S: AsRef<str>>(blocks: &[S]) -> String {
    blocks
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n")
}

fn illegal_chars() -> &'static Regex {
    static ILLEGAL: OnceLock<Regex> = OnceLock::new();
    ILLEGAL.get_or_init(|| Regex::new(r"[^\w\-.]").expect("slug pattern is valid"))
}

/// Lower-case, spaces to hyphens, drop everything but word characters, `-` and `.`,
/// then trim dots from both ends.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase().replace(' ', "-");
    illegal_chars()
        .replace_all(&lowered, "")
        .trim_matches('.')
        .to_string()
}

pub fn page_file_name(key: &str) -> Result<String, ConvertError> {
    let slug = slugify(key);
    if slug.is_empty() {
        return Err(ConvertError::EmptySlug {
            title: key.to_string(),
        });
    }
    Ok(format!("{slug}.{DOCUMENT_EXTENSION}"))
}

/// File name for a single-file manual: the manual's stem with the document extension.
pub fn single_file_name(manual: &Path) -> String {
    let stem = manual
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}.{DOCUMENT_EXTENSION}")
}

/// Join every page and name its file, refusing pages that would overwrite each other.
pub fn assemble_multi(pages: &[Page]) -> Result<Vec<OutputFile>, ConvertError> {
    let mut claimed: HashMap<String, &str> = HashMap::new();
    let mut files = Vec::with_capacity(pages.len());
    for page in pages {
        let file_name = page_file_name(&page.key)?;
        if let Some(first) = claimed.insert(file_name.clone(), &page.key) {
            return Err(ConvertError::PageCollision {
                file_name,
                first: first.to_string(),
                second: page.key.clone(),
            });
        }
        files.push(OutputFile {
            file_name,
            contents: join_blocks(&page.blocks),
        });
    }
    Ok(files)
}
