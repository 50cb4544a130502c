//! Tree walker: turns a [`Document`] into ordered Markdown blocks.
//!
//! Single-file mode yields one block list for the whole manual. Multi-file mode yields
//! an `_index` page (title front-matter plus body) followed by one page per section,
//! and leaves out the manpage-only intro and epilogue.

use std::collections::BTreeMap;

use crate::error::ConvertError;
use crate::markdown::{code_block, front_matter, heading, MultilineStyle};
use crate::model::{Document, Entry, Example, Section};

pub const INDEX_PAGE: &str = "_index";
pub const PROGRAM_LANG: &str = "jq";
pub const DATA_LANG: &str = "json";

/// A named group of blocks that becomes one output document.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub key: String,
    pub blocks: Vec<String>,
}

pub fn render_single(doc: &Document, style: MultilineStyle) -> Result<Vec<String>, ConvertError> {
    let mut fields = BTreeMap::new();
    fields.insert("headline", doc.headline.as_str());
    fields.insert("manpage_intro", doc.manpage_intro.as_str());
    fields.insert("manpage_epilogue", doc.manpage_epilogue.as_str());

    let mut blocks = vec![front_matter(&fields, style)?, doc.body.clone()];
    for section in &doc.sections {
        render_section(section, &mut blocks);
    }
    Ok(blocks)
}

pub fn render_multi(doc: &Document, style: MultilineStyle) -> Result<Vec<Page>, ConvertError> {
    let mut fields = BTreeMap::new();
    fields.insert("title", doc.headline.as_str());

    let mut pages = Vec::with_capacity(doc.sections.len() + 1);
    pages.push(Page {
        key: INDEX_PAGE.to_string(),
        blocks: vec![front_matter(&fields, style)?, doc.body.clone()],
    });
    for section in &doc.sections {
        let mut blocks = Vec::new();
        render_section(section, &mut blocks);
        pages.push(Page {
            key: section.title.clone(),
            blocks,
        });
    }
    Ok(pages)
}

fn render_section(section: &Section, blocks: &mut Vec<String>) {
    blocks.push(heading(&section.title, 2));
    if let Some(body) = &section.body {
        blocks.push(body.clone());
    }
    for entry in &section.entries {
        render_entry(entry, blocks);
    }
}

fn render_entry(entry: &Entry, blocks: &mut Vec<String>) {
    blocks.push(heading(&entry.title, 3));
    blocks.push(entry.body.clone());
    for example in &entry.examples {
        render_example(example, blocks);
    }
}

fn render_example(example: &Example, blocks: &mut Vec<String>) {
    blocks.push("program:".to_string());
    blocks.push(code_block(example.program.lines(), PROGRAM_LANG));
    blocks.push("input:".to_string());
    blocks.push(code_block(example.input.lines(), DATA_LANG));
    blocks.push("output:".to_string());
    blocks.push(code_block(example.output.lines(), DATA_LANG));
}
