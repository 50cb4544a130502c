//! High-level pipeline: load → read schema → render → assemble → write, for every manual.
//!
//! # Major Types
//! - [`ConvertConfig`]: where manuals come from, where output goes, which mode, what to do on failure
//! - [`ConvertReport`]: what was written for each manual, plus skipped failures
//!
//! # Responsibilities
//! - Converts each manual completely in memory before anything is written, so a failing
//!   manual never leaves partial output behind
//! - Processes manuals one at a time in file-name order
//! - With [`FailurePolicy::Halt`] (the default) the first failure ends the run; with
//!   [`FailurePolicy::Skip`] it is recorded and the remaining manuals still run
//!
//! # Navigation
//! - Batch entrypoint: [`convert_manuals`]
//! - Per-document entrypoints: [`convert_single`], [`convert_multi`]

use std::error::Error as _;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{error, info, warn};

use crate::assemble::{assemble_multi, join_blocks, single_file_name, OutputFile};
use crate::contract::DocumentSink;
use crate::error::{ConvertError, PipelineError};
use crate::load::{list_manuals, load_manual};
use crate::markdown::MultilineStyle;
use crate::render::{render_multi, render_single};
use crate::schema::read_document;

/// Output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One document per manual, named after the manual.
    Single,
    /// One directory per manual holding `_index.md` plus one page per section.
    Multi,
}

/// What happens to the rest of the batch when one manual fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    Halt,
    Skip,
}

#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub manuals_dir: PathBuf,
    pub output_dir: PathBuf,
    pub mode: Mode,
    pub on_failure: FailurePolicy,
    pub multiline_style: MultilineStyle,
}

#[derive(Debug, Default)]
pub struct ConvertReport {
    pub manuals: Vec<ManualReport>,
    pub failures: Vec<ManualFailure>,
}

#[derive(Debug)]
pub struct ManualReport {
    pub manual: PathBuf,
    pub documents: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct ManualFailure {
    pub manual: PathBuf,
    pub error: PipelineError,
}

/// Render a parsed manual as one Markdown document.
pub fn convert_single(value: &Value, style: MultilineStyle) -> Result<String, ConvertError> {
    let doc = read_document(value)?;
    Ok(join_blocks(&render_single(&doc, style)?))
}

/// Render a parsed manual as an index page plus one page per section.
pub fn convert_multi(value: &Value, style: MultilineStyle) -> Result<Vec<OutputFile>, ConvertError> {
    let doc = read_document(value)?;
    assemble_multi(&render_multi(&doc, style)?)
}

pub fn convert_manuals<S>(config: &ConvertConfig, sink: &S) -> Result<ConvertReport, PipelineError>
where
    S: DocumentSink + ?Sized,
{
    info!(
        manuals_dir = %config.manuals_dir.display(),
        output_dir = %config.output_dir.display(),
        mode = ?config.mode,
        "Starting manual conversion"
    );

    let manuals = list_manuals(&config.manuals_dir)?;
    sink.create_dir(&config.output_dir)
        .map_err(|source| PipelineError::Write {
            path: config.output_dir.clone(),
            source,
        })?;

    let mut report = ConvertReport::default();
    for manual in manuals {
        match convert_manual(config, sink, &manual) {
            Ok(documents) => report.manuals.push(ManualReport { manual, documents }),
            Err(e) => match config.on_failure {
                FailurePolicy::Halt => {
                    error!(manual = %manual.display(), error = %e, cause = ?e.source(), "Conversion failed, stopping");
                    return Err(e);
                }
                FailurePolicy::Skip => {
                    warn!(manual = %manual.display(), error = %e, cause = ?e.source(), "Conversion failed, skipping manual");
                    report.failures.push(ManualFailure { manual, error: e });
                }
            },
        }
    }

    info!(
        converted = report.manuals.len(),
        failed = report.failures.len(),
        "Manual conversion complete"
    );
    Ok(report)
}

fn convert_manual<S>(config: &ConvertConfig, sink: &S, manual: &Path) -> Result<Vec<PathBuf>, PipelineError>
where
    S: DocumentSink + ?Sized,
{
    info!(manual = %manual.display(), "Converting manual");
    let value = load_manual(manual)?;
    let as_pipeline_error = |source| PipelineError::Manual {
        path: manual.to_path_buf(),
        source,
    };

    let (dir, files) = match config.mode {
        Mode::Single => {
            let contents = convert_single(&value, config.multiline_style).map_err(as_pipeline_error)?;
            let file = OutputFile {
                file_name: single_file_name(manual),
                contents,
            };
            (config.output_dir.clone(), vec![file])
        }
        Mode::Multi => {
            let files = convert_multi(&value, config.multiline_style).map_err(as_pipeline_error)?;
            let stem = manual.file_stem().unwrap_or_default();
            let dir = config.output_dir.join(stem);
            sink.create_dir(&dir).map_err(|source| PipelineError::Write {
                path: dir.clone(),
                source,
            })?;
            (dir, files)
        }
    };

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.file_name);
        sink.write_document(&path, &file.contents)
            .map_err(|source| PipelineError::Write {
                path: path.clone(),
                source,
            })?;
        info!(manual = %manual.display(), document = %path.display(), "Converted manual");
        written.push(path);
    }
    Ok(written)
}
