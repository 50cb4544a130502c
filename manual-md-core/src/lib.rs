#![doc = "manual-md-core: conversion logic library for manual-md."]

//! This crate contains the complete manual → Markdown transformation: loading YAML
//! manuals, reading them through a declared schema, rendering Markdown blocks,
//! assembling output documents and writing them to disk.
//!
//! # Usage
//! The CLI crate only parses arguments and configuration; everything it runs lives
//! behind [`convert::convert_manuals`] and the per-document entry points
//! [`convert::convert_single`] and [`convert::convert_multi`].

pub mod assemble;
pub mod contract;
pub mod convert;
pub mod error;
pub mod load;
pub mod markdown;
pub mod model;
pub mod render;
pub mod schema;
pub mod write;

pub use convert::{convert_manuals, ConvertConfig, ConvertReport, FailurePolicy, Mode};
pub use error::{ConvertError, PipelineError};
