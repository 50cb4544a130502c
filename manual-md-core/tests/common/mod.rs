#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const SAMPLE_MANUAL: &str = include_str!("../fixtures/manual.yml");

pub fn sample_value() -> serde_yaml::Value {
    serde_yaml::from_str(SAMPLE_MANUAL).expect("fixture manual is valid YAML")
}

/// Fixture with `old` replaced by `new`; panics when `old` does not occur exactly once.
pub fn sample_with(old: &str, new: &str) -> String {
    assert_eq!(
        SAMPLE_MANUAL.matches(old).count(),
        1,
        "fixture edit target must be unique: {old:?}"
    );
    SAMPLE_MANUAL.replacen(old, new, 1)
}

pub fn write_manual(dir: &Path, name: &str, contents: &str) -> PathBuf {
    std::fs::create_dir_all(dir).expect("manuals dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write manual");
    path
}
