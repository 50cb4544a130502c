/// CLI glue for manual-md: argument parsing, config resolution and the `run` entrypoint.
///
/// All conversion logic lives in [`manual_md_core`]; this module only maps arguments and
/// config onto a [`ConvertConfig`] and prints what was written.
use crate::load_config::{resolve_config, CliConfig};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use manual_md_core::write::FsSink;
use manual_md_core::{convert_manuals, ConvertConfig, FailurePolicy, Mode};
use std::path::PathBuf;

/// CLI for manual-md: render YAML manuals as Markdown.
#[derive(Parser)]
#[clap(
    name = "manual-md",
    version,
    about = "Render YAML manuals (sections, entries, examples) as Markdown documentation"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render every manual into one Markdown file with manpage front-matter
    Single(ConvertArgs),
    /// Render every manual into a directory with an `_index.md` and one page per section
    Multi(ConvertArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Path to a YAML config file (falls back to $MANUAL_MD_CONFIG)
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Directory holding the `.yml` manuals
    #[clap(long)]
    pub manuals: Option<PathBuf>,
    /// Output directory for this mode
    #[clap(long)]
    pub output: Option<PathBuf>,
    /// Keep converting the remaining manuals after one fails
    #[clap(long)]
    pub keep_going: bool,
}

impl ConvertArgs {
    fn to_convert_config(&self, config: CliConfig, mode: Mode) -> ConvertConfig {
        let default_output = match mode {
            Mode::Single => config.single_output_dir,
            Mode::Multi => config.multi_output_dir,
        };
        ConvertConfig {
            manuals_dir: self.manuals.clone().unwrap_or(config.manuals_dir),
            output_dir: self.output.clone().unwrap_or(default_output),
            mode,
            on_failure: if self.keep_going {
                FailurePolicy::Skip
            } else {
                config.on_failure
            },
            multiline_style: config.multiline_style,
        }
    }
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    let (args, mode) = match cli.command {
        Commands::Single(args) => (args, Mode::Single),
        Commands::Multi(args) => (args, Mode::Multi),
    };
    tracing::info!(?mode, "conversion_started");

    let config = resolve_config(args.config.as_deref())?;
    let convert_config = args.to_convert_config(config, mode);

    let report = match convert_manuals(&convert_config, &FsSink) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Conversion failed");
            return Err(anyhow::Error::new(e));
        }
    };

    for manual in &report.manuals {
        for document in &manual.documents {
            println!(
                "converted {} to {}",
                manual.manual.display(),
                document.display()
            );
        }
    }
    let failed = report.failures.len();
    for failure in report.failures {
        let manual = failure.manual.display().to_string();
        // `{:#}` prints the whole cause chain on one line.
        eprintln!("[ERROR] skipped {manual}: {:#}", anyhow::Error::new(failure.error));
    }

    if failed == 0 {
        Ok(())
    } else {
        anyhow::bail!("{failed} manual(s) failed to convert")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manual_md_core::markdown::MultilineStyle;

    #[test]
    fn flags_override_config_and_keep_going_skips() {
        let args = ConvertArgs {
            manuals: Some(PathBuf::from("docs/manuals")),
            keep_going: true,
            ..Default::default()
        };
        let converted = args.to_convert_config(CliConfig::default(), Mode::Multi);
        assert_eq!(converted.manuals_dir, PathBuf::from("docs/manuals"));
        assert_eq!(converted.output_dir, PathBuf::from("multi"));
        assert_eq!(converted.on_failure, FailurePolicy::Skip);
    }

    #[test]
    fn single_mode_defaults_to_output_dir() {
        let converted = ConvertArgs::default().to_convert_config(CliConfig::default(), Mode::Single);
        assert_eq!(converted.manuals_dir, PathBuf::from("manuals"));
        assert_eq!(converted.output_dir, PathBuf::from("output"));
        assert_eq!(converted.on_failure, FailurePolicy::Halt);
        assert_eq!(converted.multiline_style, MultilineStyle::Literal);
    }

    #[test]
    fn multiline_style_comes_from_config() {
        let config = CliConfig {
            multiline_style: MultilineStyle::Serializer,
            ..CliConfig::default()
        };
        let converted = ConvertArgs::default().to_convert_config(config, Mode::Multi);
        assert_eq!(converted.multiline_style, MultilineStyle::Serializer);
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["manual-md", "multi", "--output", "site", "--keep-going"])
            .unwrap();
        match cli.command {
            Commands::Multi(args) => {
                assert_eq!(args.output, Some(PathBuf::from("site")));
                assert!(args.keep_going);
            }
            Commands::Single(_) => panic!("expected multi"),
        }
    }
}
