//! Docerina CLI - Command-line interface for generating Ballerina API documentation

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use docerina_core::{DocConfig, PackageFilter};

/// Printed instead of an error when the arguments do not fit
const USAGE: &str = "Usage: docerina generate <source-root> [package-filter]";

#[derive(Parser)]
#[command(name = "docerina")]
#[command(version = docerina_core::VERSION)]
#[command(about = "API documentation generator for Ballerina packages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate HTML documentation for every package under a source root
    Generate {
        /// A Ballerina source file or a directory of them
        source_root: PathBuf,

        /// Exclude packages starting with this name (a trailing `.*` is ignored)
        package_filter: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    run(cli, &cwd)
}

/// Diagnostics go to stdout; `RUST_LOG` overrides the default `info` level
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();
}

fn run(cli: Cli, cwd: &Path) -> Result<()> {
    let Some(Commands::Generate {
        source_root,
        package_filter,
    }) = cli.command
    else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = DocConfig::load(cwd).context("failed to load docerina.toml")?;
    generate_documentation(&source_root, package_filter.as_deref(), &config)
}

fn generate_documentation(
    source_root: &Path,
    package_filter: Option<&str>,
    config: &DocConfig,
) -> Result<()> {
    let filter = PackageFilter::from(package_filter);
    debug!(
        root = %source_root.display(),
        out = %config.output.dir.display(),
        filter = ?package_filter,
        "generating documentation"
    );
    let report = docerina_core::generate(source_root, &filter, config).with_context(|| {
        format!(
            "failed to generate documentation for '{}'",
            source_root.display()
        )
    })?;

    println!(
        "Documented {} package(s) in {}",
        report.packages.len(),
        config.output.dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_with_filter() {
        let cli = Cli::try_parse_from(["docerina", "generate", "src", "foo.bar.*"]).unwrap();
        match cli.command {
            Some(Commands::Generate {
                source_root,
                package_filter,
            }) => {
                assert_eq!(source_root, PathBuf::from("src"));
                assert_eq!(package_filter.as_deref(), Some("foo.bar.*"));
            }
            None => panic!("expected Generate command"),
        }
    }

    #[test]
    fn parse_generate_without_filter() {
        let cli = Cli::try_parse_from(["docerina", "generate", "src"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Generate {
                package_filter: None,
                ..
            })
        ));
    }

    #[test]
    fn wrong_argument_count_is_not_help() {
        for args in [
            vec!["docerina", "generate"],
            vec!["docerina", "generate", "a", "b", "c"],
            vec!["docerina", "publish"],
        ] {
            let err = Cli::try_parse_from(args).err().unwrap();
            assert!(!matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ));
        }
    }

    #[test]
    fn missing_subcommand_prints_usage() {
        let cli = Cli::try_parse_from(["docerina"]).unwrap();
        let dir = TempDir::new().unwrap();
        run(cli, dir.path()).unwrap();
    }

    #[test]
    fn generate_into_configured_directory() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(
            src.join("a.bal"),
            "package foo.bar;\nstruct Argument { string text; }\n",
        )
        .unwrap();

        let mut config = DocConfig::default();
        config.output.dir = dir.path().join("out");
        generate_documentation(&src, None, &config).unwrap();

        assert!(dir.path().join("out/index.html").exists());
        assert!(dir.path().join("out/foo.bar.html").exists());

        generate_documentation(&src, Some("foo"), &config).unwrap();
        generate_documentation(&src, Some(""), &config).unwrap();
    }

    #[test]
    fn missing_source_root_fails() {
        let dir = TempDir::new().unwrap();
        let mut config = DocConfig::default();
        config.output.dir = dir.path().join("out");
        let err = generate_documentation(&dir.path().join("missing"), None, &config).unwrap_err();
        assert!(err.to_string().contains("failed to generate documentation"));
    }
}
