mod commands;
mod logging;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vdb-site")]
#[command(version, about = "Static landing page generator for the Self-Healing Vector DB", long_about = None)]
struct Cli {
    /// Path to site.toml (defaults to ./site.toml, built-in theme if absent)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Create a project directory with a default site.toml
    Init {
        /// Path to create project directory
        path: PathBuf,
    },

    /// Build site without serving it
    Build {
        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Preview site locally with hot reload
    Preview {
        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Check that content paths cover every file with style classes
    Check {
        /// Project root the content paths are relative to
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Print the theme configuration as JSON for external styling tools
    Theme,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::setup_console_logging(&cli.log_level)?;

    let config = cli.config;
    match cli.command {
        Command::Init { path } => commands::init::run(path).await,
        Command::Build { output } => commands::build::run(config, output).await,
        Command::Preview { port } => commands::preview::run(config, port).await,
        Command::Check { root } => commands::check::run(config, root).await,
        Command::Theme => commands::theme::run(config).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "vdb-site", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["vdb-site", "build", "-o", "dist", "--config", "alt.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert_eq!(cli.log_level, "warn");
        match cli.command {
            Command::Build { output } => assert_eq!(output, PathBuf::from("dist")),
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_parse_preview_default_port() {
        let cli = Cli::try_parse_from(["vdb-site", "preview"]).unwrap();
        match cli.command {
            Command::Preview { port } => assert_eq!(port, 8080),
            _ => panic!("expected preview"),
        }
    }
}
