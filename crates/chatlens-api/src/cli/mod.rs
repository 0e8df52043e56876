//! CLI command definitions for the `chatlens` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod config;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chat with an assistant about social-media engagement data.
#[derive(Parser)]
#[command(name = "chatlens", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Path to the configuration file (default: ./chatlens.toml).
    #[arg(long, global = true, env = "CHATLENS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(long, short)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file).
        #[arg(long)]
        host: Option<String>,

        /// Directory holding the front-end pages and static assets.
        #[arg(long)]
        web_dir: Option<PathBuf>,
    },

    /// Render JSON records through a template and print the text.
    Render {
        /// Template with `{field}` placeholders.
        #[arg(long, short, default_value = "{text}")]
        template: String,

        /// Separator placed between rendered records.
        #[arg(long, short, default_value = "\n")]
        separator: String,

        /// JSON list or object; `-` reads it from stdin.
        data: String,
    },

    /// Print the effective configuration.
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["chatlens", "-v", "serve", "--port", "8080"]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Serve { port, host, .. } => {
                assert_eq!(port, Some(8080));
                assert!(host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_render_defaults() {
        let cli = Cli::parse_from(["chatlens", "render", r#"[{"text":"a"}]"#]);
        match cli.command {
            Commands::Render {
                template,
                separator,
                data,
            } => {
                assert_eq!(template, "{text}");
                assert_eq!(separator, "\n");
                assert_eq!(data, r#"[{"text":"a"}]"#);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["chatlens", "config", "--json", "--quiet"]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Config));
    }
}
