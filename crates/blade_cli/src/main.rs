//! Blade CLI: renders, compiles and inspects Blade views from the command line.
//!
//! Provides `blade render` for rendering a view with JSON data, `blade compile`
//! and `blade translate` for inspecting translated output, and `blade cache` for
//! managing compiled artifacts.

#![warn(missing_docs)]

mod cache;
mod compile;
mod logging;
mod project;
mod render;
mod translate;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

/// Blade, a view renderer with a compiled-artifact cache.
#[derive(Parser, Debug)]
#[command(name = "blade", version, about = "Blade view renderer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to `blade.toml` or the directory holding it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a view and print the output.
    Render(RenderArgs),
    /// Print the translated text of a view, refreshing its artifact.
    Compile(CompileArgs),
    /// Translate a single file without touching the cache.
    Translate(TranslateArgs),
    /// Inspect or clear compiled artifacts.
    Cache {
        /// The cache action.
        #[command(subcommand)]
        command: CacheCommand,
    },
}

/// Arguments for the `blade render` subcommand.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Dot-separated view name (e.g., `pages.home`).
    pub name: String,

    /// JSON file holding an object of render data.
    #[arg(short, long)]
    pub data: Option<String>,

    /// Extra data as `key=value`; values are parsed as JSON when possible.
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

/// Arguments for the `blade compile` subcommand.
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Dot-separated view name.
    pub name: String,
}

/// Arguments for the `blade translate` subcommand.
#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Path of the Blade source file.
    pub file: PathBuf,
}

/// `blade cache` actions.
#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Delete every compiled artifact.
    Clear,
    /// Report whether a view's artifact is fresh or stale.
    Status {
        /// Dot-separated view name.
        name: String,
    },
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to `blade.toml` or its directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    logging::init_tracing(&global);

    let result = match cli.command {
        Command::Render(ref args) => render::run(args, &global),
        Command::Compile(ref args) => compile::run(args, &global),
        Command::Translate(ref args) => translate::run(args, &global),
        Command::Cache { ref command } => cache::run(command, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_render_minimal() {
        let cli = Cli::parse_from(["blade", "render", "home"]);
        match cli.command {
            Command::Render(ref args) => {
                assert_eq!(args.name, "home");
                assert!(args.data.is_none());
                assert!(args.set.is_empty());
            }
            _ => panic!("expected Render command"),
        }
    }

    #[test]
    fn parse_render_with_data() {
        let cli = Cli::parse_from([
            "blade",
            "render",
            "pages.home",
            "--data",
            "data.json",
            "--set",
            "Name=Ben",
            "-s",
            "IsAdmin=true",
        ]);
        match cli.command {
            Command::Render(ref args) => {
                assert_eq!(args.name, "pages.home");
                assert_eq!(args.data.as_deref(), Some("data.json"));
                assert_eq!(args.set, vec!["Name=Ben", "IsAdmin=true"]);
            }
            _ => panic!("expected Render command"),
        }
    }

    #[test]
    fn parse_compile() {
        let cli = Cli::parse_from(["blade", "compile", "admin.users"]);
        match cli.command {
            Command::Compile(ref args) => assert_eq!(args.name, "admin.users"),
            _ => panic!("expected Compile command"),
        }
    }

    #[test]
    fn parse_translate() {
        let cli = Cli::parse_from(["blade", "translate", "views/home.blade"]);
        match cli.command {
            Command::Translate(ref args) => {
                assert_eq!(args.file, PathBuf::from("views/home.blade"));
            }
            _ => panic!("expected Translate command"),
        }
    }

    #[test]
    fn parse_cache_clear() {
        let cli = Cli::parse_from(["blade", "cache", "clear"]);
        assert!(matches!(
            cli.command,
            Command::Cache {
                command: CacheCommand::Clear
            }
        ));
    }

    #[test]
    fn parse_cache_status() {
        let cli = Cli::parse_from(["blade", "cache", "status", "home"]);
        match cli.command {
            Command::Cache {
                command: CacheCommand::Status { ref name },
            } => assert_eq!(name, "home"),
            _ => panic!("expected Cache Status command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["blade", "--quiet", "--config", "site", "compile", "home"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("site"));
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::parse_from(["blade", "render", "home", "--verbose"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["blade"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
