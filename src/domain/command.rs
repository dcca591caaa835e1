//! Command-line surface

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Main CLI application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct NumoCli {
    /// Config file to use instead of the per-user one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Subcommands
    #[command(subcommand)]
    pub command: NumoCliCommand
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum NumoCliCommand {
    /// Translate a page description and print the result
    Render {
        /// Page file (.yaml, .yml or .json)
        page:   PathBuf,
        /// Render in this language without touching the stored preference
        #[arg(long)]
        lang:   Option<String>,
        #[arg(long, value_enum, default_value_t = RenderFormat::Html)]
        format: RenderFormat
    },
    /// Language preference commands
    Lang {
        #[command(subcommand)]
        command: LangCommands
    },
    /// Report keys missing from any language table
    Check
}

/// Language management subcommands
#[derive(Subcommand, Debug)]
pub enum LangCommands {
    /// Store the preferred language
    Set {
        /// Language code (e.g., 'en', 'fr')
        language: String
    },
    /// Show the stored language
    Current,
    /// List languages the catalog provides
    List
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Serialized markup
    Html,
    /// Translation report as JSON
    Report
}
