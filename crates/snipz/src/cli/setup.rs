use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "snipz",
    bin_name = "snipz",
    version,
    disable_help_subcommand = true,
    about = "Folder-organized text snippets from the command line",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Print API responses as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the snippet tree with indexes
    #[command(alias = "ls")]
    List,

    /// Create a snippet
    #[command(alias = "n")]
    Create {
        name: String,

        /// Snippet body; read from stdin when omitted
        body: Option<String>,

        /// Folder path, e.g. "Work/Mail" ("/" or omitted for the root)
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// Rename, rewrite or move a snippet
    Edit {
        /// Exact snippet name
        snippet: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New body
        #[arg(short, long)]
        body: Option<String>,

        /// Destination folder path ("/" for the root)
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// Delete a snippet
    #[command(alias = "rm")]
    Delete {
        /// Exact snippet name
        snippet: String,
    },

    /// Create a folder
    Mkdir {
        name: String,

        /// Parent folder path
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// Search snippet names and bodies
    Search { term: String },

    /// Write the stored document to stdout or a file
    Export {
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show configuration
    Config {
        /// Print a commented snipz.toml with every key
        #[arg(long)]
        template: bool,
    },

    /// Handle one JSON message (same shape a UI client sends); prints the response
    Message {
        /// JSON object with an "action" field; read from stdin when omitted
        #[arg(id = "message_json", value_name = "JSON")]
        json: Option<String>,
    },
}

/// Splits "Work/Mail" into folder names. "/" and "" mean the root.
pub fn parse_folder_path(raw: &str) -> Vec<String> {
    raw.split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
