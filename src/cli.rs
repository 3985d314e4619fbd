//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_CHAT_URL: &str = "http://localhost:8000";
pub const DEFAULT_DIAGNOSTIC_QUERY: &str = "Summarize the main topics covered in these documents.";

/// Skycast, a conversational weather assistant
#[derive(Parser, Debug)]
#[command(name = "skycast", version, about)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Override the configured port
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,
    },
    /// Chat with a running server from the terminal
    Chat {
        /// Base URL of the server
        #[arg(long = "url", default_value = DEFAULT_CHAT_URL)]
        url: String,
    },
    /// Run one file-search call and print the outcome
    DiagnoseKnowledge {
        #[arg(short = 'q', long = "query", default_value = DEFAULT_DIAGNOSTIC_QUERY)]
        query: String,
    },
}

impl Cli {
    /// Subcommand to run, `serve` when none is given
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Serve { port: None })
    }
}
