//! CLI module for the Neptune MCP server.
//!
//! Subcommands:
//! - `mcp`: Run the MCP server (stdio transport, default)
//! - `status`: Print whether the graph is reachable
//! - `schema`: Print the property-graph or RDF schema

mod mcp;
mod status;

use clap::{Parser, Subcommand};

use crate::mcp::protocol::OutputFormat;

/// Amazon Neptune MCP server
#[derive(Parser)]
#[command(name = "neptune-mcp")]
#[command(about = "MCP server for Amazon Neptune - graph status, schema and queries")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the MCP server (stdio transport)
    Mcp,

    /// Check whether the configured graph is reachable
    Status,

    /// Print the graph schema
    Schema {
        /// Print the RDF schema instead of the property-graph schema
        #[arg(long)]
        rdf: bool,

        /// Output format (json or toon)
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            None | Some(Command::Mcp) => self.run_mcp().await,
            Some(Command::Status) => self.run_status().await,
            Some(Command::Schema { rdf, format }) => self.run_schema(rdf, format).await,
        }
    }
}
