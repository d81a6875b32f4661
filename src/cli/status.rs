//! Diagnostic commands: status and schema.

use color_eyre::Result;

use crate::config::Config;
use crate::mcp::protocol::{render, OutputFormat};
use crate::services::NeptuneServer;

use super::App;

impl App {
    /// Print `Available` or `Unavailable`.
    pub async fn run_status(&self) -> Result<()> {
        let config = Config::load()?;
        let server = NeptuneServer::connect(&config).await?;

        println!("{}", server.status().await);
        Ok(())
    }

    /// Print the property-graph schema, or the RDF schema with `--rdf`.
    pub async fn run_schema(&self, rdf: bool, format: OutputFormat) -> Result<()> {
        let config = Config::load()?;
        let server = NeptuneServer::connect(&config).await?;

        let text = if rdf {
            render(server.rdf_schema().await?.as_ref(), format)?
        } else {
            render(server.schema().await?.as_ref(), format)?
        };

        println!("{}", text);
        Ok(())
    }
}
