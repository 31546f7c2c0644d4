//! Report the installed AsciiDoc converter.

use anyhow::Result;
use clap::Args;

use crate::converter;
use crate::core::ReaderError;

#[derive(Args)]
pub struct ProbeCommand {}

impl ProbeCommand {
    pub async fn execute(self) -> Result<()> {
        let found = converter::detected_converter().await;
        if found.is_none() {
            let tried = converter::CANDIDATES.join(", ");
            tracing::info!("No AsciiDoc converter found (tried: {tried})");
        }
        println!("{}", serde_json::to_string_pretty(&found).map_err(ReaderError::from)?);
        Ok(())
    }
}
