//! Render a single AsciiDoc document and print it as JSON.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::CliConfig;
use crate::core::ReaderError;
use crate::metadata::DefaultNormalizer;
use crate::reader::AsciiDocReader;

#[derive(Args)]
pub struct ReadCommand {
    /// AsciiDoc file to read
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

impl ReadCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        if !AsciiDocReader::handles(&self.path) {
            return Err(ReaderError::UnsupportedFile {
                path: self.path.display().to_string(),
            }
            .into());
        }

        let reader = AsciiDocReader::new(config.load_settings().await?);
        let normalizer = DefaultNormalizer::from_settings(reader.settings());

        let page = reader.read(&self.path, &normalizer).await?;
        println!("{}", serde_json::to_string_pretty(&page).map_err(ReaderError::from)?);
        Ok(())
    }
}
