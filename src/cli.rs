//! Minimal CLI: template tree in → YAML schema document out.
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

/// Default location of the template tree.
const DEFAULT_TEMPLATE_PATH: &str = "./templates";
/// Default output file.
const DEFAULT_OUTPUT_PATH: &str = "./unifi.schema.yaml";

/// convert a configuration template tree into a JSON Schema document
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// path to the template tree root
    #[arg(default_value = DEFAULT_TEMPLATE_PATH)]
    path: PathBuf,

    /// path to the output schema file
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        // 1) derive the root fragment
        let root = crate::builder::build_node(&self.path)?;

        // 2) attach title + primitive defs
        let document = crate::defs::into_document(root);

        // 3) serialize & write
        let yaml = serde_yaml::to_string(&document)
            .context("failed to serialize schema document to YAML")?;
        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory `{}`", parent.display())
                })?;
            }
        }
        std::fs::write(&self.output, &yaml)
            .with_context(|| format!("failed to write schema to `{}`", self.output.display()))?;

        Ok(())
    }
}
