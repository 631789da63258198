use std::{fs, path::PathBuf};

use anyhow::Result;
use cds501::core::{format_field_defs, schema_for};
use clap::Args;

use crate::format::KindArg;

#[derive(Args)]
pub struct SchemaArgs {
    /// Record kind to describe
    #[arg(short, long, value_enum)]
    kind: KindArg,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let schema = schema_for(self.kind.into());
        let text = format_field_defs(schema.fields())?;

        match self.output {
            Some(path) => fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }
}
