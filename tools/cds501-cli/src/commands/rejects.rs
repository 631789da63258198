use std::{io::Write, path::PathBuf};

use anyhow::Result;
use cds501::{ExtractEvent, core::RecordKind};
use clap::Args;

use super::{ReadArgs, open_input, open_output, spinner};
use crate::format::KindArg;

#[derive(Args)]
pub struct RejectsArgs {
    /// Path to the extract file
    input: PathBuf,

    /// Only lines whose record type is this kind
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,

    /// Print the offending line under each reason
    #[arg(long)]
    raw: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    read: ReadArgs,
}

impl RejectsArgs {
    pub fn run(self) -> Result<()> {
        let reader = self.read.reader();
        let kind = self.kind.map(RecordKind::from);
        let mut out = open_output(self.output.as_deref())?;
        let pb = spinner(self.input.display().to_string())?;

        reader.for_each_event(open_input(&self.input)?, |event| {
            pb.inc(1);
            let ExtractEvent::Rejected(rejected) = event else {
                return Ok(());
            };
            if kind.is_some() && rejected.kind() != kind {
                return Ok(());
            }
            writeln!(out, "{rejected}")?;
            if self.raw {
                writeln!(out, "    {}", rejected.raw)?;
            }
            Ok(())
        })?;

        pb.finish_and_clear();
        out.flush()?;
        Ok(())
    }
}
