use std::{io::Write, path::PathBuf};

use anyhow::Result;
use cds501::ExtractEvent;
use clap::Args;

use super::{ReadArgs, open_input, open_output, spinner};

#[derive(Args)]
pub struct AnomaliesArgs {
    /// Path to the extract file
    input: PathBuf,

    /// Only anomalies of this crash
    #[arg(short, long)]
    crash_id: Option<i64>,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    read: ReadArgs,
}

impl AnomaliesArgs {
    pub fn run(self) -> Result<()> {
        let reader = self.read.reader();
        let mut out = open_output(self.output.as_deref())?;
        let pb = spinner(self.input.display().to_string())?;

        reader.for_each_event(open_input(&self.input)?, |event| {
            pb.inc(1);
            let ExtractEvent::Anomaly(anomaly) = event else {
                return Ok(());
            };
            if self.crash_id.is_some_and(|id| id != anomaly.crash_id) {
                return Ok(());
            }
            writeln!(out, "{}\t{anomaly}", anomaly.kind.name())?;
            Ok(())
        })?;

        pb.finish_and_clear();
        out.flush()?;
        Ok(())
    }
}
