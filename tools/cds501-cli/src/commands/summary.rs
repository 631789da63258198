use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use cds501::ExtractSummary;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use super::{ReadArgs, open_input, open_output};

#[derive(Args)]
pub struct SummaryArgs {
    /// Paths to extract files; several files are read in parallel
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    read: ReadArgs,
}

impl SummaryArgs {
    pub fn run(self) -> Result<()> {
        let reader = self.read.reader();

        let pb = ProgressBar::new(self.inputs.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files",
            )?
            .progress_chars("=>-"),
        );

        let summaries: Vec<Result<ExtractSummary>> = self
            .inputs
            .par_iter()
            .map(|path| {
                let summary = reader
                    .for_each_event(open_input(path)?, |_| Ok(()))
                    .with_context(|| format!("reading {}", path.display()))?;
                pb.inc(1);
                Ok(summary)
            })
            .collect();
        pb.finish_and_clear();

        let mut out = open_output(None)?;
        writeln!(
            out,
            "{:<40} {:>8} {:>8} {:>12} {:>8} {:>9}",
            "file", "crashes", "vehicles", "participants", "rejected", "anomalies"
        )?;
        let mut total = ExtractSummary::default();
        for (path, summary) in self.inputs.iter().zip(summaries) {
            let summary = summary?;
            total = total.merge(summary);
            write_row(&mut out, &path.display().to_string(), &summary)?;
        }
        if self.inputs.len() > 1 {
            write_row(&mut out, "total", &total)?;
        }
        out.flush()?;
        Ok(())
    }
}

fn write_row(out: &mut impl Write, name: &str, summary: &ExtractSummary) -> Result<()> {
    writeln!(
        out,
        "{:<40} {:>8} {:>8} {:>12} {:>8} {:>9}",
        name,
        summary.crashes,
        summary.vehicles,
        summary.participants,
        summary.rejected,
        summary.anomalies
    )?;
    Ok(())
}
