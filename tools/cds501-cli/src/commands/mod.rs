use std::{
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use cds501::{BlankLinePolicy, CountCheckPolicy, ExtractReader};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

pub mod anomalies;
pub mod rejects;
pub mod schema;
pub mod summary;

/// Line-handling flags shared by every command that reads an extract.
#[derive(Args)]
pub struct ReadArgs {
    /// Report blank lines as rejects instead of skipping them
    #[arg(long)]
    reject_blank_lines: bool,

    /// Do not compare declared vehicle and participant totals
    #[arg(long)]
    no_count_check: bool,
}

impl ReadArgs {
    pub fn reader(&self) -> ExtractReader {
        let blank_lines = if self.reject_blank_lines {
            BlankLinePolicy::Reject
        } else {
            BlankLinePolicy::Skip
        };
        let count_check = if self.no_count_check {
            CountCheckPolicy::Ignore
        } else {
            CountCheckPolicy::Observe
        };
        ExtractReader::builder()
            .with_blank_lines(blank_lines)
            .with_count_check(count_check)
            .build()
    }
}

/// Output file, or stdout when `None`.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            fs::File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

pub fn open_input(path: &Path) -> Result<io::BufReader<fs::File>> {
    let file = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(io::BufReader::new(file))
}

pub fn spinner(message: String) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {msg}: {pos} events ({per_sec})",
    )?);
    pb.set_message(message);
    Ok(pb)
}
