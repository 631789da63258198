//! Extract reader over any [`BufRead`] source.

use std::{
    collections::VecDeque,
    fs,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    assembler::{Assembler, ExtractEvent, events_with_options},
    error::ExtractError,
    extract::{Extract, ExtractSummary, LinearExtract},
    policy::{AssemblerOptions, BlankLinePolicy, CountCheckPolicy},
};

/// Reads delimited CDS501 lines and links them into relations.
///
/// Malformed lines and referential problems are reported as events and never
/// stop the read; only I/O and callback failures surface as [`ExtractError`].
#[derive(Debug, Clone, Default)]
pub struct ExtractReader {
    options: AssemblerOptions,
}

/// Builder for configuring [`ExtractReader`].
#[derive(Debug, Clone, Default)]
pub struct ExtractReaderBuilder {
    options: AssemblerOptions,
}

/// Event stream of one reader. Stops after the first I/O error.
pub struct ReaderEvents<R> {
    reader: R,
    buf: Vec<u8>,
    assembler: Assembler,
    pending: VecDeque<ExtractEvent>,
    finished: bool,
}

impl ExtractReader {
    /// Create a builder for [`ExtractReader`].
    pub fn builder() -> ExtractReaderBuilder {
        ExtractReaderBuilder::default()
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> AssemblerOptions {
        self.options
    }

    /// Lazily decode and link lines from `reader`.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than failing the read.
    pub fn events<R: BufRead>(&self, reader: R) -> ReaderEvents<R> {
        ReaderEvents {
            reader,
            buf: Vec::new(),
            assembler: Assembler::with_options(self.options),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Pass every event to `callback` in source order and return the totals.
    pub fn for_each_event<R: BufRead>(
        &self,
        reader: R,
        mut callback: impl FnMut(ExtractEvent) -> Result<(), Box<dyn std::error::Error + Send + Sync>>,
    ) -> Result<ExtractSummary, ExtractError> {
        let mut summary = ExtractSummary::default();
        let mut events = self.events(reader);
        for event in &mut events {
            let event = event?;
            summary.observe(&event);
            callback(event).map_err(ExtractError::Callback)?;
        }
        log_summary(events.line_number(), &summary);
        Ok(summary)
    }

    pub fn read<R: BufRead>(&self, reader: R) -> Result<Extract, ExtractError> {
        let mut extract = Extract::default();
        self.for_each_event(reader, |event| {
            extract.push(event);
            Ok(())
        })?;
        Ok(extract)
    }

    pub fn read_linear<R: BufRead>(&self, reader: R) -> Result<LinearExtract, ExtractError> {
        let mut extract = LinearExtract::default();
        self.for_each_event(reader, |event| {
            extract.push(event);
            Ok(())
        })?;
        Ok(extract)
    }

    /// Open and read the extract file at `path`.
    pub fn read_path(&self, path: &Path) -> Result<Extract, ExtractError> {
        let file = fs::File::open(path).map_err(|source| ExtractError::Open {
            path: path.display().to_string(),
            source,
        })?;
        self.read(BufReader::new(file))
    }

    /// Process in-memory extract text.
    pub fn process_str(&self, text: &str) -> Extract {
        events_with_options(text.lines(), self.options).collect()
    }
}

impl ExtractReaderBuilder {
    /// Set how blank lines are handled (default: skipped).
    pub fn with_blank_lines(mut self, policy: BlankLinePolicy) -> Self {
        self.options.blank_lines = policy;
        self
    }

    /// Set whether declared crash totals are checked (default: observed).
    pub fn with_count_check(mut self, policy: CountCheckPolicy) -> Self {
        self.options.count_check = policy;
        self
    }

    pub fn with_options(mut self, options: AssemblerOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the reader.
    pub fn build(self) -> ExtractReader {
        ExtractReader {
            options: self.options,
        }
    }
}

impl<R> ReaderEvents<R> {
    /// Number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.assembler.line_number()
    }
}

impl<R: BufRead> Iterator for ReaderEvents<R> {
    type Item = Result<ExtractEvent, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.finished {
                return None;
            }

            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.assembler.finish(&mut self.pending);
                    self.finished = true;
                }
                Ok(_) => {
                    let line = String::from_utf8_lossy(&self.buf);
                    self.assembler.push_line(&line, &mut self.pending);
                }
                Err(source) => {
                    self.finished = true;
                    return Some(Err(ExtractError::Io {
                        line: self.assembler.line_number() + 1,
                        source,
                    }));
                }
            }
        }
    }
}

fn log_summary(lines: usize, summary: &ExtractSummary) {
    if lines > 0 && summary.records() == 0 {
        tracing::warn!(
            lines,
            rejected = summary.rejected,
            "extract produced no records"
        );
    }
    tracing::info!(
        lines,
        crashes = summary.crashes,
        vehicles = summary.vehicles,
        participants = summary.participants,
        rejected = summary.rejected,
        anomalies = summary.anomalies,
        "extract processed"
    );
}
