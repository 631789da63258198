//! Links decoded lines into crash → vehicle → participant relations.
//!
//! The extract is emitted in nested order: a crash line, then its vehicle
//! lines, then its participant lines, then the next crash. The [`Assembler`]
//! keeps only the open crash and the vehicles seen under it, so memory is
//! bounded by the size of one crash regardless of input length.

use std::collections::{HashMap, VecDeque};

use cds501_core::RecordKind;

use crate::{
    anomaly::{Anomaly, AnomalyKind},
    decoder::{decode_line, line_kind},
    error::{LineError, RejectedLine},
    extract::{Extract, LinearExtract},
    policy::{AssemblerOptions, BlankLinePolicy, CountCheckPolicy},
    record::{CrashRecord, DecodedRecord, ParticipantRecord, VehicleRecord},
};

/// A crash with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crash {
    pub line: usize,
    pub record: CrashRecord,
}

/// A vehicle linked to its crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub line: usize,
    /// Index into [`Extract::crashes`].
    pub crash: usize,
    pub record: VehicleRecord,
}

/// A participant linked to its crash and, for occupants, its vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub line: usize,
    /// Index into [`Extract::crashes`].
    pub crash: usize,
    /// Index into [`Extract::vehicles`]; `None` for non-motorists and for
    /// participants whose vehicle could not be resolved.
    pub vehicle: Option<usize>,
    pub record: ParticipantRecord,
}

/// A linked record in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembledRecord {
    Crash(Crash),
    Vehicle(Vehicle),
    Participant(Participant),
}

impl AssembledRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            AssembledRecord::Crash(_) => RecordKind::Crash,
            AssembledRecord::Vehicle(_) => RecordKind::Vehicle,
            AssembledRecord::Participant(_) => RecordKind::Participant,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            AssembledRecord::Crash(c) => c.line,
            AssembledRecord::Vehicle(v) => v.line,
            AssembledRecord::Participant(p) => p.line,
        }
    }

    pub fn crash_id(&self) -> i64 {
        match self {
            AssembledRecord::Crash(c) => c.record.crash_id(),
            AssembledRecord::Vehicle(v) => v.record.crash_id(),
            AssembledRecord::Participant(p) => p.record.crash_id(),
        }
    }
}

/// Everything the assembler reports, in the order the input produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractEvent {
    Record(AssembledRecord),
    Rejected(RejectedLine),
    Anomaly(Anomaly),
}

struct CrashContext {
    index: usize,
    line: usize,
    crash_id: i64,
    declared_vehicles: Option<i64>,
    declared_participants: Option<i64>,
    vehicles: HashMap<i64, usize>,
    current_vehicle: Option<(i64, usize)>,
    vehicle_count: usize,
    participant_count: usize,
}

impl CrashContext {
    fn resolve_vehicle(&self, vehicle_id: i64) -> Option<usize> {
        match self.current_vehicle {
            Some((id, index)) if id == vehicle_id => Some(index),
            _ => self.vehicles.get(&vehicle_id).copied(),
        }
    }
}

/// Incremental line-by-line linker.
///
/// Feed lines with [`push_line`](Self::push_line) and call
/// [`finish`](Self::finish) once the input is exhausted. Events are appended
/// to any [`Extend`] sink in source order.
pub struct Assembler {
    options: AssemblerOptions,
    context: Option<CrashContext>,
    line: usize,
    crashes: usize,
    vehicles: usize,
    participants: usize,
}

impl Assembler {
    pub fn new() -> Self {
        Self::with_options(AssemblerOptions::default())
    }

    pub fn with_options(options: AssemblerOptions) -> Self {
        Self {
            options,
            context: None,
            line: 0,
            crashes: 0,
            vehicles: 0,
            participants: 0,
        }
    }

    pub fn options(&self) -> AssemblerOptions {
        self.options
    }

    /// Number of physical lines consumed so far, blank lines included.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Decode and link the next physical line.
    pub fn push_line<E>(&mut self, line: &str, out: &mut E)
    where
        E: Extend<ExtractEvent>,
    {
        self.line += 1;
        let line_no = self.line;
        let line = if line_no == 1 {
            line.strip_prefix('\u{feff}').unwrap_or(line)
        } else {
            line
        };
        if line.trim().is_empty() && self.options.blank_lines == BlankLinePolicy::Skip {
            return;
        }

        match decode_line(line) {
            Ok(DecodedRecord::Crash(record)) => self.open_crash(line_no, record, out),
            Ok(DecodedRecord::Vehicle(record)) => self.attach_vehicle(line_no, line, record, out),
            Ok(DecodedRecord::Participant(record)) => {
                self.attach_participant(line_no, line, record, out)
            }
            Err(error) => {
                // A broken crash line still ends the previous crash.
                if line_kind(line) == Some(RecordKind::Crash) {
                    self.close_crash(out);
                }
                reject(line_no, line, error, out)
            }
        }
    }

    /// Close the last crash. Further lines start from a clean state.
    pub fn finish<E>(&mut self, out: &mut E)
    where
        E: Extend<ExtractEvent>,
    {
        self.close_crash(out);
    }

    fn open_crash<E>(&mut self, line: usize, record: CrashRecord, out: &mut E)
    where
        E: Extend<ExtractEvent>,
    {
        self.close_crash(out);
        self.context = Some(CrashContext {
            index: self.crashes,
            line,
            crash_id: record.crash_id(),
            declared_vehicles: record.declared_vehicle_count(),
            declared_participants: record.declared_participant_count(),
            vehicles: HashMap::new(),
            current_vehicle: None,
            vehicle_count: 0,
            participant_count: 0,
        });
        self.crashes += 1;
        out.extend([ExtractEvent::Record(AssembledRecord::Crash(Crash {
            line,
            record,
        }))]);
    }

    fn attach_vehicle<E>(&mut self, line: usize, raw: &str, record: VehicleRecord, out: &mut E)
    where
        E: Extend<ExtractEvent>,
    {
        let context = match open_context(&mut self.context, RecordKind::Vehicle, record.crash_id())
        {
            Ok(context) => context,
            Err(error) => return reject(line, raw, error, out),
        };

        let index = self.vehicles;
        self.vehicles += 1;
        let vehicle_id = record.vehicle_id();
        let duplicate = context.vehicles.insert(vehicle_id, index).is_some();
        context.current_vehicle = Some((vehicle_id, index));
        context.vehicle_count += 1;
        let (crash, crash_id) = (context.index, context.crash_id);

        out.extend([ExtractEvent::Record(AssembledRecord::Vehicle(Vehicle {
            line,
            crash,
            record,
        }))]);
        if duplicate {
            observe(
                Anomaly {
                    line,
                    crash_id,
                    crash,
                    kind: AnomalyKind::DuplicateVehicle { vehicle_id },
                },
                out,
            );
        }
    }

    fn attach_participant<E>(
        &mut self,
        line: usize,
        raw: &str,
        record: ParticipantRecord,
        out: &mut E,
    ) where
        E: Extend<ExtractEvent>,
    {
        let context = match open_context(
            &mut self.context,
            RecordKind::Participant,
            record.crash_id(),
        ) {
            Ok(context) => context,
            Err(error) => return reject(line, raw, error, out),
        };

        let mut unresolved = None;
        let vehicle = record.vehicle_id().and_then(|vehicle_id| {
            let resolved = context.resolve_vehicle(vehicle_id);
            if resolved.is_none() {
                unresolved = Some(AnomalyKind::UnresolvedVehicle {
                    participant_id: record.participant_id(),
                    vehicle_id,
                });
            }
            resolved
        });
        context.participant_count += 1;
        let (crash, crash_id) = (context.index, context.crash_id);
        self.participants += 1;

        out.extend([ExtractEvent::Record(AssembledRecord::Participant(
            Participant {
                line,
                crash,
                vehicle,
                record,
            },
        ))]);
        if let Some(kind) = unresolved {
            observe(
                Anomaly {
                    line,
                    crash_id,
                    crash,
                    kind,
                },
                out,
            );
        }
    }

    fn close_crash<E>(&mut self, out: &mut E)
    where
        E: Extend<ExtractEvent>,
    {
        let Some(context) = self.context.take() else {
            return;
        };
        if self.options.count_check == CountCheckPolicy::Ignore {
            return;
        }

        let anomaly = |kind| Anomaly {
            line: context.line,
            crash_id: context.crash_id,
            crash: context.index,
            kind,
        };
        if let Some(declared) = context.declared_vehicles
            && declared != context.vehicle_count as i64
        {
            observe(
                anomaly(AnomalyKind::VehicleCountMismatch {
                    declared,
                    observed: context.vehicle_count,
                }),
                out,
            );
        }
        if let Some(declared) = context.declared_participants
            && declared != context.participant_count as i64
        {
            observe(
                anomaly(AnomalyKind::ParticipantCountMismatch {
                    declared,
                    observed: context.participant_count,
                }),
                out,
            );
        }
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

fn open_context(
    context: &mut Option<CrashContext>,
    kind: RecordKind,
    crash_id: i64,
) -> Result<&mut CrashContext, LineError> {
    match context {
        None => Err(LineError::NoCrashContext { kind, crash_id }),
        Some(context) if context.crash_id != crash_id => Err(LineError::CrashMismatch {
            kind,
            expected: context.crash_id,
            found: crash_id,
        }),
        Some(context) => Ok(context),
    }
}

fn reject<E>(line: usize, raw: &str, error: LineError, out: &mut E)
where
    E: Extend<ExtractEvent>,
{
    tracing::debug!(line, error = %error, "rejected extract line");
    out.extend([ExtractEvent::Rejected(RejectedLine {
        line,
        raw: raw.trim_end_matches(['\r', '\n']).to_string(),
        error,
    })]);
}

fn observe<E>(anomaly: Anomaly, out: &mut E)
where
    E: Extend<ExtractEvent>,
{
    tracing::debug!(
        line = anomaly.line,
        crash_id = anomaly.crash_id,
        anomaly = %anomaly.kind,
        "extract anomaly"
    );
    out.extend([ExtractEvent::Anomaly(anomaly)]);
}

/// Lazy event stream over an iterator of lines.
///
/// Pulls one line at a time; no more than one line's events are buffered.
pub struct ExtractEvents<I> {
    lines: I,
    assembler: Assembler,
    pending: VecDeque<ExtractEvent>,
    finished: bool,
}

impl<I> ExtractEvents<I> {
    /// Number of lines pulled from the input so far.
    pub fn line_number(&self) -> usize {
        self.assembler.line_number()
    }
}

impl<I, S> Iterator for ExtractEvents<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = ExtractEvent;

    fn next(&mut self) -> Option<ExtractEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.finished {
                return None;
            }
            match self.lines.next() {
                Some(line) => self.assembler.push_line(line.as_ref(), &mut self.pending),
                None => {
                    self.assembler.finish(&mut self.pending);
                    self.finished = true;
                }
            }
        }
    }
}

/// Stream events for `lines` with default options.
pub fn events<I>(lines: I) -> ExtractEvents<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    events_with_options(lines, AssemblerOptions::default())
}

pub fn events_with_options<I>(lines: I, options: AssemblerOptions) -> ExtractEvents<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    ExtractEvents {
        lines: lines.into_iter(),
        assembler: Assembler::with_options(options),
        pending: VecDeque::new(),
        finished: false,
    }
}

/// Decode and link every line into per-kind relations.
pub fn process<I>(lines: I) -> Extract
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    events(lines).collect()
}

/// Like [`process`], but keeps all record kinds in one source-ordered sequence.
pub fn process_linear<I>(lines: I) -> LinearExtract
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    events(lines).collect()
}
