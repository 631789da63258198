//! Collected results of processing an extract.

use cds501_core::RecordKind;

use crate::{
    anomaly::Anomaly,
    assembler::{AssembledRecord, Crash, ExtractEvent, Participant, Vehicle},
    error::RejectedLine,
};

/// Record, rejection, and anomaly counts for one extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractSummary {
    pub crashes: usize,
    pub vehicles: usize,
    pub participants: usize,
    pub rejected: usize,
    pub anomalies: usize,
}

impl ExtractSummary {
    pub fn observe(&mut self, event: &ExtractEvent) {
        match event {
            ExtractEvent::Record(AssembledRecord::Crash(_)) => self.crashes += 1,
            ExtractEvent::Record(AssembledRecord::Vehicle(_)) => self.vehicles += 1,
            ExtractEvent::Record(AssembledRecord::Participant(_)) => self.participants += 1,
            ExtractEvent::Rejected(_) => self.rejected += 1,
            ExtractEvent::Anomaly(_) => self.anomalies += 1,
        }
    }

    pub fn records(&self) -> usize {
        self.crashes + self.vehicles + self.participants
    }

    pub fn relation(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Crash => self.crashes,
            RecordKind::Vehicle => self.vehicles,
            RecordKind::Participant => self.participants,
        }
    }

    /// Sum two summaries, e.g. across files.
    pub fn merge(self, other: Self) -> Self {
        Self {
            crashes: self.crashes + other.crashes,
            vehicles: self.vehicles + other.vehicles,
            participants: self.participants + other.participants,
            rejected: self.rejected + other.rejected,
            anomalies: self.anomalies + other.anomalies,
        }
    }
}

/// Three source-ordered relations plus the side channels.
///
/// Vehicles and participants refer to their crash and vehicle by index into
/// [`crashes`](Self::crashes) and [`vehicles`](Self::vehicles).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extract {
    pub crashes: Vec<Crash>,
    pub vehicles: Vec<Vehicle>,
    pub participants: Vec<Participant>,
    pub rejected: Vec<RejectedLine>,
    pub anomalies: Vec<Anomaly>,
}

impl Extract {
    pub fn push(&mut self, event: ExtractEvent) {
        match event {
            ExtractEvent::Record(AssembledRecord::Crash(c)) => self.crashes.push(c),
            ExtractEvent::Record(AssembledRecord::Vehicle(v)) => self.vehicles.push(v),
            ExtractEvent::Record(AssembledRecord::Participant(p)) => self.participants.push(p),
            ExtractEvent::Rejected(r) => self.rejected.push(r),
            ExtractEvent::Anomaly(a) => self.anomalies.push(a),
        }
    }

    /// `true` if no line produced a record.
    pub fn is_empty(&self) -> bool {
        self.crashes.is_empty() && self.vehicles.is_empty() && self.participants.is_empty()
    }

    /// `true` if every line was accepted and no anomaly was observed.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.anomalies.is_empty()
    }

    pub fn summary(&self) -> ExtractSummary {
        ExtractSummary {
            crashes: self.crashes.len(),
            vehicles: self.vehicles.len(),
            participants: self.participants.len(),
            rejected: self.rejected.len(),
            anomalies: self.anomalies.len(),
        }
    }

    pub fn find_crash(&self, crash_id: i64) -> Option<usize> {
        self.crashes
            .iter()
            .position(|c| c.record.crash_id() == crash_id)
    }

    /// Vehicles of the crash at `crash`, in source order.
    pub fn vehicles_of(&self, crash: usize) -> &[Vehicle] {
        let start = self.vehicles.partition_point(|v| v.crash < crash);
        let end = self.vehicles.partition_point(|v| v.crash <= crash);
        &self.vehicles[start..end]
    }

    /// Participants of the crash at `crash`, in source order.
    pub fn participants_of(&self, crash: usize) -> &[Participant] {
        let start = self.participants.partition_point(|p| p.crash < crash);
        let end = self.participants.partition_point(|p| p.crash <= crash);
        &self.participants[start..end]
    }

    /// Participants linked to the vehicle at `vehicle`.
    pub fn occupants_of(&self, vehicle: usize) -> impl Iterator<Item = &Participant> {
        let crash = self.vehicles.get(vehicle).map(|v| v.crash);
        crash
            .map(|crash| self.participants_of(crash))
            .unwrap_or_default()
            .iter()
            .filter(move |p| p.vehicle == Some(vehicle))
    }

    /// Participants of the crash at `crash` that occupy no vehicle.
    pub fn non_motorists_of(&self, crash: usize) -> impl Iterator<Item = &Participant> {
        self.participants_of(crash)
            .iter()
            .filter(|p| p.record.is_non_motorist())
    }
}

impl Extend<ExtractEvent> for Extract {
    fn extend<T: IntoIterator<Item = ExtractEvent>>(&mut self, iter: T) {
        for event in iter {
            self.push(event);
        }
    }
}

impl FromIterator<ExtractEvent> for Extract {
    fn from_iter<T: IntoIterator<Item = ExtractEvent>>(iter: T) -> Self {
        let mut extract = Extract::default();
        extract.extend(iter);
        extract
    }
}

/// All records in one sequence, in the exact order of the input lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinearExtract {
    pub records: Vec<AssembledRecord>,
    pub rejected: Vec<RejectedLine>,
    pub anomalies: Vec<Anomaly>,
}

impl LinearExtract {
    pub fn push(&mut self, event: ExtractEvent) {
        match event {
            ExtractEvent::Record(r) => self.records.push(r),
            ExtractEvent::Rejected(r) => self.rejected.push(r),
            ExtractEvent::Anomaly(a) => self.anomalies.push(a),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> ExtractSummary {
        let mut summary = ExtractSummary {
            rejected: self.rejected.len(),
            anomalies: self.anomalies.len(),
            ..ExtractSummary::default()
        };
        for record in &self.records {
            match record.kind() {
                RecordKind::Crash => summary.crashes += 1,
                RecordKind::Vehicle => summary.vehicles += 1,
                RecordKind::Participant => summary.participants += 1,
            }
        }
        summary
    }

    /// Split into per-kind relations. Indices carried by the records stay valid.
    pub fn into_extract(self) -> Extract {
        let mut extract = Extract {
            rejected: self.rejected,
            anomalies: self.anomalies,
            ..Extract::default()
        };
        for record in self.records {
            extract.push(ExtractEvent::Record(record));
        }
        extract
    }
}

impl Extend<ExtractEvent> for LinearExtract {
    fn extend<T: IntoIterator<Item = ExtractEvent>>(&mut self, iter: T) {
        for event in iter {
            self.push(event);
        }
    }
}

impl FromIterator<ExtractEvent> for LinearExtract {
    fn from_iter<T: IntoIterator<Item = ExtractEvent>>(iter: T) -> Self {
        let mut extract = LinearExtract::default();
        extract.extend(iter);
        extract
    }
}

impl From<LinearExtract> for Extract {
    fn from(value: LinearExtract) -> Self {
        value.into_extract()
    }
}
