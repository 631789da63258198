//! Referential and count inconsistencies observed while linking records.

use std::fmt::{self, Display, Formatter};

/// A data-quality observation that does not exclude any record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    /// Line of the record the observation is about. Count mismatches point at
    /// the crash line.
    pub line: usize,
    pub crash_id: i64,
    /// Index of the affected crash in [`Extract::crashes`](crate::Extract::crashes).
    pub crash: usize,
    pub kind: AnomalyKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnomalyKind {
    /// A participant names a vehicle that was not seen in its crash.
    UnresolvedVehicle { participant_id: i64, vehicle_id: i64 },
    /// A vehicle id repeats within one crash; later participants resolve to the latest one.
    DuplicateVehicle { vehicle_id: i64 },
    /// `tot_vhcl_cnt` disagrees with the vehicles attached to the crash.
    VehicleCountMismatch { declared: i64, observed: usize },
    /// `tot_per_invlv_cnt` disagrees with the participants attached to the crash.
    ParticipantCountMismatch { declared: i64, observed: usize },
}

impl AnomalyKind {
    pub fn name(&self) -> &'static str {
        match self {
            AnomalyKind::UnresolvedVehicle { .. } => "unresolved-vehicle",
            AnomalyKind::DuplicateVehicle { .. } => "duplicate-vehicle",
            AnomalyKind::VehicleCountMismatch { .. } => "vehicle-count-mismatch",
            AnomalyKind::ParticipantCountMismatch { .. } => "participant-count-mismatch",
        }
    }
}

impl Display for AnomalyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyKind::UnresolvedVehicle {
                participant_id,
                vehicle_id,
            } => write!(
                f,
                "participant {participant_id} references unknown vehicle {vehicle_id}"
            ),
            AnomalyKind::DuplicateVehicle { vehicle_id } => {
                write!(f, "vehicle {vehicle_id} appears more than once")
            }
            AnomalyKind::VehicleCountMismatch { declared, observed } => {
                write!(f, "declares {declared} vehicles, found {observed}")
            }
            AnomalyKind::ParticipantCountMismatch { declared, observed } => {
                write!(f, "declares {declared} participants, found {observed}")
            }
        }
    }
}

impl Display for Anomaly {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "line {} (crash {}): {}", self.line, self.crash_id, self.kind)
    }
}
