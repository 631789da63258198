//! Typed, immutable records produced by [`decode_line`](crate::decode_line).

use std::{ops::Deref, sync::Arc};

use cds501_core::{FieldDef, RecordKind, RecordSchema, Value, encode_value, schema_for};
use chrono::{NaiveDate, NaiveDateTime};

/// Positional values of one decoded line, including the discriminator at position 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    kind: RecordKind,
    values: Arc<[Value]>,
}

impl Row {
    pub(crate) fn new(kind: RecordKind, values: Vec<Value>) -> Self {
        Self {
            kind,
            values: values.into(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn schema(&self) -> &'static RecordSchema {
        schema_for(self.kind)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value_at(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// Look up a field by name; `None` if the field does not belong to this kind.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema()
            .position(name)
            .and_then(|position| self.values.get(position))
    }

    /// Every field definition paired with its decoded value, in position order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldDef, &Value)> {
        self.schema().fields().iter().zip(self.values.iter())
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|v| v.try_int().ok().flatten())
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.try_str().ok().flatten())
    }

    /// Canonical line text: comma-joined [`encode_value`] output.
    pub fn encode(&self) -> String {
        self.fields()
            .map(|(field, value)| encode_value(value, field))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn required_int(&self, name: &str) -> i64 {
        match self.int(name) {
            Some(v) => v,
            None => unreachable!("required field '{name}' decoded without a value"),
        }
    }
}

/// One crash case (`rec_typ_cd = 1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashRecord {
    crash_id: i64,
    row: Row,
}

impl CrashRecord {
    pub(crate) fn from_row(row: Row) -> Self {
        Self {
            crash_id: row.required_int("crash_id"),
            row,
        }
    }

    pub fn crash_id(&self) -> i64 {
        self.crash_id
    }

    /// `tot_vhcl_cnt` as reported by the data provider.
    pub fn declared_vehicle_count(&self) -> Option<i64> {
        self.row.int("tot_vhcl_cnt")
    }

    /// `tot_per_invlv_cnt` as reported by the data provider.
    pub fn declared_participant_count(&self) -> Option<i64> {
        self.row.int("tot_per_invlv_cnt")
    }

    /// Calendar date assembled from `crash_yr_no`, `crash_mo_no` and `crash_day_no`.
    pub fn crash_date(&self) -> Option<NaiveDate> {
        let year = self.row.str("crash_yr_no")?.parse().ok()?;
        let month = self.row.str("crash_mo_no")?.parse().ok()?;
        let day = self.row.str("crash_day_no")?.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// [`crash_date`](Self::crash_date) at the top of `crash_hr_no`.
    ///
    /// Hours outside `0..=23` (including the unknown-hour code `99`) and a
    /// missing hour map to 23:59 of the same day.
    pub fn crash_datetime(&self) -> Option<NaiveDateTime> {
        let date = self.crash_date()?;
        let hour = self
            .row
            .str("crash_hr_no")
            .and_then(|h| h.parse::<u32>().ok())
            .filter(|h| *h < 24);
        match hour {
            Some(h) => date.and_hms_opt(h, 0, 0),
            None => date.and_hms_opt(23, 59, 0),
        }
    }

    pub fn row(&self) -> &Row {
        &self.row
    }
}

/// One vehicle of a crash (`rec_typ_cd = 2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRecord {
    crash_id: i64,
    vehicle_id: i64,
    row: Row,
}

impl VehicleRecord {
    pub(crate) fn from_row(row: Row) -> Self {
        Self {
            crash_id: row.required_int("crash_id"),
            vehicle_id: row.required_int("vhcl_id"),
            row,
        }
    }

    pub fn crash_id(&self) -> i64 {
        self.crash_id
    }

    pub fn vehicle_id(&self) -> i64 {
        self.vehicle_id
    }

    /// Presentation order among the vehicles of the same crash.
    pub fn coded_sequence_number(&self) -> Option<i64> {
        self.row.int("vhcl_coded_seq_no")
    }

    pub fn occupant_count(&self) -> Option<i64> {
        self.row.int("vhcl_occup_cnt")
    }

    pub fn row(&self) -> &Row {
        &self.row
    }
}

/// One person involved in a crash (`rec_typ_cd = 3`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRecord {
    crash_id: i64,
    participant_id: i64,
    vehicle_id: Option<i64>,
    row: Row,
}

impl ParticipantRecord {
    pub(crate) fn from_row(row: Row) -> Self {
        Self {
            crash_id: row.required_int("crash_id"),
            participant_id: row.required_int("partic_id"),
            vehicle_id: row.int("vhcl_id").filter(|id| *id != 0),
            row,
        }
    }

    pub fn crash_id(&self) -> i64 {
        self.crash_id
    }

    pub fn participant_id(&self) -> i64 {
        self.participant_id
    }

    /// Occupied vehicle; `None` for non-motorists (`vhcl_id` empty or `0`).
    pub fn vehicle_id(&self) -> Option<i64> {
        self.vehicle_id
    }

    pub fn is_non_motorist(&self) -> bool {
        self.vehicle_id.is_none()
    }

    /// Display order across the whole crash.
    pub fn display_sequence_number(&self) -> Option<i64> {
        self.row.int("partic_dsply_seq_no")
    }

    /// Order within the occupied vehicle, or the struck-object order for non-occupants.
    pub fn vehicle_sequence_number(&self) -> Option<i64> {
        self.row.int("partic_vhcl_seq_no")
    }

    pub fn vehicle_coded_sequence_number(&self) -> Option<i64> {
        self.row.int("vhcl_coded_seq_no")
    }

    pub fn participant_type_code(&self) -> Option<&str> {
        self.row.str("partic_typ_cd")
    }

    pub fn row(&self) -> &Row {
        &self.row
    }
}

macro_rules! deref_row {
    ($($ty:ty),+) => {
        $(
            impl Deref for $ty {
                type Target = Row;

                fn deref(&self) -> &Row {
                    &self.row
                }
            }
        )+
    };
}

deref_row!(CrashRecord, VehicleRecord, ParticipantRecord);

/// A successfully decoded line of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedRecord {
    Crash(CrashRecord),
    Vehicle(VehicleRecord),
    Participant(ParticipantRecord),
}

impl DecodedRecord {
    pub(crate) fn from_row(row: Row) -> Self {
        match row.kind() {
            RecordKind::Crash => Self::Crash(CrashRecord::from_row(row)),
            RecordKind::Vehicle => Self::Vehicle(VehicleRecord::from_row(row)),
            RecordKind::Participant => Self::Participant(ParticipantRecord::from_row(row)),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.row().kind()
    }

    pub fn crash_id(&self) -> i64 {
        match self {
            Self::Crash(r) => r.crash_id(),
            Self::Vehicle(r) => r.crash_id(),
            Self::Participant(r) => r.crash_id(),
        }
    }

    pub fn row(&self) -> &Row {
        match self {
            Self::Crash(r) => r.row(),
            Self::Vehicle(r) => r.row(),
            Self::Participant(r) => r.row(),
        }
    }
}
