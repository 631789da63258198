//! Decoder and relational assembler for CDS501 crash-data extracts.
//!
//! An extract is a single stream of comma-delimited lines where crash,
//! vehicle and participant records are multiplexed by their first value.
//! [`decode_line`] turns one line into a typed record; [`process`] and
//! [`ExtractReader`] link records into crash → vehicle → participant
//! relations while routing malformed lines and referential problems to
//! side channels instead of failing.
//!
//! ```no_run
//! use cds501::ExtractReader;
//!
//! let extract = ExtractReader::builder()
//!     .build()
//!     .read_path("CDS501.txt".as_ref())?;
//! for (index, crash) in extract.crashes.iter().enumerate() {
//!     println!(
//!         "crash {} with {} vehicles",
//!         crash.record.crash_id(),
//!         extract.vehicles_of(index).len()
//!     );
//! }
//! # Ok::<(), cds501::ExtractError>(())
//! ```

mod anomaly;
mod assembler;
mod decoder;
mod error;
mod extract;
mod policy;
mod reader;
mod record;

pub use anomaly::{Anomaly, AnomalyKind};
pub use assembler::{
    AssembledRecord, Assembler, Crash, ExtractEvent, ExtractEvents, Participant, Vehicle, events,
    events_with_options, process, process_linear,
};
pub use decoder::{DELIMITER, decode_line};
pub use error::{ExtractError, LineError, RejectedLine};
pub use extract::{Extract, ExtractSummary, LinearExtract};
pub use policy::{AssemblerOptions, BlankLinePolicy, CountCheckPolicy};
pub use reader::{ExtractReader, ExtractReaderBuilder, ReaderEvents};
pub use record::{CrashRecord, DecodedRecord, ParticipantRecord, Row, VehicleRecord};

pub use cds501_core as core;
