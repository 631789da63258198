
use std::io::{self, BufReader, Cursor, Read};

use cds501::{
    AnomalyKind, BlankLinePolicy, CountCheckPolicy, ExtractError, ExtractEvent, ExtractReader,
    ExtractSummary, LineError,
};
use chrono::NaiveDate;
use test_helpers::{crash, fixture_path, participant, two_vehicle_crash, vehicle};

/// Yields `data` once, then fails.
struct FailingReader {
    data: Option<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.take() {
            Some(data) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                Ok(n)
            }
            None => Err(io::Error::other("connection reset")),
        }
    }
}

#[test]
fn reads_fixture_into_relations() {
    let reader = ExtractReader::builder().build();
    let extract = reader.read_path(&fixture_path("two_crashes.txt")).unwrap();

    assert_eq!(
        extract.summary(),
        ExtractSummary {
            crashes: 2,
            vehicles: 3,
            participants: 6,
            rejected: 1,
            anomalies: 2,
        }
    );

    let rejected = &extract.rejected[0];
    assert_eq!(rejected.line, 12);
    assert!(matches!(
        rejected.error,
        LineError::FieldCount {
            expected: 26,
            found: 25,
            ..
        }
    ));

    let anomalies: Vec<(usize, &AnomalyKind)> =
        extract.anomalies.iter().map(|a| (a.line, &a.kind)).collect();
    assert_eq!(
        anomalies,
        vec![
            (
                13,
                &AnomalyKind::UnresolvedVehicle {
                    participant_id: 4_158_902,
                    vehicle_id: 3_367_999
                }
            ),
            (
                8,
                &AnomalyKind::ParticipantCountMismatch {
                    declared: 2,
                    observed: 3
                }
            ),
        ]
    );
}

#[test]
fn fixture_records_carry_typed_values() {
    let extract = ExtractReader::new()
        .read_path(&fixture_path("two_crashes.txt"))
        .unwrap();

    let first = &extract.crashes[0].record;
    assert_eq!(first.crash_id(), 1_832_765);
    assert_eq!(
        first.crash_datetime(),
        NaiveDate::from_ymd_opt(2019, 3, 15).and_then(|d| d.and_hms_opt(14, 0, 0))
    );
    let second = &extract.crashes[1];
    assert_eq!(second.line, 8);
    assert_eq!(
        second.record.crash_datetime(),
        NaiveDate::from_ymd_opt(2019, 11, 2).and_then(|d| d.and_hms_opt(23, 59, 0))
    );

    let occupants: Vec<i64> = extract
        .occupants_of(0)
        .map(|p| p.record.participant_id())
        .collect();
    assert_eq!(occupants, vec![4_158_801, 4_158_802]);
    let pedestrians: Vec<i64> = extract
        .non_motorists_of(1)
        .map(|p| p.record.participant_id())
        .collect();
    // the unresolved participant still has a vehicle id and is not a non-motorist
    assert_eq!(pedestrians, vec![4_158_901]);
}

#[test]
fn blank_line_policy_is_configurable() {
    let reader = ExtractReader::builder()
        .with_blank_lines(BlankLinePolicy::Reject)
        .with_count_check(CountCheckPolicy::Ignore)
        .build();
    let extract = reader.read_path(&fixture_path("two_crashes.txt")).unwrap();

    let errors: Vec<(usize, &LineError)> =
        extract.rejected.iter().map(|r| (r.line, &r.error)).collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], (7, &LineError::EmptyLine));
    assert_eq!(extract.anomalies.len(), 1);
}

#[test]
fn linear_read_matches_relational_read() {
    let reader = ExtractReader::new();
    let path = fixture_path("two_crashes.txt");
    let linear = reader
        .read_linear(BufReader::new(std::fs::File::open(&path).unwrap()))
        .unwrap();
    assert_eq!(linear.records.len(), 11);
    assert_eq!(linear.summary(), reader.read_path(&path).unwrap().summary());
    assert_eq!(linear.into_extract(), reader.read_path(&path).unwrap());
}

#[test]
fn for_each_event_stops_on_callback_error() {
    let text = two_vehicle_crash(1).join("\n");
    let mut seen = 0;
    let result = ExtractReader::new().for_each_event(Cursor::new(text), |_| {
        seen += 1;
        if seen == 2 {
            return Err("stop".into());
        }
        Ok(())
    });

    assert!(matches!(result, Err(ExtractError::Callback(_))));
    assert_eq!(seen, 2);
}

#[test]
fn for_each_event_returns_totals() {
    let text = format!(
        "{}\n{}\n{}\n",
        crash(1).build(),
        vehicle(1, 10).build(),
        participant(1, Some(11), 100).build()
    );
    let mut kinds = Vec::new();
    let summary = ExtractReader::new()
        .for_each_event(Cursor::new(text), |event| {
            kinds.push(match event {
                ExtractEvent::Record(r) => r.kind().as_str(),
                ExtractEvent::Rejected(_) => "rejected",
                ExtractEvent::Anomaly(_) => "anomaly",
            });
            Ok(())
        })
        .unwrap();

    assert_eq!(kinds, vec!["crash", "vehicle", "participant", "anomaly"]);
    assert_eq!(summary.records(), 3);
    assert_eq!(summary.anomalies, 1);
}

#[test]
fn io_error_surfaces_with_line_number() {
    let first = format!("{}\n{}\n", crash(1).build(), vehicle(1, 10).build());
    let reader = BufReader::new(FailingReader {
        data: Some(first.into_bytes()),
    });

    let mut events = ExtractReader::new().events(reader);
    let mut records = 0;
    let error = loop {
        match events.next() {
            Some(Ok(_)) => records += 1,
            Some(Err(e)) => break e,
            None => panic!("expected an I/O error"),
        }
    };
    assert_eq!(records, 2);
    assert!(matches!(error, ExtractError::Io { line: 3, .. }));
    assert!(events.next().is_none());
}

#[test]
fn missing_file_is_an_open_error() {
    let result = ExtractReader::new().read_path(&fixture_path("does_not_exist.txt"));
    assert!(matches!(result, Err(ExtractError::Open { .. })));
}

#[test]
fn invalid_utf8_does_not_abort_the_read() {
    let mut bytes = crash(1).set("ser_no", "AB").build().into_bytes();
    let at = bytes.iter().position(|b| *b == b'A').unwrap();
    bytes[at] = 0xE9;
    bytes.push(b'\n');
    bytes.extend_from_slice(vehicle(1, 10).build().as_bytes());

    let extract = ExtractReader::new().read(Cursor::new(bytes)).unwrap();
    assert_eq!(extract.crashes.len(), 1);
    assert_eq!(extract.vehicles.len(), 1);
    assert_eq!(extract.crashes[0].record.str("ser_no"), Some("\u{FFFD}B"));
}

#[test]
fn process_str_handles_crlf_lines() {
    let text = two_vehicle_crash(1).join("\r\n");
    let extract = ExtractReader::new().process_str(&text);
    assert_eq!(extract.summary().records(), 6);
    assert!(extract.is_clean());
}

#[test]
fn leading_byte_order_mark_is_ignored() {
    let text = format!("\u{feff}{}\n", two_vehicle_crash(1).join("\n"));

    let extract = ExtractReader::new().read(Cursor::new(text.clone())).unwrap();
    assert_eq!(extract.summary().records(), 6);
    assert!(extract.is_clean(), "{extract:?}");
    assert_eq!(extract.crashes[0].line, 1);

    assert_eq!(ExtractReader::new().process_str(&text), extract);
}

#[test]
fn byte_order_mark_after_the_first_line_is_data() {
    let mut lines = two_vehicle_crash(1);
    lines[1] = format!("\u{feff}{}", lines[1]);
    let extract = ExtractReader::new().process_str(&lines.join("\n"));
    assert_eq!(extract.rejected.len(), 1);
    assert_eq!(extract.rejected[0].line, 2);
    assert!(matches!(
        extract.rejected[0].error,
        LineError::UnknownRecordType { .. }
    ));
}
