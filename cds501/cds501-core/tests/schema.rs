use std::collections::HashSet;

use cds501_core::{
    CRASH, FieldDef, PARTICIPANT, PrimitiveType, REC_TYP_CD, RecordKind, VEHICLE, fields_for,
    format_field_defs, kinds_with_field, schema_for,
};

#[test]
fn field_counts_are_fixed_per_kind() {
    assert_eq!(CRASH.len(), 97);
    assert_eq!(VEHICLE.len(), 26);
    assert_eq!(PARTICIPANT.len(), 35);
}

#[test]
fn discriminator_leads_every_kind() {
    for kind in RecordKind::ALL {
        let schema = schema_for(kind);
        assert_eq!(schema.kind(), kind);
        assert_eq!(schema.fields()[0], REC_TYP_CD);
        assert_eq!(schema.position("crash_id"), Some(1));
    }
}

#[test]
fn discriminators_round_trip() {
    for kind in RecordKind::ALL {
        assert_eq!(RecordKind::from_discriminator(kind.discriminator()), Some(kind));
    }
    assert_eq!(RecordKind::from_discriminator("4"), None);
    assert_eq!(RecordKind::from_discriminator(""), None);
}

#[test]
fn field_names_are_unique_within_a_kind() {
    for kind in RecordKind::ALL {
        let mut seen = HashSet::new();
        for field in fields_for(kind) {
            assert!(seen.insert(field.name), "{kind} repeats {}", field.name);
        }
    }
}

#[test]
fn keys_are_required() {
    assert!(!CRASH.field("crash_id").unwrap().nullable);
    assert!(!VEHICLE.field("vhcl_id").unwrap().nullable);
    assert!(!PARTICIPANT.field("partic_id").unwrap().nullable);
    // non-motorists carry no vehicle
    assert!(PARTICIPANT.field("vhcl_id").unwrap().nullable);
}

#[test]
fn shared_field_names_span_kinds() {
    assert_eq!(
        kinds_with_field("crash_id"),
        vec![RecordKind::Crash, RecordKind::Vehicle, RecordKind::Participant]
    );
    assert_eq!(
        kinds_with_field("cmpss_dir_from_cd"),
        vec![RecordKind::Vehicle, RecordKind::Participant]
    );
    assert_eq!(kinds_with_field("tot_vhcl_cnt"), vec![RecordKind::Crash]);
    assert!(kinds_with_field("no_such_field").is_empty());
}

#[test]
fn decimal_fields_declare_precision_and_scale() {
    let decimals: Vec<&str> = CRASH
        .fields()
        .iter()
        .filter(|f| matches!(f.primitive, PrimitiveType::SignedDecimal { .. }))
        .map(|f| f.name)
        .collect();
    assert_eq!(
        decimals,
        vec!["lat_sec_no", "longtd_sec_no", "mp_no", "seg_pt_lrs_meas"]
    );
}

#[test]
fn required_builder_only_changes_nullability() {
    let field = FieldDef::integer("x").required();
    assert_eq!(field.name, "x");
    assert_eq!(field.primitive, PrimitiveType::Integer);
    assert!(!field.nullable);
}

#[test]
fn format_lists_fields_with_positions() -> Result<(), std::fmt::Error> {
    let fields = [
        REC_TYP_CD,
        FieldDef::integer("crash_id").required(),
        FieldDef::decimal("mp_no", 5, 2),
    ];
    let text = format_field_defs(fields)?;
    let expected = "\
0 rec_typ_cd: { type: text, nullable: false }
1 crash_id: { type: integer, nullable: false }
2 mp_no: { type: decimal(5,2), nullable: true }
";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn schema_display_matches_formatter() -> Result<(), std::fmt::Error> {
    assert_eq!(VEHICLE.to_string(), format_field_defs(VEHICLE.fields())?);
    assert!(VEHICLE.to_string().starts_with(" 0 rec_typ_cd:"));
    Ok(())
}
