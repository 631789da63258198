use cds501_core::{
    CRASH, Decimal, FieldDef, PARTICIPANT, PrimitiveType, RecordKind, Value, ValueError,
    decode_value, encode_value, fields_for,
};

fn lat_sec() -> &'static FieldDef {
    CRASH.field("lat_sec_no").expect("lat_sec_no is a crash field")
}

#[test]
fn signed_decimal_with_negative_sign() {
    let value = decode_value("-046.00", lat_sec()).unwrap();
    assert_eq!(value, Value::Decimal(Decimal::new(-4600, 2)));
}

#[test]
fn signed_decimal_with_zero_sign_slot() {
    let value = decode_value("0023.45", lat_sec()).unwrap();
    assert_eq!(value, Value::Decimal(Decimal::new(2345, 2)));
}

#[test]
fn signed_decimal_accepts_plus_sign_slot() {
    let value = decode_value("+023.45", lat_sec()).unwrap();
    assert_eq!(value, Value::Decimal(Decimal::new(2345, 2)));
}

#[test]
fn signed_decimal_without_sign_is_rejected() {
    assert_eq!(
        decode_value("123.45", lat_sec()),
        Err(ValueError::MissingSign { found: '1' })
    );
    assert_eq!(
        decode_value(".45", lat_sec()),
        Err(ValueError::MissingSign { found: '.' })
    );
}

#[test]
fn signed_decimal_rejects_malformed_bodies() {
    let invalid = Err(ValueError::InvalidDecimal {
        precision: 5,
        scale: 2,
    });
    // no decimal point
    assert_eq!(decode_value("-04600", lat_sec()), invalid);
    // too many fraction digits
    assert_eq!(decode_value("-046.001", lat_sec()), invalid);
    // too many significant integer digits for decimal(5,2)
    assert_eq!(decode_value("01234.00", lat_sec()), invalid);
    // stray characters
    assert_eq!(decode_value("-04a.00", lat_sec()), invalid);
    // sign only
    assert_eq!(decode_value("-.50", lat_sec()), invalid);
}

#[test]
fn signed_decimal_pads_short_fractions_to_scale() {
    let value = decode_value("-12.5", lat_sec()).unwrap();
    let Value::Decimal(d) = value else {
        panic!("expected decimal");
    };
    assert_eq!(d, Decimal::new(-1250, 2));
    assert_eq!(d.scale(), 2);
}

#[test]
fn scale_zero_decimal_rejects_a_decimal_point() {
    let field = FieldDef::decimal("whole", 4, 0);
    assert_eq!(
        decode_value("-0012", &field),
        Ok(Value::Decimal(Decimal::new(-12, 0)))
    );
    assert_eq!(
        decode_value("-12.0", &field),
        Err(ValueError::InvalidDecimal {
            precision: 4,
            scale: 0
        })
    );
}

#[test]
fn empty_nullable_fields_decode_to_null() {
    for kind in RecordKind::ALL {
        for field in fields_for(kind).iter().filter(|f| f.nullable) {
            assert_eq!(
                decode_value("", field),
                Ok(Value::Null),
                "{kind}.{}",
                field.name
            );
            assert_eq!(decode_value("  ", field), Ok(Value::Null));
        }
    }
}

#[test]
fn empty_required_field_is_missing() {
    let crash_id = CRASH.field("crash_id").unwrap();
    assert!(!crash_id.nullable);
    assert_eq!(decode_value("", crash_id), Err(ValueError::Missing));
}

#[test]
fn boolean_flag_accepts_only_zero_and_one() {
    let field = CRASH.field("nhs_flg").unwrap();
    assert_eq!(decode_value("1", field), Ok(Value::Bool(true)));
    assert_eq!(decode_value("0", field), Ok(Value::Bool(false)));
    assert_eq!(decode_value("Y", field), Err(ValueError::InvalidFlag));
    assert_eq!(decode_value("2", field), Err(ValueError::InvalidFlag));
}

#[test]
fn integer_drops_leading_zeros_and_keeps_sign() {
    let field = CRASH.field("longtd_deg_no").unwrap();
    assert_eq!(decode_value("007", field), Ok(Value::Int(7)));
    assert_eq!(decode_value("-123", field), Ok(Value::Int(-123)));
    assert_eq!(decode_value("1.5", field), Err(ValueError::InvalidInteger));
    assert_eq!(decode_value("-", field), Err(ValueError::InvalidInteger));
    assert_eq!(
        decode_value("99999999999999999999", field),
        Err(ValueError::IntegerOverflow)
    );
}

#[test]
fn fixed_width_text_keeps_leading_zeros() {
    let field = CRASH.field("cnty_id").unwrap();
    assert_eq!(field.primitive, PrimitiveType::FixedWidthText);
    assert_eq!(decode_value("03", field), Ok(Value::text("03")));
}

#[test]
fn encode_produces_canonical_decimal_text() {
    let field = lat_sec();
    assert_eq!(
        encode_value(&Value::Decimal(Decimal::new(-46, 0)), field),
        "-046.00"
    );
    assert_eq!(
        encode_value(&Value::Decimal(Decimal::new(2345, 2)), field),
        "0023.45"
    );
    assert_eq!(encode_value(&Value::Decimal(Decimal::ZERO), field), "0000.00");
}

#[test]
fn decode_then_encode_is_canonical() {
    let field = PARTICIPANT.field("strikg_partic_flg").unwrap();
    for raw in ["1", "0", ""] {
        let value = decode_value(raw, field).unwrap();
        assert_eq!(encode_value(&value, field), raw);
    }

    let field = lat_sec();
    for (raw, canonical) in [("-046.00", "-046.00"), ("+23.4", "0023.40"), ("0000.00", "0000.00")] {
        let value = decode_value(raw, field).unwrap();
        assert_eq!(encode_value(&value, field), canonical);
        assert_eq!(decode_value(canonical, field).unwrap(), value);
    }

    let field = CRASH.field("isect_seq_no").unwrap();
    let value = decode_value("0042", field).unwrap();
    assert_eq!(encode_value(&value, field), "42");
}
