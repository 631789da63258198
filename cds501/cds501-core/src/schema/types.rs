use std::fmt::{self, Display, Formatter};

/// One of the three row types multiplexed onto the extract's line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Crash,
    Vehicle,
    Participant,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Crash,
        RecordKind::Vehicle,
        RecordKind::Participant,
    ];

    /// The `rec_typ_cd` value that introduces a line of this kind.
    pub fn discriminator(&self) -> &'static str {
        match self {
            RecordKind::Crash => "1",
            RecordKind::Vehicle => "2",
            RecordKind::Participant => "3",
        }
    }

    pub fn from_discriminator(raw: &str) -> Option<Self> {
        match raw {
            "1" => Some(RecordKind::Crash),
            "2" => Some(RecordKind::Vehicle),
            "3" => Some(RecordKind::Participant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Crash => "crash",
            RecordKind::Vehicle => "vehicle",
            RecordKind::Participant => "participant",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive encoding of a single delimited field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Optionally signed, possibly zero-padded integer.
    Integer,
    /// Fixed-point decimal with a mandatory leading sign slot, e.g. `-046.00`.
    SignedDecimal { precision: u8, scale: u8 },
    /// Code or free text kept verbatim; leading zeros are significant.
    FixedWidthText,
    /// `0` / `1`.
    BooleanFlag,
}

impl PrimitiveType {
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveType::Integer => "integer",
            PrimitiveType::SignedDecimal { .. } => "decimal",
            PrimitiveType::FixedWidthText => "text",
            PrimitiveType::BooleanFlag => "flag",
        }
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::SignedDecimal { precision, scale } => {
                write!(f, "decimal({precision},{scale})")
            }
            other => f.write_str(other.type_name()),
        }
    }
}

/// Static definition of one positional field.
///
/// The ordinal position of a field is its index in the owning
/// [`RecordSchema::fields`] slice; the format carries no header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDef {
    pub name: &'static str,
    pub primitive: PrimitiveType,
    pub nullable: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, primitive: PrimitiveType, nullable: bool) -> Self {
        Self {
            name,
            primitive,
            nullable,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, PrimitiveType::FixedWidthText, true)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, PrimitiveType::Integer, true)
    }

    pub const fn flag(name: &'static str) -> Self {
        Self::new(name, PrimitiveType::BooleanFlag, true)
    }

    pub const fn decimal(name: &'static str, precision: u8, scale: u8) -> Self {
        Self::new(name, PrimitiveType::SignedDecimal { precision, scale }, true)
    }

    /// Same definition with `nullable = false`.
    pub const fn required(self) -> Self {
        Self {
            nullable: false,
            ..self
        }
    }
}

/// The fixed, total, ordered field list of one [`RecordKind`].
#[derive(Debug)]
pub struct RecordSchema {
    kind: RecordKind,
    fields: &'static [FieldDef],
}

impl RecordSchema {
    pub const fn new(kind: RecordKind, fields: &'static [FieldDef]) -> Self {
        Self { kind, fields }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    /// Number of delimited values every line of this kind must carry.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static FieldDef)> {
        self.fields.iter().enumerate()
    }
}

impl Display for RecordSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = super::format_field_defs(self.fields)?;
        f.write_str(&text)
    }
}
