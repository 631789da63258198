use cds501::core::RecordKind;
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum KindArg {
    Crash,
    Vehicle,
    Participant,
}

impl From<KindArg> for RecordKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Crash => RecordKind::Crash,
            KindArg::Vehicle => RecordKind::Vehicle,
            KindArg::Participant => RecordKind::Participant,
        }
    }
}
