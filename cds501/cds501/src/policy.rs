//! Knobs for the tolerant parts of line handling.

/// What to do with empty or whitespace-only lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankLinePolicy {
    /// Drop them silently. Line numbering still advances.
    #[default]
    Skip,
    /// Report them as [`LineError::EmptyLine`](crate::LineError::EmptyLine).
    Reject,
}

/// Whether declared crash totals are compared with what was linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountCheckPolicy {
    /// Emit count-mismatch anomalies when a crash closes.
    #[default]
    Observe,
    Ignore,
}

/// Options accepted by [`Assembler::with_options`](crate::Assembler::with_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblerOptions {
    pub blank_lines: BlankLinePolicy,
    pub count_check: CountCheckPolicy,
}
