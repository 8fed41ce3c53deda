//! Per-adapter test outcomes and failure reasons.

use std::fmt;

use crate::network::ConnectFailureKind;

/// Status of one adapter within a generation.
///
/// Every adapter starts [`Pending`](Self::Pending) and moves exactly once to
/// [`Pass`](Self::Pass) or [`Fail`](Self::Fail).
///
/// # Verdict
///
/// | connect | has IPv4 | Outcome |
/// |---------|----------|---------|
/// | false   | (not checked) | `Fail` |
/// | true    | false    | `Fail` |
/// | true    | true     | `Pass` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TestOutcome {
    /// Not yet tested in this generation.
    #[default]
    Pending,
    /// Connected and received an IPv4 address.
    Pass,
    /// Failed to connect or received no IPv4 address.
    Fail,
}

impl TestOutcome {
    /// Derives the verdict from the two checks.
    ///
    /// `has_ipv4` is `None` when verification was skipped because the
    /// connect step failed.
    #[must_use]
    pub const fn from_checks(connected: bool, has_ipv4: Option<bool>) -> Self {
        match (connected, has_ipv4) {
            (true, Some(true)) => Self::Pass,
            _ => Self::Fail,
        }
    }

    /// Returns true for `Pass` and `Fail`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true for `Pass`.
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns the label written to reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an adapter failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The connect sequence failed.
    Connect(ConnectFailureKind),
    /// Connected, but no IPv4 address was assigned.
    NoIpv4,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect(kind) => write!(f, "{kind} failure"),
            Self::NoIpv4 => write!(f, "no IPv4 address"),
        }
    }
}
