//! The set of adapters from one discovery pass and their outcomes.

use chrono::{DateTime, Local};

use super::{FailureReason, TestOutcome};
use crate::network::InterfaceHandle;
use crate::report::ResultRecord;

/// One adapter's state within a generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterEntry {
    /// Interface name from discovery.
    pub interface: InterfaceHandle,
    /// Current outcome.
    pub outcome: TestOutcome,
    /// Hardware address recorded when the test finished.
    pub mac: Option<String>,
    /// Local time the test finished.
    pub completed_at: Option<DateTime<Local>>,
    /// Failure reason, set only for `Fail`.
    pub failure: Option<FailureReason>,
}

impl AdapterEntry {
    fn pending(interface: InterfaceHandle) -> Self {
        Self {
            interface,
            outcome: TestOutcome::Pending,
            mac: None,
            completed_at: None,
            failure: None,
        }
    }

    /// Returns the result record for a finished test.
    #[must_use]
    pub fn record(&self) -> Option<ResultRecord> {
        if !self.outcome.is_terminal() {
            return None;
        }
        Some(ResultRecord::new(
            self.completed_at?,
            self.mac.clone()?,
            self.outcome,
        ))
    }
}

/// Completed test data passed to [`Generation::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// `Pass` or `Fail`.
    pub outcome: TestOutcome,
    /// Hardware address to record.
    pub mac: String,
    /// When the test finished.
    pub completed_at: DateTime<Local>,
    /// Failure reason for `Fail`.
    pub failure: Option<FailureReason>,
}

/// Adapters from one discovery pass, in discovery order.
///
/// A generation is replaced wholesale by the next discovery; outcomes never
/// carry over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    entries: Vec<AdapterEntry>,
    completion_signalled: bool,
}

impl Generation {
    /// Creates a generation with every interface `Pending`.
    ///
    /// Duplicate names keep their first position.
    #[must_use]
    pub fn new(interfaces: impl IntoIterator<Item = InterfaceHandle>) -> Self {
        let mut entries: Vec<AdapterEntry> = Vec::new();
        for interface in interfaces {
            if !entries.iter().any(|e| e.interface == interface) {
                entries.push(AdapterEntry::pending(interface));
            }
        }
        Self {
            entries,
            completion_signalled: false,
        }
    }

    /// Returns the entries in discovery order.
    #[must_use]
    pub fn entries(&self) -> &[AdapterEntry] {
        &self.entries
    }

    /// Returns the interfaces in discovery order.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceHandle> {
        self.entries.iter().map(|e| &e.interface)
    }

    /// Returns the entry for `interface`.
    #[must_use]
    pub fn get(&self, interface: &InterfaceHandle) -> Option<&AdapterEntry> {
        self.entries.iter().find(|e| &e.interface == interface)
    }

    /// Returns the outcome for `interface`, or `None` if it is not part of
    /// this generation.
    #[must_use]
    pub fn outcome(&self, interface: &InterfaceHandle) -> Option<TestOutcome> {
        self.get(interface).map(|e| e.outcome)
    }

    /// Returns the number of adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if discovery found nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of adapters in a terminal state.
    #[must_use]
    pub fn terminal_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome.is_terminal())
            .count()
    }

    /// Returns the still-pending interfaces in discovery order.
    #[must_use]
    pub fn pending(&self) -> Vec<InterfaceHandle> {
        self.entries
            .iter()
            .filter(|e| !e.outcome.is_terminal())
            .map(|e| e.interface.clone())
            .collect()
    }

    /// Returns true when the generation has adapters and none is pending.
    ///
    /// An empty generation never completes.
    #[must_use]
    pub fn all_terminal(&self) -> bool {
        !self.is_empty() && self.entries.iter().all(|e| e.outcome.is_terminal())
    }

    /// Moves `interface` from `Pending` to a terminal outcome.
    ///
    /// Returns false, leaving the generation unchanged, if the interface is
    /// unknown, already terminal, or `completion.outcome` is `Pending`.
    pub fn finish(&mut self, interface: &InterfaceHandle, completion: Completion) -> bool {
        if !completion.outcome.is_terminal() {
            return false;
        }
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| &e.interface == interface)
        else {
            return false;
        };
        if entry.outcome.is_terminal() {
            return false;
        }

        entry.outcome = completion.outcome;
        entry.mac = Some(completion.mac);
        entry.completed_at = Some(completion.completed_at);
        entry.failure = completion.failure;
        true
    }

    /// Returns true exactly once: the first time it is called after every
    /// adapter reached a terminal state.
    pub fn take_completion(&mut self) -> bool {
        if self.completion_signalled || !self.all_terminal() {
            return false;
        }
        self.completion_signalled = true;
        true
    }

    /// Returns result records for finished tests in discovery order.
    #[must_use]
    pub fn records(&self) -> Vec<ResultRecord> {
        self.entries.iter().filter_map(AdapterEntry::record).collect()
    }
}
