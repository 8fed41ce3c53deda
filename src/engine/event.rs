//! Engine events and observer trait.

use super::{FailureReason, TestOutcome};
use crate::network::InterfaceHandle;

/// Something the engine did, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A discovery pass replaced the generation.
    DiscoveryComplete {
        /// Interfaces found, in discovery order.
        interfaces: Vec<InterfaceHandle>,
    },
    /// Testing of one adapter began.
    AdapterStarted {
        /// Adapter under test.
        interface: InterfaceHandle,
    },
    /// One adapter reached a terminal outcome.
    AdapterFinished {
        /// Adapter that finished.
        interface: InterfaceHandle,
        /// `Pass` or `Fail`.
        outcome: TestOutcome,
        /// Recorded hardware address.
        mac: String,
        /// Why it failed, for `Fail`.
        failure: Option<FailureReason>,
    },
    /// Terminal count after a transition.
    Progress {
        /// Adapters finished so far.
        completed: usize,
        /// Adapters in the generation.
        total: usize,
    },
    /// Every adapter in the generation is terminal. Emitted once per
    /// generation.
    GenerationComplete {
        /// Number of adapters that passed.
        passed: usize,
        /// Number of adapters that failed.
        failed: usize,
    },
}

/// Receives engine events.
///
/// The engine contains no rendering; front ends implement this to print,
/// log or collect what happened.
pub trait EngineObserver {
    /// Called for every event.
    fn on_event(&mut self, event: &EngineEvent);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EngineObserver for NoopObserver {
    fn on_event(&mut self, _event: &EngineEvent) {}
}

/// Collects every event in order.
impl EngineObserver for Vec<EngineEvent> {
    fn on_event(&mut self, event: &EngineEvent) {
        self.push(event.clone());
    }
}

impl<O: EngineObserver + ?Sized> EngineObserver for &mut O {
    fn on_event(&mut self, event: &EngineEvent) {
        (**self).on_event(event);
    }
}
