//! The test orchestrator.

use std::time::Duration;

use tokio::sync::watch;

use super::{
    Completion, EngineError, EngineEvent, EngineObserver, FailureReason, Generation, TestOutcome,
};
use crate::network::{
    AdapterDiscovery, AdapterIdentity, AddressInspector, Credentials, InterfaceHandle,
    NetworkConnector, random_mac,
};
use crate::report::ResultRecord;
use crate::time::{Clock, Sleeper, SystemClock, TokioSleeper};

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;

/// Read-only inputs for a test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Hardware identity used by discovery.
    pub identity: AdapterIdentity,
    /// Test network credentials.
    pub credentials: Credentials,
    /// Upper bound for the association step of each connect.
    pub connect_timeout: Duration,
    /// Skip connect and verification; every adapter passes with a random MAC.
    pub simulate_result: bool,
    /// Delay before each simulated verdict.
    pub simulate_delay: Duration,
}

/// How a batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every pending adapter was tested.
    Finished,
    /// Cancellation was observed between adapters.
    Cancelled {
        /// Adapters left `Pending`.
        remaining: usize,
    },
}

/// Sequences discovery, connect, verification and MAC lookup per adapter.
///
/// Adapters are tested one at a time in discovery order. Each test ends in a
/// terminal outcome; a failing adapter never aborts the batch.
///
/// # Type Parameters
///
/// * `D` - The [`AdapterDiscovery`] implementation
/// * `C` - The [`NetworkConnector`] implementation
/// * `I` - The [`AddressInspector`] implementation
/// * `S` - The [`Sleeper`] for simulated delays (defaults to [`TokioSleeper`])
/// * `K` - The [`Clock`] for completion timestamps (defaults to [`SystemClock`])
#[derive(Debug)]
pub struct TestEngine<D, C, I, S = TokioSleeper, K = SystemClock> {
    discovery: D,
    connector: C,
    inspector: I,
    sleeper: S,
    clock: K,
    settings: EngineSettings,
    generation: Generation,
}

impl<D, C, I> TestEngine<D, C, I> {
    /// Creates an engine with an empty generation.
    #[must_use]
    pub fn new(discovery: D, connector: C, inspector: I, settings: EngineSettings) -> Self {
        Self {
            discovery,
            connector,
            inspector,
            sleeper: TokioSleeper,
            clock: SystemClock,
            settings,
            generation: Generation::default(),
        }
    }
}

impl<D, C, I, S, K> TestEngine<D, C, I, S, K> {
    /// Replaces the sleeper used for simulated delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> TestEngine<D, C, I, S2, K> {
        TestEngine {
            discovery: self.discovery,
            connector: self.connector,
            inspector: self.inspector,
            sleeper,
            clock: self.clock,
            settings: self.settings,
            generation: self.generation,
        }
    }

    /// Replaces the clock used for completion timestamps.
    #[must_use]
    pub fn with_clock<K2>(self, clock: K2) -> TestEngine<D, C, I, S, K2> {
        TestEngine {
            discovery: self.discovery,
            connector: self.connector,
            inspector: self.inspector,
            sleeper: self.sleeper,
            clock,
            settings: self.settings,
            generation: self.generation,
        }
    }

    /// Returns the engine settings.
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the current generation.
    #[must_use]
    pub const fn generation(&self) -> &Generation {
        &self.generation
    }

    /// Returns true when every adapter of a non-empty generation is terminal.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.generation.all_terminal()
    }

    /// Returns result records for finished tests in discovery order.
    #[must_use]
    pub fn records(&self) -> Vec<ResultRecord> {
        self.generation.records()
    }
}

impl<D, C, I, S, K> TestEngine<D, C, I, S, K>
where
    D: AdapterDiscovery,
    C: NetworkConnector,
    I: AddressInspector,
    S: Sleeper,
    K: Clock,
{
    /// Runs discovery and replaces the generation with the adapters found,
    /// all `Pending`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Discovery`] if the host query fails. The
    /// previous generation is kept in that case.
    pub async fn refresh(
        &mut self,
        observer: &mut impl EngineObserver,
    ) -> Result<&Generation, EngineError> {
        tracing::info!("Discovering {} adapters", self.settings.identity);
        let found = self.discovery.discover(&self.settings.identity).await?;

        self.generation = Generation::new(found);
        if self.generation.is_empty() {
            tracing::info!("No matching adapters found");
        } else {
            let names: Vec<&str> = self
                .generation
                .interfaces()
                .map(InterfaceHandle::as_str)
                .collect();
            tracing::info!("Found {} adapter(s): {}", names.len(), names.join(", "));
        }

        observer.on_event(&EngineEvent::DiscoveryComplete {
            interfaces: self.generation.interfaces().cloned().collect(),
        });
        Ok(&self.generation)
    }

    /// Tests every pending adapter in discovery order.
    ///
    /// `cancel` is checked before each adapter; once it reads `true` the
    /// remaining adapters stay `Pending`. A test in progress is never
    /// interrupted.
    pub async fn run_batch(
        &mut self,
        observer: &mut impl EngineObserver,
        cancel: &watch::Receiver<bool>,
    ) -> BatchStatus {
        let pending = self.generation.pending();
        let total = pending.len();

        for (index, interface) in pending.iter().enumerate() {
            if *cancel.borrow() {
                let remaining = total - index;
                tracing::warn!("Batch cancelled, {remaining} adapter(s) left untested");
                return BatchStatus::Cancelled { remaining };
            }
            self.run_one(interface, observer).await;
        }

        BatchStatus::Finished
    }

    /// Tests one adapter of the current generation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownInterface`] if the interface was not
    /// discovered, or [`EngineError::AlreadyTested`] if it already has a
    /// terminal outcome.
    pub async fn test_adapter(
        &mut self,
        interface: &InterfaceHandle,
        observer: &mut impl EngineObserver,
    ) -> Result<TestOutcome, EngineError> {
        match self.generation.outcome(interface) {
            None => Err(EngineError::UnknownInterface {
                interface: interface.clone(),
            }),
            Some(outcome) if outcome.is_terminal() => Err(EngineError::AlreadyTested {
                interface: interface.clone(),
                outcome,
            }),
            Some(_) => Ok(self.run_one(interface, observer).await),
        }
    }

    async fn run_one(
        &mut self,
        interface: &InterfaceHandle,
        observer: &mut impl EngineObserver,
    ) -> TestOutcome {
        observer.on_event(&EngineEvent::AdapterStarted {
            interface: interface.clone(),
        });
        tracing::info!("Testing {interface}...");

        let (outcome, mac, failure) = if self.settings.simulate_result {
            self.sleeper.sleep(self.settings.simulate_delay).await;
            (TestOutcome::Pass, random_mac(), None)
        } else {
            self.check(interface).await
        };

        match failure {
            Some(reason) => tracing::warn!("{interface}: {outcome} ({reason}), MAC {mac}"),
            None => tracing::info!("{interface}: {outcome}, MAC {mac}"),
        }

        self.generation.finish(
            interface,
            Completion {
                outcome,
                mac: mac.clone(),
                completed_at: self.clock.now(),
                failure,
            },
        );

        observer.on_event(&EngineEvent::AdapterFinished {
            interface: interface.clone(),
            outcome,
            mac,
            failure,
        });
        observer.on_event(&EngineEvent::Progress {
            completed: self.generation.terminal_count(),
            total: self.generation.len(),
        });

        if self.generation.take_completion() {
            let passed = self
                .generation
                .entries()
                .iter()
                .filter(|e| e.outcome.is_pass())
                .count();
            let failed = self.generation.len() - passed;
            tracing::info!("All adapters tested: {passed} passed, {failed} failed");
            observer.on_event(&EngineEvent::GenerationComplete { passed, failed });
        }

        outcome
    }

    /// Connects, verifies (only after a successful connect) and reads the MAC.
    async fn check(
        &self,
        interface: &InterfaceHandle,
    ) -> (TestOutcome, String, Option<FailureReason>) {
        let connected = self
            .connector
            .try_connect(
                interface,
                &self.settings.credentials,
                self.settings.connect_timeout,
            )
            .await
            .map_err(|e| {
                tracing::debug!("Connect on {interface} failed: {e}");
                FailureReason::Connect(e.kind())
            });

        let has_ipv4 = connected
            .is_ok()
            .then(|| self.inspector.has_ipv4(interface));
        let outcome = TestOutcome::from_checks(connected.is_ok(), has_ipv4);

        let failure = match (connected, has_ipv4) {
            (Err(reason), _) => Some(reason),
            (Ok(()), Some(false)) => Some(FailureReason::NoIpv4),
            _ => None,
        };

        (outcome, self.inspector.mac_of(interface), failure)
    }
}
