//! Application execution logic.
//!
//! This module wires the platform implementations into the test engine,
//! runs the selected mode and applies the save policy to the results.

use std::io::{self, IsTerminal, Write};

use thiserror::Error;
use tokio::signal;
use tokio::sync::watch;

use wifi_tester::config::{Mode, ValidatedConfig};
use wifi_tester::engine::{BatchStatus, EngineError, EngineEvent, EngineObserver, TestEngine};
use wifi_tester::network::AdapterDiscovery;
use wifi_tester::network::platform::{
    PlatformInspector, SimulatedDiscovery, platform_connector, platform_discovery,
};
use wifi_tester::report::{CsvReport, ReportError, ResultRecord, ResultSink};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Discovery failed or the requested adapter could not be tested.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Failed to write the report.
    #[error("Failed to save results: {0}")]
    Report(#[source] ReportError),
}

/// What happens to results once testing ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SavePolicy {
    /// Save without asking.
    Auto,
    /// Ask the operator on the terminal.
    Ask,
    /// Leave the report untouched.
    Skip,
}

impl SavePolicy {
    const fn choose(auto_save: bool, interactive: bool) -> Self {
        match (auto_save, interactive) {
            (true, _) => Self::Auto,
            (false, true) => Self::Ask,
            (false, false) => Self::Skip,
        }
    }
}

/// Prints adapter verdicts and, optionally, `[n/total]` progress.
struct ConsoleObserver<W> {
    out: W,
    show_progress: bool,
    last_verdict: Option<String>,
}

impl<W: Write> ConsoleObserver<W> {
    const fn new(out: W, show_progress: bool) -> Self {
        Self {
            out,
            show_progress,
            last_verdict: None,
        }
    }

    fn emit(&mut self, line: &str) {
        // Console output is best effort; the log already has the verdicts
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::debug!("Failed to write console output: {e}");
        }
    }
}

impl<W: Write> EngineObserver for ConsoleObserver<W> {
    fn on_event(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::AdapterFinished {
                interface,
                outcome,
                mac,
                failure,
            } => {
                let verdict = match failure {
                    Some(reason) => format!("{interface}: {outcome} ({reason}), MAC {mac}"),
                    None => format!("{interface}: {outcome}, MAC {mac}"),
                };
                self.last_verdict = Some(verdict);
            }
            EngineEvent::Progress { completed, total } => {
                if let Some(verdict) = self.last_verdict.take() {
                    let line = if self.show_progress {
                        format!("[{completed}/{total}] {verdict}")
                    } else {
                        verdict
                    };
                    self.emit(&line);
                }
            }
            EngineEvent::GenerationComplete { passed, failed } => {
                self.emit(&format!(
                    "All adapters tested: {passed} passed, {failed} failed"
                ));
            }
            EngineEvent::DiscoveryComplete { .. } | EngineEvent::AdapterStarted { .. } => {}
        }
    }
}

/// Executes the selected mode.
///
/// Simulation replaces real discovery with the configured interface list;
/// everything else runs against the host.
///
/// # Errors
///
/// Returns an error if:
/// - Discovery fails
/// - The adapter named in single-adapter mode is unknown or already tested
/// - The report cannot be written
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// platform network facilities and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let report = CsvReport::new(&config.report_path);

    if config.simulate_result {
        tracing::info!("Simulation mode enabled - adapters are not connected");
        let discovery = SimulatedDiscovery::new(config.simulate_interfaces.clone());
        drive(discovery, &config, &report).await
    } else {
        drive(platform_discovery(config.command_timeout), &config, &report).await
    }
}

/// Runs discovery and the selected mode with the given discovery source.
///
/// Excluded from coverage - requires platform connector and inspector.
#[cfg(not(tarpaulin_include))]
async fn drive<D: AdapterDiscovery>(
    discovery: D,
    config: &ValidatedConfig,
    report: &CsvReport,
) -> Result<(), RunError> {
    let mut engine = TestEngine::new(
        discovery,
        platform_connector(config.command_timeout),
        PlatformInspector::default(),
        config.engine_settings(),
    );
    let mut observer = ConsoleObserver::new(io::stdout(), config.show_progress);

    let generation = engine.refresh(&mut observer).await?;
    if generation.is_empty() {
        println!("No adapters matching {} found", config.identity);
        return Ok(());
    }

    match &config.mode {
        Mode::Scan => {
            for interface in generation.interfaces() {
                println!("{interface}");
            }
            Ok(())
        }
        Mode::Test(interface) => {
            engine.test_adapter(interface, &mut observer).await?;
            save_results(&engine.records(), config.auto_save, report).await
        }
        Mode::Run => {
            let (cancel_tx, cancel_rx) = watch::channel(false);
            let watcher = tokio::spawn(async move {
                shutdown_signal().await;
                tracing::info!("Shutdown signal received, stopping after current adapter...");
                // Receiver is gone once the batch ended
                let _ = cancel_tx.send(true);
            });

            let status = engine.run_batch(&mut observer, &cancel_rx).await;
            watcher.abort();

            match status {
                BatchStatus::Finished => {
                    save_results(&engine.records(), config.auto_save, report).await
                }
                BatchStatus::Cancelled { remaining } => {
                    tracing::warn!("Results not saved: {remaining} adapter(s) left untested");
                    Ok(())
                }
            }
        }
    }
}

/// Applies the save policy to `records`.
async fn save_results<S: ResultSink>(
    records: &[ResultRecord],
    auto_save: bool,
    sink: &S,
) -> Result<(), RunError> {
    if records.is_empty() {
        return Ok(());
    }

    let save = match SavePolicy::choose(auto_save, io::stdin().is_terminal()) {
        SavePolicy::Auto => true,
        SavePolicy::Ask => confirm_save(records.len()).await,
        SavePolicy::Skip => {
            tracing::info!("Not an interactive terminal and auto-save is off, results not saved");
            false
        }
    };

    if !save {
        return Ok(());
    }

    sink.append(records).await.map_err(RunError::Report)
}

/// Asks the operator whether to save. Any read failure counts as "no".
async fn confirm_save(count: usize) -> bool {
    let answer = tokio::task::spawn_blocking(move || -> io::Result<String> {
        print!("Save {count} result(s)? [y/N] ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line)
    })
    .await;

    match answer {
        Ok(Ok(line)) => is_affirmative(&line),
        Ok(Err(e)) => {
            tracing::warn!("Failed to read confirmation: {e}");
            false
        }
        Err(e) => {
            tracing::warn!("Confirmation prompt failed: {e}");
            false
        }
    }
}

/// Returns true for `y` or `yes`, ignoring case and surrounding whitespace.
fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a handler cannot be installed the corresponding signal is never
/// observed.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
