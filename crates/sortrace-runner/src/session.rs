//! Session: current sequence, configuration and the shared stop switch
use crate::race::{RaceOrchestrator, RaceReport};
use crate::single::{run_single, RunSummary};
use crate::RunnerError;
use rand::rngs::StdRng;
use sortrace_algorithms::AlgorithmKind;
use sortrace_core::{CancellationToken, RunObserver, Sequence};
use sortrace_input::{parse_custom, DataPattern, RunConfig};
use std::sync::{Arc, Mutex, MutexGuard};

/// Process-wide "is running" switch.
///
/// Holds the token of the run in flight, if any. `stop` trips it, which
/// makes every context of that run fail at its next suspension point.
/// Clones share the switch.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    active: Arc<Mutex<Option<CancellationToken>>>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Request cancellation. Returns `false` when nothing is running.
    pub fn stop(&self) -> bool {
        match self.slot().as_ref() {
            Some(token) => {
                token.cancel();
                tracing::info!("stop requested");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.slot().is_some()
    }

    fn arm(&self) -> Result<ArmedRun, RunnerError> {
        let mut slot = self.slot();
        if slot.is_some() {
            return Err(RunnerError::Busy);
        }
        let token = CancellationToken::new();
        *slot = Some(token.clone());
        Ok(ArmedRun {
            handle: self.clone(),
            token,
        })
    }
}

/// Clears the switch when the run ends, however it ends.
struct ArmedRun {
    handle: StopHandle,
    token: CancellationToken,
}

impl Drop for ArmedRun {
    fn drop(&mut self) {
        self.handle.slot().take();
    }
}

pub struct Session {
    config: RunConfig,
    sequence: Sequence,
    rng: StdRng,
    observer: Arc<dyn RunObserver>,
    stop: StopHandle,
}

impl Session {
    pub fn new(config: RunConfig, observer: Arc<dyn RunObserver>) -> Result<Self, RunnerError> {
        Self::with_stop_handle(config, observer, StopHandle::new())
    }

    /// Build a session that shares `stop` with others, so only one of them
    /// can run at a time and one stop reaches all of them.
    pub fn with_stop_handle(
        config: RunConfig,
        observer: Arc<dyn RunObserver>,
        stop: StopHandle,
    ) -> Result<Self, RunnerError> {
        config.validate()?;
        let mut rng = config.rng();
        let sequence = config.initial_sequence(&mut rng)?;
        Ok(Self {
            config,
            sequence,
            rng,
            observer,
            stop,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_running()
    }

    /// Replace the sequence with a fresh one from the configured pattern.
    pub fn regenerate(&mut self) -> Result<&Sequence, RunnerError> {
        self.ensure_idle()?;
        self.config.custom_values = None;
        self.sequence = self.config.generate(&mut self.rng);
        Ok(&self.sequence)
    }

    pub fn set_pattern(&mut self, pattern: DataPattern) -> Result<&Sequence, RunnerError> {
        self.config.pattern = pattern;
        self.regenerate()
    }

    pub fn set_size(&mut self, size: usize) -> Result<&Sequence, RunnerError> {
        let candidate = RunConfig { size, ..self.config.clone() };
        candidate.validate()?;
        self.config = candidate;
        self.regenerate()
    }

    /// Apply any of pattern, size and speed together and regenerate. Nothing
    /// changes unless the combined configuration is valid.
    pub fn reconfigure(
        &mut self,
        pattern: Option<DataPattern>,
        size: Option<usize>,
        speed: Option<u8>,
    ) -> Result<&Sequence, RunnerError> {
        self.ensure_idle()?;
        let mut candidate = self.config.clone();
        if let Some(pattern) = pattern {
            candidate.pattern = pattern;
        }
        if let Some(size) = size {
            candidate.size = size;
        }
        if let Some(speed) = speed {
            candidate.speed = speed;
        }
        candidate.custom_values = None;
        candidate.validate()?;
        self.config = candidate;
        self.regenerate()
    }

    /// Speed takes effect on the next run.
    pub fn set_speed(&mut self, speed: u8) -> Result<(), RunnerError> {
        let candidate = RunConfig { speed, ..self.config.clone() };
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// Parse user values. On any validation failure the current sequence is
    /// left exactly as it was.
    pub fn load_custom(&mut self, text: &str) -> Result<&Sequence, RunnerError> {
        self.ensure_idle()?;
        let sequence = parse_custom(text, self.config.value_range)?;
        self.config.custom_values = Some(text.to_string());
        self.sequence = sequence;
        Ok(&self.sequence)
    }

    /// Run one algorithm over a copy of the current sequence. The final
    /// state of that copy becomes the session's sequence, provided it still
    /// holds the same values.
    pub async fn run(&mut self, selector: &str) -> Result<RunSummary, RunnerError> {
        let kind: AlgorithmKind = selector.parse()?;
        let armed = self.stop.arm()?;
        let summary = run_single(
            kind,
            &self.sequence,
            self.config.pacer(),
            armed.token.clone(),
            self.observer.clone(),
        )
        .await?;
        if summary.sequence.is_permutation_of(&self.sequence) {
            self.sequence = summary.sequence.clone();
        } else {
            tracing::warn!(
                run_id = %summary.run_id,
                algorithm = %kind,
                "run changed the values, sequence not adopted"
            );
        }
        Ok(summary)
    }

    /// Run the configured algorithm.
    pub async fn run_configured(&mut self) -> Result<RunSummary, RunnerError> {
        let selector = self.config.algorithm.id();
        self.run(selector).await
    }

    /// Race `selectors` over copies of the current sequence. The session's
    /// own sequence is not touched.
    pub async fn race<S: AsRef<str>>(&mut self, selectors: &[S]) -> Result<RaceReport, RunnerError> {
        if selectors.is_empty() {
            return Err(RunnerError::EmptyRace);
        }
        let armed = self.stop.arm()?;
        let mut orchestrator =
            RaceOrchestrator::new(self.config.pacer(), armed.token.clone(), self.observer.clone());
        Ok(orchestrator.run(selectors, &self.sequence).await)
    }

    fn ensure_idle(&self) -> Result<(), RunnerError> {
        if self.stop.is_running() {
            Err(RunnerError::Busy)
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("len", &self.sequence.len())
            .field("running", &self.is_running())
            .finish()
    }
}
