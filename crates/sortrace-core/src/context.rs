//! Execution Context: the only channel between algorithm code and the world
//!
//! Algorithms are written once against [`ExecutionContext`]. Two variants
//! exist: [`SingleRunContext`] feeds the shared counters and the chime,
//! [`RaceRunContext`] feeds one lane of a race and stays silent.

use crate::data_model::{Element, Sequence, State};
use crate::error::SortError;
use crate::observer::RunObserver;
use crate::scheduler::{CancellationToken, Pacer, Pause};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-run state shared by both context variants.
pub struct RunState {
    sequence: Sequence,
    comparisons: u64,
    swaps: u64,
    progress: u8,
    started: Instant,
    pacer: Pacer,
    token: CancellationToken,
    observer: Arc<dyn RunObserver>,
}

impl RunState {
    pub fn new(
        sequence: Sequence,
        pacer: Pacer,
        token: CancellationToken,
        observer: Arc<dyn RunObserver>,
    ) -> Self {
        Self {
            sequence,
            comparisons: 0,
            swaps: 0,
            progress: 0,
            started: Instant::now(),
            pacer,
            token,
            observer,
        }
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn observer(&self) -> &dyn RunObserver {
        self.observer.as_ref()
    }

    /// Reset the private clock to "now".
    pub fn restart_clock(&mut self) {
        self.started = Instant::now();
    }

    pub fn into_sequence(self) -> Sequence {
        self.sequence
    }
}

impl std::fmt::Debug for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunState")
            .field("len", &self.sequence.len())
            .field("comparisons", &self.comparisons)
            .field("swaps", &self.swaps)
            .field("progress", &self.progress)
            .field("pacer", &self.pacer)
            .finish()
    }
}

/// Capability interface the algorithm engine runs against.
///
/// Implementors supply the four presentation hooks; everything else is
/// provided on top of [`RunState`].
pub trait ExecutionContext: Send {
    fn run_state(&self) -> &RunState;

    fn run_state_mut(&mut self) -> &mut RunState;

    /// Push the current counters to the collaborator.
    fn publish_counters(&self);

    /// Push a new progress percentage to the collaborator.
    fn publish_progress(&self, percentage: u8);

    /// Push the current sequence to the collaborator.
    fn render(&self);

    /// Best-effort tone for an element value. Never fails.
    fn chime(&self, value: u32);

    fn sequence(&self) -> &Sequence {
        self.run_state().sequence()
    }

    fn len(&self) -> usize {
        self.run_state().sequence.len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn value(&self, index: usize) -> u32 {
        self.run_state().sequence.value(index)
    }

    fn element(&self, index: usize) -> Element {
        self.run_state().sequence.elements()[index]
    }

    fn state(&self, index: usize) -> State {
        self.run_state().sequence.state(index)
    }

    fn set_state(&mut self, index: usize, state: State) {
        self.run_state_mut().sequence.set_state(index, state);
    }

    fn exchange(&mut self, a: usize, b: usize) {
        self.run_state_mut().sequence.exchange(a, b);
    }

    fn write(&mut self, index: usize, element: Element) {
        self.run_state_mut().sequence.write(index, element);
    }

    fn comparisons(&self) -> u64 {
        self.run_state().comparisons
    }

    fn swaps(&self) -> u64 {
        self.run_state().swaps
    }

    /// Exactly once per element-to-element ordering test.
    fn record_comparison(&mut self) {
        self.run_state_mut().comparisons += 1;
        self.publish_counters();
    }

    /// Exactly once per position-changing move.
    fn record_swap(&mut self) {
        self.run_state_mut().swaps += 1;
        self.publish_counters();
    }

    /// Report how many elements are finally placed. The percentage never
    /// goes backwards within a run.
    fn report_progress(&mut self, sorted_count: usize) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let percentage = ((sorted_count.min(len) * 100) / len) as u8;
        if percentage > self.run_state().progress {
            self.run_state_mut().progress = percentage;
            self.publish_progress(percentage);
        }
    }

    fn suspend(&self, pause: Pause) -> impl Future<Output = Result<(), SortError>> + Send {
        let state = self.run_state();
        state.pacer.suspend(&state.token, pause)
    }

    /// Normal finish: every element sorted, progress at 100.
    fn complete(&mut self) {
        self.run_state_mut().sequence.mark_all(State::Sorted);
        self.report_progress(self.len());
        self.publish_counters();
        self.render();
    }

    /// Interrupted finish: no rollback, transient highlights cleared.
    fn abandon(&mut self) {
        self.run_state_mut().sequence.settle_transient();
        self.render();
    }
}

/// Context for a lone run: shared counters and audible feedback.
#[derive(Debug)]
pub struct SingleRunContext {
    state: RunState,
    tone_ceiling: u32,
}

impl SingleRunContext {
    pub const TONE_BASE_HZ: f64 = 200.0;
    pub const TONE_SPAN_HZ: f64 = 600.0;
    const TONE_LENGTH: Duration = Duration::from_millis(50);

    pub fn new(
        sequence: Sequence,
        pacer: Pacer,
        token: CancellationToken,
        observer: Arc<dyn RunObserver>,
    ) -> Self {
        let tone_ceiling = sequence.elements().iter().map(|e| e.value).max().unwrap_or(1).max(1);
        Self {
            state: RunState::new(sequence, pacer, token, observer),
            tone_ceiling,
        }
    }

    pub fn frequency_for(&self, value: u32) -> f64 {
        Self::TONE_BASE_HZ + f64::from(value) / f64::from(self.tone_ceiling) * Self::TONE_SPAN_HZ
    }

    pub fn into_state(self) -> RunState {
        self.state
    }
}

impl ExecutionContext for SingleRunContext {
    fn run_state(&self) -> &RunState {
        &self.state
    }

    fn run_state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }

    fn publish_counters(&self) {
        self.state
            .observer()
            .update_counters(self.state.comparisons, self.state.swaps, self.state.elapsed_ms());
    }

    fn publish_progress(&self, percentage: u8) {
        self.state.observer().update_progress(None, percentage);
    }

    fn render(&self) {
        self.state.observer().render(None, &self.state.sequence);
    }

    fn chime(&self, value: u32) {
        let frequency = self.frequency_for(value);
        if let Err(err) = self.state.observer().chime(frequency, Some(Self::TONE_LENGTH)) {
            tracing::debug!(error = %err, frequency, "chime dropped");
        }
    }
}

/// Context for one lane of a race. Silent; reports under its algorithm id.
#[derive(Debug)]
pub struct RaceRunContext {
    state: RunState,
    algorithm: String,
}

impl RaceRunContext {
    pub fn new(
        algorithm: impl Into<String>,
        sequence: Sequence,
        pacer: Pacer,
        token: CancellationToken,
        observer: Arc<dyn RunObserver>,
    ) -> Self {
        Self {
            state: RunState::new(sequence, pacer, token, observer),
            algorithm: algorithm.into(),
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn into_state(self) -> RunState {
        self.state
    }
}

impl ExecutionContext for RaceRunContext {
    fn run_state(&self) -> &RunState {
        &self.state
    }

    fn run_state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }

    fn publish_counters(&self) {
        self.state.observer().update_race_counters(
            &self.algorithm,
            self.state.comparisons,
            self.state.swaps,
            self.state.elapsed_ms(),
        );
    }

    fn publish_progress(&self, percentage: u8) {
        self.state.observer().update_progress(Some(&self.algorithm), percentage);
    }

    fn render(&self) {
        self.state.observer().render(Some(&self.algorithm), &self.state.sequence);
    }

    fn chime(&self, _value: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        progress: Mutex<Vec<(Option<String>, u8)>>,
        race_counters: Mutex<Vec<(String, u64, u64)>>,
        chimes: Mutex<Vec<f64>>,
    }

    impl RunObserver for Recorder {
        fn update_race_counters(&self, algorithm: &str, comparisons: u64, swaps: u64, _elapsed_ms: u64) {
            self.race_counters
                .lock()
                .unwrap()
                .push((algorithm.to_string(), comparisons, swaps));
        }

        fn update_progress(&self, algorithm: Option<&str>, percentage: u8) {
            self.progress
                .lock()
                .unwrap()
                .push((algorithm.map(str::to_string), percentage));
        }

        fn chime(&self, frequency_hz: f64, _duration: Option<Duration>) -> anyhow::Result<()> {
            self.chimes.lock().unwrap().push(frequency_hz);
            anyhow::bail!("no audio device")
        }
    }

    fn single(values: Vec<u32>, observer: Arc<dyn RunObserver>) -> SingleRunContext {
        SingleRunContext::new(
            Sequence::from(values),
            Pacer::unpaced(),
            CancellationToken::new(),
            observer,
        )
    }

    #[test]
    fn test_progress_never_decreases() {
        let recorder = Arc::new(Recorder::default());
        let mut ctx = single(vec![1, 2, 3, 4], recorder.clone());
        ctx.report_progress(2);
        ctx.report_progress(1);
        ctx.report_progress(2);
        ctx.report_progress(9);
        assert_eq!(ctx.run_state().progress(), 100);
        let seen: Vec<u8> = recorder.progress.lock().unwrap().iter().map(|p| p.1).collect();
        assert_eq!(seen, vec![50, 100]);
    }

    #[test]
    fn test_race_context_reports_under_its_id() {
        let recorder = Arc::new(Recorder::default());
        let mut ctx = RaceRunContext::new(
            "quick",
            Sequence::from(vec![3, 2, 1]),
            Pacer::unpaced(),
            CancellationToken::new(),
            recorder.clone(),
        );
        ctx.record_comparison();
        ctx.record_swap();
        ctx.chime(3);
        ctx.complete();

        let counters = recorder.race_counters.lock().unwrap().clone();
        assert_eq!(counters.first(), Some(&("quick".to_string(), 1, 0)));
        assert_eq!(counters.last(), Some(&("quick".to_string(), 1, 1)));
        assert!(recorder.chimes.lock().unwrap().is_empty());
        assert_eq!(
            recorder.progress.lock().unwrap().last(),
            Some(&(Some("quick".to_string()), 100))
        );
        assert_eq!(ctx.sequence().count_in(State::Sorted), 3);
    }

    #[test]
    fn test_failing_chime_is_swallowed() {
        let recorder = Arc::new(Recorder::default());
        let ctx = single(vec![10, 20], recorder.clone());
        ctx.chime(20);
        let chimes = recorder.chimes.lock().unwrap().clone();
        assert_eq!(chimes, vec![SingleRunContext::TONE_BASE_HZ + SingleRunContext::TONE_SPAN_HZ]);
    }

    #[tokio::test]
    async fn test_suspend_observes_shared_token() {
        let token = CancellationToken::new();
        let ctx = SingleRunContext::new(
            Sequence::from(vec![1, 2, 3]),
            Pacer::unpaced(),
            token.clone(),
            Arc::new(NullObserver),
        );
        assert!(ctx.suspend(Pause::Step).await.is_ok());
        token.cancel();
        assert_eq!(ctx.suspend(Pause::Step).await, Err(SortError::Cancelled));
    }

    #[test]
    fn test_abandon_clears_highlights() {
        let mut ctx = single(vec![4, 5, 6], Arc::new(NullObserver));
        ctx.set_state(0, State::Sorted);
        ctx.set_state(1, State::Swapping);
        ctx.set_state(2, State::Current);
        ctx.abandon();
        assert_eq!(ctx.state(0), State::Sorted);
        assert_eq!(ctx.state(1), State::Default);
        assert_eq!(ctx.state(2), State::Default);
    }
}
