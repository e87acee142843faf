//! Integration tests for single runs, races and sessions.

use sortrace_algorithms::AlgorithmKind;
use sortrace_core::{
    CancellationToken, NullObserver, Pacer, RunObserver, Sequence, State,
};
use sortrace_input::{DataPattern, RunConfig, ValidationError};
use sortrace_runner::{
    run_single, LaneStatus, RaceOrchestrator, RacePhase, RunStatus, RunnerError, Session,
    StopHandle,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn quick_config() -> RunConfig {
    RunConfig {
        size: 24,
        step_unit_ms: 0,
        seed: Some(42),
        ..Default::default()
    }
}

fn session() -> Session {
    Session::new(quick_config(), Arc::new(NullObserver)).unwrap()
}

fn sorted_values(seq: &Sequence) -> Vec<u32> {
    let mut values = seq.values();
    values.sort_unstable();
    values
}

/// Panics whenever the named lane renders.
struct PanicOn(&'static str);

impl RunObserver for PanicOn {
    fn render(&self, algorithm: Option<&str>, _sequence: &Sequence) {
        if algorithm == Some(self.0) {
            panic!("renderer exploded for {}", self.0);
        }
    }
}

/// Trips the token once any lane reaches `limit` comparisons.
struct CancelAt {
    token: CancellationToken,
    limit: u64,
}

impl RunObserver for CancelAt {
    fn update_race_counters(&self, _algorithm: &str, comparisons: u64, _swaps: u64, _elapsed_ms: u64) {
        if comparisons >= self.limit {
            self.token.cancel();
        }
    }
}

/// Presses stop once the single run has made `limit` swaps.
struct StopAtSwaps {
    stop: StopHandle,
    limit: u64,
}

impl RunObserver for StopAtSwaps {
    fn update_counters(&self, _comparisons: u64, swaps: u64, _elapsed_ms: u64) {
        if swaps >= self.limit {
            self.stop.stop();
        }
    }
}

/// Records the last progress value seen for a single run.
#[derive(Default)]
struct ProgressLog {
    seen: Mutex<Vec<u8>>,
    counters: AtomicU64,
}

impl RunObserver for ProgressLog {
    fn update_progress(&self, _algorithm: Option<&str>, percentage: u8) {
        self.seen.lock().unwrap().push(percentage);
    }

    fn update_counters(&self, _comparisons: u64, _swaps: u64, _elapsed_ms: u64) {
        self.counters.fetch_add(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Single run
// =============================================================================

#[tokio::test]
async fn test_single_run_completes() {
    let log = Arc::new(ProgressLog::default());
    let input = Sequence::from(vec![9, 4, 7, 1, 8, 2]);

    let summary = run_single(
        AlgorithmKind::Insertion,
        &input,
        Pacer::unpaced(),
        CancellationToken::new(),
        log.clone(),
    )
    .await
    .unwrap();

    assert_eq!(summary.status, RunStatus::Completed);
    assert_eq!(summary.sequence.values(), vec![1, 2, 4, 7, 8, 9]);
    assert_eq!(summary.sequence.count_in(State::Sorted), 6);
    assert!(summary.comparisons > 0);
    assert_eq!(log.seen.lock().unwrap().last(), Some(&100));
    assert!(log.counters.load(Ordering::SeqCst) > 0);
    // input is never mutated
    assert_eq!(input.values(), vec![9, 4, 7, 1, 8, 2]);
}

#[tokio::test]
async fn test_single_run_cancelled_before_start() {
    let token = CancellationToken::new();
    token.cancel();
    let input = Sequence::from(vec![3, 2, 1, 5, 4]);

    let summary = run_single(
        AlgorithmKind::Bubble,
        &input,
        Pacer::unpaced(),
        token,
        Arc::new(NullObserver),
    )
    .await
    .unwrap();

    assert_eq!(summary.status, RunStatus::Cancelled);
    assert_eq!(summary.comparisons, 1);
    assert!(summary
        .sequence
        .elements()
        .iter()
        .all(|e| !e.state.is_transient()));
}

// =============================================================================
// Race
// =============================================================================

#[tokio::test]
async fn test_race_lanes_are_independent() {
    let input = Sequence::from(vec![50, 20, 90, 10, 70, 30, 80, 60, 40]);
    let mut race = RaceOrchestrator::new(Pacer::unpaced(), CancellationToken::new(), Arc::new(NullObserver));
    assert_eq!(race.phase(), RacePhase::Idle);

    let report = race.run(&["bubble", "quick"], &input).await;

    assert_eq!(race.phase(), RacePhase::Ranked);
    assert!(!report.cancelled);
    assert!(report.failures.is_empty());
    assert_eq!(report.leaderboard.len(), 2);
    assert_eq!(report.input_digest, input.digest());

    let bubble = report.lane(AlgorithmKind::Bubble).unwrap();
    let quick = report.lane(AlgorithmKind::Quick).unwrap();
    assert_eq!(bubble.status, LaneStatus::Finished);
    assert_eq!(quick.status, LaneStatus::Finished);
    assert_eq!(bubble.sequence.values(), sorted_values(&input));
    assert_eq!(bubble.sequence, quick.sequence);

    let ranks: Vec<_> = report.leaderboard.iter().map(|r| r.rank()).collect();
    assert_eq!(ranks, vec![1, 2]);
}

#[tokio::test]
async fn test_race_counts_match_single_runs() {
    let input = Sequence::from(vec![8, 3, 5, 1, 9, 2, 7]);
    let mut race = RaceOrchestrator::new(Pacer::unpaced(), CancellationToken::new(), Arc::new(NullObserver));
    let report = race.run(&["heap", "merge"], &input).await;

    for kind in [AlgorithmKind::Heap, AlgorithmKind::Merge] {
        let single = run_single(kind, &input, Pacer::unpaced(), CancellationToken::new(), Arc::new(NullObserver))
            .await
            .unwrap();
        let lane = report.lane(kind).unwrap();
        assert_eq!(lane.comparisons, single.comparisons, "{}", kind);
        assert_eq!(lane.swaps, single.swaps, "{}", kind);
    }
}

#[tokio::test]
async fn test_unknown_selector_is_isolated() {
    let input = Sequence::from(vec![4, 1, 3, 2]);
    let mut race = RaceOrchestrator::new(Pacer::unpaced(), CancellationToken::new(), Arc::new(NullObserver));
    let report = race.run(&["quick", "bogosort"], &input).await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].lane, 1);
    assert_eq!(report.failures[0].algorithm, "bogosort");
    assert_eq!(report.leaderboard.len(), 1);
    assert_eq!(report.winner().unwrap().algorithm(), AlgorithmKind::Quick);
}

#[tokio::test]
async fn test_panicking_lane_does_not_stop_others() {
    let input = Sequence::from(vec![6, 5, 4, 3, 2, 1]);
    let mut race = RaceOrchestrator::new(Pacer::unpaced(), CancellationToken::new(), Arc::new(PanicOn("heap")));
    let report = race.run(&["selection", "heap", "merge"], &input).await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].lane, 1);
    assert_eq!(report.failures[0].reason, "lane panicked");

    let finished: Vec<_> = report.leaderboard.iter().map(|r| r.algorithm()).collect();
    assert_eq!(finished.len(), 2);
    assert!(finished.contains(&AlgorithmKind::Selection));
    assert!(finished.contains(&AlgorithmKind::Merge));
    assert!(report.lane(AlgorithmKind::Heap).is_none());
}

#[tokio::test]
async fn test_stop_cancels_every_lane() {
    let token = CancellationToken::new();
    let observer = Arc::new(CancelAt {
        token: token.clone(),
        limit: 10,
    });
    let input = Sequence::from((1..=60).rev().collect::<Vec<u32>>());
    let mut race = RaceOrchestrator::new(Pacer::unpaced(), token, observer);

    let report = race.run(&["bubble", "selection", "insertion"], &input).await;

    assert!(report.cancelled);
    assert!(report.leaderboard.is_empty());
    assert_eq!(report.lanes.len(), 3);
    for lane in &report.lanes {
        assert_eq!(lane.status, LaneStatus::Cancelled, "{}", lane.algorithm);
        assert!(lane
            .sequence
            .elements()
            .iter()
            .all(|e| matches!(e.state, State::Default | State::Sorted)));
    }
}

#[test]
fn test_report_serializes() {
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
    let report = rt.block_on(async {
        let mut race = RaceOrchestrator::new(Pacer::unpaced(), CancellationToken::new(), Arc::new(NullObserver));
        race.run(&["insertion"], &Sequence::from(vec![3, 1, 2])).await
    });

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["leaderboard"][0]["algorithm"], "insertion");
    assert_eq!(json["leaderboard"][0]["rank"], 1);
    assert_eq!(json["lanes"][0]["status"], "finished");
    assert_eq!(json["lanes"][0]["sequence"][0]["state"], "sorted");
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_session_rejects_flat_custom_input() {
    let mut session = session();
    let before = session.sequence().clone();

    let err = session.load_custom("5,5,5").unwrap_err();
    assert!(matches!(err, RunnerError::Validation(ValidationError::ZeroRange)));
    assert!(err.is_rejection());
    assert_eq!(session.sequence(), &before);

    let err = session.load_custom("1, two, 3").unwrap_err();
    assert!(matches!(err, RunnerError::Validation(ValidationError::NotANumber { .. })));
    assert_eq!(session.sequence(), &before);
}

#[test]
fn test_session_accepts_custom_input() {
    let mut session = session();
    let seq = session.load_custom("1,2,3").unwrap();
    assert_eq!(seq.values(), vec![10, 150, 290]);
    assert_eq!(session.config().custom_values.as_deref(), Some("1,2,3"));
}

#[test]
fn test_session_size_validation() {
    let mut session = session();
    assert!(matches!(
        session.set_size(2),
        Err(RunnerError::Validation(ValidationError::SizeOutOfRange(2)))
    ));
    assert_eq!(session.sequence().len(), 24);
    assert_eq!(session.set_size(10).unwrap().len(), 10);
    assert!(session.set_speed(11).is_err());
    assert_eq!(session.config().speed, 5);
}

#[tokio::test]
async fn test_session_run_keeps_final_sequence() {
    let mut session = session();
    let expected = sorted_values(session.sequence());

    let summary = session.run("merge").await.unwrap();
    assert_eq!(summary.status, RunStatus::Completed);
    assert_eq!(session.sequence().values(), expected);
    assert_eq!(session.sequence().count_in(State::Sorted), 24);
    assert!(!session.is_running());
}

#[tokio::test]
async fn test_session_unknown_algorithm_leaves_sequence() {
    let mut session = session();
    let before = session.sequence().clone();
    let err = session.run("bogosort").await.unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(session.sequence(), &before);
}

#[tokio::test]
async fn test_session_race_leaves_sequence() {
    let mut session = session();
    let before = session.sequence().clone();

    let report = session.race(&["bubble", "heap", "quick"]).await.unwrap();
    assert_eq!(report.leaderboard.len(), 3);
    assert_eq!(session.sequence(), &before);

    let empty: [&str; 0] = [];
    assert!(matches!(session.race(&empty).await, Err(RunnerError::EmptyRace)));
}

#[tokio::test]
async fn test_shared_stop_handle_reports_busy() {
    let stop = StopHandle::new();
    let slow = RunConfig {
        size: 30,
        speed: 1,
        step_unit_ms: 5,
        seed: Some(1),
        ..Default::default()
    };
    let mut first = Session::with_stop_handle(slow, Arc::new(NullObserver), stop.clone()).unwrap();
    let mut second = Session::with_stop_handle(quick_config(), Arc::new(NullObserver), stop.clone()).unwrap();

    let running = tokio::spawn(async move { first.run("bubble").await });
    while !stop.is_running() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    assert!(matches!(second.run("quick").await, Err(RunnerError::Busy)));
    assert!(matches!(second.regenerate(), Err(RunnerError::Busy)));

    assert!(stop.stop());
    let summary = running.await.unwrap().unwrap();
    assert_eq!(summary.status, RunStatus::Cancelled);
    assert!(!stop.is_running());
    assert!(!stop.stop());

    assert!(second.run("quick").await.is_ok());
}

#[test]
fn test_session_reconfigure_is_all_or_nothing() {
    let mut session = session();
    let before = session.sequence().clone();

    let err = session.reconfigure(None, Some(2), Some(9)).unwrap_err();
    assert!(matches!(err, RunnerError::Validation(ValidationError::SizeOutOfRange(2))));
    assert_eq!(session.config().speed, 5);
    assert_eq!(session.config().size, 24);
    assert_eq!(session.sequence(), &before);

    let seq = session.reconfigure(Some(DataPattern::Reverse), Some(10), Some(9)).unwrap();
    assert_eq!(seq.len(), 10);
    assert!(seq.values().windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(session.config().speed, 9);
}

#[tokio::test]
async fn test_stopped_merge_keeps_session_values() {
    let stop = StopHandle::new();
    let observer = Arc::new(StopAtSwaps {
        stop: stop.clone(),
        limit: 3,
    });
    let mut session = Session::with_stop_handle(quick_config(), observer, stop).unwrap();
    let before = session.load_custom("8 7 6 5 4 3 2 1").unwrap().clone();

    let summary = session.run("merge").await.unwrap();
    assert_eq!(summary.status, RunStatus::Cancelled);
    assert!(summary.sequence.is_permutation_of(&before));
    assert!(session.sequence().is_permutation_of(&before));
    assert!(session
        .sequence()
        .elements()
        .iter()
        .all(|e| !e.state.is_transient()));

    // the next run starts from the supplied values
    assert_eq!(sorted_values(session.sequence()), sorted_values(&before));
}
