use std::sync::Mutex;
use std::time::Duration;

use santap::core::{
    Coordinator, MisuseError, ProgressSink, RandomThink, RunError, StrategyKind, TracingSink,
};

#[derive(Default)]
struct RecordingSink {
    meals: Mutex<usize>,
    finished: Mutex<Vec<usize>>,
}

impl ProgressSink for RecordingSink {
    fn meal_served(&self, _id: usize, _remaining: u32) {
        *self.meals.lock().unwrap() += 1;
    }

    fn finished(&self, id: usize) {
        self.finished.lock().unwrap().push(id);
    }
}

fn run(seats: usize, meals: u32, kind: StrategyKind, sink: &dyn ProgressSink) {
    let coordinator = Coordinator::new(seats, meals).expect("valid table rejected");
    let strategy = kind.build();
    coordinator
        .run(
            strategy.as_ref(),
            &RandomThink::new(Duration::from_micros(2)),
            sink,
        )
        .expect("run failed");
}

#[test]
fn every_table_size_completes_with_both_strategies() {
    for kind in [StrategyKind::Admission, StrategyKind::Backoff] {
        for seats in [3, 4, 10, 50] {
            let sink = RecordingSink::default();
            run(seats, 20, kind, &sink);

            assert_eq!(
                *sink.meals.lock().unwrap(),
                seats * 20,
                "{kind:?} at {seats} seats lost meals"
            );
            assert_eq!(
                sink.finished.lock().unwrap().len(),
                seats,
                "{kind:?} at {seats} seats lost completions"
            );
        }
    }
}

#[test]
fn admission_banquet_reports_positive_elapsed_time() {
    let stats = santap::banquet(5, 100, StrategyKind::Admission).expect("banquet failed");
    assert!(
        stats.elapsed() > Duration::ZERO,
        "five hundred meals cannot take zero time"
    );
}

#[test]
fn a_minimum_table_notifies_each_philosopher_exactly_once() {
    for kind in [StrategyKind::Admission, StrategyKind::Backoff] {
        let sink = RecordingSink::default();
        run(3, 1, kind, &sink);

        let mut finished = sink.finished.lock().unwrap().clone();
        finished.sort_unstable();
        assert_eq!(finished, vec![0, 1, 2], "{kind:?} completions wrong");
        assert_eq!(*sink.meals.lock().unwrap(), 3);
    }
}

#[test]
fn a_seated_coordinator_can_be_inspected() {
    // Coordinator must stay Debug: expect_err on Coordinator::new needs it.
    let coordinator = Coordinator::new(3, 10).expect("valid table rejected");
    assert!(format!("{coordinator:?}").contains("Coordinator"));
}

#[test]
fn a_table_of_two_is_rejected_before_anyone_is_seated() {
    let err = Coordinator::new(2, 10).expect_err("undersized table accepted");
    assert!(matches!(err, RunError::TooFewSeats(2)), "got {err:?}");

    let err = santap::banquet(2, 10, StrategyKind::Backoff).expect_err("undersized table accepted");
    assert!(matches!(err, RunError::TooFewSeats(2)));
}

#[test]
fn misuse_errors_carry_the_offending_fork() {
    let err = RunError::from(MisuseError::ReleaseWhileFree(4));
    assert_eq!(err.to_string(), "fork 4 released while free");
}

#[test]
fn the_default_collaborators_survive_a_quiet_run() {
    // TracingSink with no subscriber installed must stay a no-op.
    let coordinator = Coordinator::new(3, 5).expect("valid table rejected");
    let strategy = StrategyKind::Backoff.build();
    let stats = coordinator
        .run(strategy.as_ref(), &RandomThink::default(), &TracingSink)
        .expect("run failed");
    assert!(stats.finished_at >= stats.started_at);
}
