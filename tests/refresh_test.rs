mod common;

use std::sync::Arc;
use std::time::Duration;

use fx_pulse::analysis::{accumulate, score_event};
use fx_pulse::{
    Direction, FixedClock, ImpactWeight, MemoryStorage, NoopPacer, RefreshOutcome, StrengthEngine,
};

use common::{ScriptedCalendar, day, eur_beat, event, rig, seed_history, seed_marker};

const SPEED: f64 = 0.2;

fn eur_beat_trend(base: f64) -> f64 {
    accumulate(base, score_event(1.0, 1.0, "2.5%", "2.0%"), SPEED)
}

#[tokio::test]
async fn first_run_appends_yesterday_as_a_single_day() {
    let rig = rig(day(2024, 5, 2));
    rig.calendar.script(day(2024, 5, 1), vec![eur_beat()]).await;

    let outcome = rig.engine.refresh().await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Backfilled { days: 1 });

    let history = rig.engine.strength_history().await.unwrap();
    let expected = eur_beat_trend(0.0);
    assert_eq!(history.window("EUR").unwrap().points(), &[0.0, 0.0, expected]);
    // USD had no events: its window rolled forward unchanged.
    assert_eq!(history.window("USD").unwrap().points(), &[0.0, 0.0, 0.0]);
}

#[tokio::test]
async fn same_day_rerun_corrects_in_place_idempotently() {
    let rig = rig(day(2024, 5, 2));
    rig.calendar.script(day(2024, 5, 1), vec![eur_beat()]).await;

    rig.engine.refresh().await.unwrap();
    let after_first = rig.engine.strength_history().await.unwrap();

    // Re-running on the same day must overwrite, not append, and re-base
    // from the second-to-last point so nothing drifts.
    let second = rig.engine.refresh().await.unwrap();
    assert_eq!(second, RefreshOutcome::Corrected);
    let after_second = rig.engine.strength_history().await.unwrap();
    assert_eq!(after_first, after_second);

    rig.engine.refresh().await.unwrap();
    assert_eq!(rig.engine.strength_history().await.unwrap(), after_second);
}

#[tokio::test]
async fn next_morning_run_appends_and_keeps_yesterdays_snapshot() {
    let rig = rig(day(2024, 5, 2));
    rig.calendar.script(day(2024, 5, 1), vec![eur_beat()]).await;
    rig.engine.refresh().await.unwrap();
    // The marker parks on the day the history was computed for.
    assert_eq!(rig.storage_marker().await, Some("2024-05-01".to_string()));

    // Next morning a fresh run must roll the window forward, not rewrite
    // yesterday's snapshot in place.
    rig.clock.set(day(2024, 5, 3));
    rig.calendar.script(day(2024, 5, 2), vec![eur_beat()]).await;

    let outcome = rig.engine.refresh().await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Backfilled { days: 1 });

    let history = rig.engine.strength_history().await.unwrap();
    let d1 = eur_beat_trend(0.0);
    let d2 = eur_beat_trend(d1);
    // Day one survives in the middle slot; day two lands at the end.
    assert_eq!(history.window("EUR").unwrap().points(), &[0.0, d1, d2]);
    assert_eq!(rig.storage_marker().await, Some("2024-05-02".to_string()));
}

#[tokio::test]
async fn new_day_append_is_fifo() {
    let rig = rig(day(2024, 5, 3));
    seed_history(&rig.storage, &[("EUR", [0.1, 0.2, 0.3])]).await;
    seed_marker(&rig.storage, day(2024, 5, 1)).await;
    rig.calendar.script(day(2024, 5, 2), vec![eur_beat()]).await;

    let outcome = rig.engine.refresh().await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Backfilled { days: 1 });

    let history = rig.engine.strength_history().await.unwrap();
    let expected = eur_beat_trend(0.3);
    // Oldest point (0.1) dropped, window still exactly 3 long.
    assert_eq!(history.window("EUR").unwrap().points(), &[0.2, 0.3, expected]);
}

#[tokio::test]
async fn backfill_matches_sequential_appends() {
    let rig = rig(day(2024, 5, 5));
    seed_marker(&rig.storage, day(2024, 5, 1)).await;

    let batches = [
        (day(2024, 5, 2), vec![eur_beat()]),
        (day(2024, 5, 3), vec![event("EUR", ImpactWeight::Medium, Direction::Worse, "1.0", "2.0")]),
        (day(2024, 5, 4), vec![eur_beat(), event("USD", ImpactWeight::Low, Direction::Better, "5", "4")]),
    ];
    for (d, events) in &batches {
        rig.calendar.script(*d, events.clone()).await;
    }

    let outcome = rig.engine.refresh().await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Backfilled { days: 3 });

    // Model the same three days as manual sequential appends.
    let mut eur = vec![0.0, 0.0, 0.0];
    let mut usd = vec![0.0, 0.0, 0.0];
    let d1 = eur_beat_trend(0.0);
    eur.push(d1);
    usd.push(0.0);
    let d2 = accumulate(d1, score_event(0.5, -1.0, "1.0", "2.0"), SPEED);
    eur.push(d2);
    usd.push(0.0);
    let d3 = eur_beat_trend(d2);
    eur.push(d3);
    usd.push(accumulate(0.0, score_event(0.25, 1.0, "5", "4"), SPEED));

    let history = rig.engine.strength_history().await.unwrap();
    assert_eq!(history.window("EUR").unwrap().points(), &eur[eur.len() - 3..]);
    assert_eq!(history.window("USD").unwrap().points(), &usd[usd.len() - 3..]);

    // Days were fetched strictly oldest-first.
    assert_eq!(
        rig.calendar.calls().await,
        vec![day(2024, 5, 2), day(2024, 5, 3), day(2024, 5, 4)]
    );
}

#[tokio::test]
async fn backfill_caps_at_seven_most_recent_days() {
    let rig = rig(day(2024, 5, 20));
    // 10-day gap: marker 2024-05-09, target 2024-05-19.
    seed_marker(&rig.storage, day(2024, 5, 9)).await;

    let outcome = rig.engine.refresh().await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Backfilled { days: 7 });

    let calls = rig.calendar.calls().await;
    assert_eq!(calls.len(), 7);
    // The oldest days of the gap are skipped, not the newest.
    assert_eq!(calls.first(), Some(&day(2024, 5, 13)));
    assert_eq!(calls.last(), Some(&day(2024, 5, 19)));
}

#[tokio::test]
async fn failed_day_aborts_but_keeps_committed_days() {
    let rig = rig(day(2024, 5, 5));
    seed_marker(&rig.storage, day(2024, 5, 1)).await;
    rig.calendar.script(day(2024, 5, 2), vec![eur_beat()]).await;
    rig.calendar.script(day(2024, 5, 4), vec![eur_beat()]).await;
    rig.calendar.fail_on(day(2024, 5, 3)).await;

    let err = rig.engine.refresh().await.unwrap_err();
    assert!(err.to_string().contains("2024-05-03"));

    // Day 2 was committed before the outage; the marker parked on it.
    let history = rig.engine.strength_history().await.unwrap();
    let d1 = eur_beat_trend(0.0);
    assert_eq!(history.window("EUR").unwrap().points(), &[0.0, 0.0, d1]);
    assert_eq!(
        rig.storage_marker().await,
        Some("2024-05-02".to_string())
    );

    // Retry resumes from the failed day, not from scratch.
    rig.calendar.clear_failure(day(2024, 5, 3)).await;
    let outcome = rig.engine.refresh().await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Backfilled { days: 2 });

    let calls = rig.calendar.calls().await;
    assert_eq!(
        calls,
        vec![
            day(2024, 5, 2),
            day(2024, 5, 3),
            day(2024, 5, 4)
        ]
    );
    assert_eq!(rig.storage_marker().await, Some("2024-05-04".to_string()));
}

#[tokio::test]
async fn concurrent_refresh_is_dropped_not_queued() {
    let storage = Arc::new(MemoryStorage::new());
    let calendar = Arc::new(ScriptedCalendar::with_latency(Duration::from_millis(50)));
    let clock = Arc::new(FixedClock::new(day(2024, 5, 2)));
    calendar.script(day(2024, 5, 1), vec![eur_beat()]).await;

    let engine = StrengthEngine::new(
        storage,
        calendar.clone(),
        Arc::new(common::FixedQuotes::new(1.0850, Some(1.0800))),
        clock,
        Arc::new(NoopPacer),
    );

    let (first, second) = tokio::join!(engine.refresh(), engine.refresh());
    let outcomes = [first.unwrap(), second.unwrap()];
    assert!(outcomes.contains(&RefreshOutcome::Backfilled { days: 1 }));
    assert!(outcomes.contains(&RefreshOutcome::Skipped));

    // The dropped request must not have fetched anything extra.
    assert_eq!(calendar.calls().await.len(), 1);
}

#[tokio::test]
async fn refresh_if_stale_noops_when_marker_is_current() {
    let rig = rig(day(2024, 5, 2));
    // Yesterday is already committed; there is nothing new to compute.
    seed_marker(&rig.storage, day(2024, 5, 1)).await;

    let outcome = rig.engine.refresh_if_stale().await.unwrap();
    assert_eq!(outcome, RefreshOutcome::UpToDate);
    assert!(rig.calendar.calls().await.is_empty());

    // A day behind, the same entry point runs the reconciliation.
    rig.clock.set(day(2024, 5, 3));
    let outcome = rig.engine.refresh_if_stale().await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Backfilled { days: 1 });
    assert_eq!(rig.calendar.calls().await, vec![day(2024, 5, 2)]);
}

#[tokio::test]
async fn unknown_currency_gets_a_zero_baseline_window() {
    let rig = rig(day(2024, 5, 2));
    rig.calendar
        .script(
            day(2024, 5, 1),
            vec![event("SEK", ImpactWeight::High, Direction::Better, "3.0", "2.0")],
        )
        .await;

    rig.engine.refresh().await.unwrap();

    let history = rig.engine.strength_history().await.unwrap();
    let sek = history.window("SEK").unwrap();
    assert_eq!(sek.points().len(), 3);
    assert!(sek.latest() > 0.0);
    // The nine majors are still tracked alongside the stray currency.
    assert!(history.window("CNY").is_some());
}

#[tokio::test]
async fn empty_day_rolls_windows_forward_unchanged() {
    let rig = rig(day(2024, 5, 3));
    seed_history(&rig.storage, &[("EUR", [0.1, 0.2, 0.3])]).await;
    seed_marker(&rig.storage, day(2024, 5, 1)).await;
    // No batch scripted for 2024-05-02: the calendar returns an empty day.

    let outcome = rig.engine.refresh().await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Backfilled { days: 1 });

    let history = rig.engine.strength_history().await.unwrap();
    assert_eq!(history.window("EUR").unwrap().points(), &[0.2, 0.3, 0.3]);
}
