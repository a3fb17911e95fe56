//! Tracking driver against tokio's paused clock. Time only moves when every task is
//! waiting, so tick and timeout arithmetic is exact.

use spice_route::fixtures;
use spice_route::model::{Coordinate, OrderId};
use spice_route::tracking::{
    spawn_tracking, FeedError, Notice, Phase, PositionFix, ScriptedFeed, SystemClock,
    TrackingConfig, TrackingHandle,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

fn fix() -> PositionFix {
    PositionFix {
        current_location: Coordinate::new(13.0860, 80.2765),
        route_points: Vec::new(),
    }
}

fn track(feed: Arc<ScriptedFeed>) -> TrackingHandle {
    spawn_tracking(
        OrderId::from(fixtures::ACTIVE_ORDER),
        &fixtures::tracking_info(),
        feed,
        Arc::new(SystemClock),
        TrackingConfig::default(),
    )
}

#[tokio::test(start_paused = true)]
async fn failing_feed_degrades_then_simulates_on_the_third_failure() {
    let feed = Arc::new(ScriptedFeed::failing(FeedError::Status(503)));
    let mut tracker = track(feed.clone());
    let start = Instant::now();
    let origin = tracker.current().current_position;

    assert_eq!(
        tracker.next_notice().await,
        Some(Notice::RetryFailed { attempt: 1, ceiling: 3 })
    );
    assert_eq!(tracker.current().phase, Phase::Degraded);

    assert_eq!(
        tracker.next_notice().await,
        Some(Notice::RetryFailed { attempt: 2, ceiling: 3 })
    );
    assert_eq!(tracker.next_notice().await, Some(Notice::SimulatedTracking));
    assert_eq!(start.elapsed(), Duration::from_secs(6));
    assert_eq!(feed.calls(), 3);

    let state = tracker.current();
    assert!(state.simulated);
    assert!(state.moving);
    assert_eq!(state.consecutive_failures, 3);
    assert!(state.route.len() <= TrackingConfig::default().trail_length + 1);
    let destination = state.destination;
    assert!(
        state.current_position.planar_distance(&destination) < origin.planar_distance(&destination)
    );

    // Further failures keep simulating without repeating the notice.
    sleep(Duration::from_millis(3_500)).await;
    assert!(tracker.drain_notices().is_empty());
    assert_eq!(tracker.current().consecutive_failures, 4);

    let last = tracker.stop().await;
    assert_eq!(last.phase, Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn ticks_are_skipped_while_a_poll_is_outstanding() {
    let feed = Arc::new(
        ScriptedFeed::new(Vec::new())
            .then_repeat(Ok(fix()))
            .with_latency(Duration::from_secs(4)),
    );
    let tracker = track(feed.clone());

    // Polls start at 0 s and 6 s; the 3 s and 9 s ticks find one in flight.
    sleep(Duration::from_secs(11)).await;
    assert_eq!(feed.calls(), 2);
    assert_eq!(tracker.current().phase, Phase::Polling);
    assert_eq!(tracker.current().current_position, fix().current_location);

    tracker.stop().await;
}

#[tokio::test(start_paused = true)]
async fn slow_poll_is_cut_off_by_the_request_timeout() {
    let feed = Arc::new(
        ScriptedFeed::new(Vec::new())
            .then_repeat(Ok(fix()))
            .with_latency(Duration::from_secs(60)),
    );
    let mut tracker = track(feed.clone());
    let start = Instant::now();

    assert_eq!(
        tracker.next_notice().await,
        Some(Notice::RetryFailed { attempt: 1, ceiling: 3 })
    );
    assert_eq!(start.elapsed(), Duration::from_secs(5));
    let state = tracker.current();
    assert_eq!(state.phase, Phase::Degraded);
    assert!(!state.simulated);
    assert!(state.last_update.is_none());

    tracker.stop().await;
}

#[tokio::test(start_paused = true)]
async fn going_offline_halts_polling_until_connectivity_returns() {
    let feed = Arc::new(ScriptedFeed::new(Vec::new()).then_repeat(Ok(fix())));
    let mut tracker = track(feed.clone());

    sleep(Duration::from_secs(1)).await;
    assert_eq!(feed.calls(), 1);

    tracker.set_online(false).await.unwrap();
    assert_eq!(tracker.next_notice().await, Some(Notice::ConnectionLost));
    assert_eq!(tracker.current().phase, Phase::Offline);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(feed.calls(), 1);

    tracker.set_online(true).await.unwrap();
    assert_eq!(tracker.next_notice().await, Some(Notice::ConnectionRestored));
    sleep(Duration::from_millis(10)).await;
    assert_eq!(feed.calls(), 2);
    assert_eq!(tracker.current().phase, Phase::Polling);

    tracker.stop().await;
}

#[tokio::test(start_paused = true)]
async fn hidden_view_stops_polling_and_shown_resumes() {
    let feed = Arc::new(ScriptedFeed::new(Vec::new()).then_repeat(Ok(fix())));
    let tracker = track(feed.clone());
    let mut views = tracker.subscribe();

    views
        .wait_for(|view| view.current_position == fix().current_location)
        .await
        .unwrap();

    tracker.set_visible(false).await.unwrap();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(tracker.current().phase, Phase::Idle);
    assert_eq!(feed.calls(), 1);

    tracker.set_visible(true).await.unwrap();
    sleep(Duration::from_millis(10)).await;
    assert_eq!(feed.calls(), 2);

    tracker.stop().await;
}

#[tokio::test(start_paused = true)]
async fn manual_retry_resets_the_failure_count() {
    let feed = Arc::new(
        ScriptedFeed::new(vec![Err(FeedError::Transport("reset".into()))])
            .then_repeat(Ok(fix())),
    );
    let mut tracker = track(feed.clone());

    assert_eq!(
        tracker.next_notice().await,
        Some(Notice::RetryFailed { attempt: 1, ceiling: 3 })
    );
    tracker.retry().await.unwrap();
    sleep(Duration::from_millis(10)).await;

    let state = tracker.current();
    assert_eq!(feed.calls(), 2);
    assert_eq!(state.consecutive_failures, 0);
    assert_eq!(state.phase, Phase::Polling);
    assert!(state.last_update.is_some());

    tracker.stop().await;
}
