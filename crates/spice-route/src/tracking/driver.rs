//! Runs a [`TrackingSimulator`] against a real timer and feed.
//!
//! One tokio task per tracked order. It owns the simulator, the interval and at most one
//! outstanding poll, and carries out the simulator's [`Directive`]s. Ticks that arrive
//! while a poll is outstanding are skipped. Halting the timer also aborts the poll, and
//! any result that still slips through is discarded by generation.

use super::clock::Clock;
use super::error::FeedError;
use super::feed::{PositionFeed, PositionFix};
use super::simulator::{Directive, Notice, TrackingEvent, TrackingSimulator, TrackingState};
use super::TrackingConfig;
use crate::model::{OrderId, TrackingInfo};
use spice_actors::FrameworkError;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn, Instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingControl {
    SetOnline(bool),
    SetVisible(bool),
    Retry,
    Stop,
}

type PollResult = (u64, Result<PositionFix, FeedError>);

struct TrackingDriver {
    order_id: OrderId,
    simulator: TrackingSimulator,
    feed: Arc<dyn PositionFeed>,
    clock: Arc<dyn Clock>,
    ticker: Option<Interval>,
    in_flight: Option<JoinHandle<()>>,
    generation: u64,
    results: mpsc::Sender<PollResult>,
    views: watch::Sender<TrackingState>,
    notices: mpsc::UnboundedSender<Notice>,
}

/// Starts tracking `order_id` and returns the handle that controls it.
pub fn spawn_tracking(
    order_id: OrderId,
    info: &TrackingInfo,
    feed: Arc<dyn PositionFeed>,
    clock: Arc<dyn Clock>,
    config: TrackingConfig,
) -> TrackingHandle {
    let simulator = TrackingSimulator::new(info, config);
    let (views_tx, views_rx) = watch::channel(simulator.state().clone());
    let (notices_tx, notices_rx) = mpsc::unbounded_channel();
    let (control_tx, control_rx) = mpsc::channel(16);
    let (results_tx, results_rx) = mpsc::channel(4);

    let driver = TrackingDriver {
        order_id: order_id.clone(),
        simulator,
        feed,
        clock,
        ticker: None,
        in_flight: None,
        generation: 0,
        results: results_tx,
        views: views_tx,
        notices: notices_tx,
    };
    let span = tracing::info_span!("tracking", order_id = %order_id);
    let task = tokio::spawn(driver.run(control_rx, results_rx).instrument(span));

    TrackingHandle {
        order_id,
        control: control_tx,
        views: views_rx,
        notices: notices_rx,
        task,
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

impl TrackingDriver {
    async fn run(
        mut self,
        mut control: mpsc::Receiver<TrackingControl>,
        mut results: mpsc::Receiver<PollResult>,
    ) {
        info!("Tracking started");
        self.dispatch(TrackingEvent::Start);

        loop {
            tokio::select! {
                command = control.recv() => match command {
                    Some(TrackingControl::SetOnline(true)) => self.dispatch(TrackingEvent::ConnectivityRestored),
                    Some(TrackingControl::SetOnline(false)) => self.dispatch(TrackingEvent::ConnectivityLost),
                    Some(TrackingControl::SetVisible(true)) => self.dispatch(TrackingEvent::Shown),
                    Some(TrackingControl::SetVisible(false)) => self.dispatch(TrackingEvent::Hidden),
                    Some(TrackingControl::Retry) => self.dispatch(TrackingEvent::Retry),
                    Some(TrackingControl::Stop) | None => break,
                },
                Some((generation, result)) = results.recv() => {
                    if generation != self.generation {
                        debug!(generation, "Discarding stale poll result");
                        continue;
                    }
                    self.in_flight = None;
                    let event = match result {
                        Ok(fix) => TrackingEvent::PollSucceeded(fix),
                        Err(error) => TrackingEvent::PollFailed(error),
                    };
                    self.dispatch(event);
                }
                _ = next_tick(&mut self.ticker) => self.dispatch(TrackingEvent::Tick),
            }
        }

        self.dispatch(TrackingEvent::Stop);
        self.cancel_poll();
        info!("Tracking stopped");
    }

    fn dispatch(&mut self, event: TrackingEvent) {
        let outcome = self.simulator.handle(event, self.clock.now());

        for directive in outcome.directives {
            match directive {
                Directive::PollNow => self.poll(),
                Directive::ResumeTimer => {
                    let period = self.simulator.config().poll_interval();
                    let mut ticker = interval_at(Instant::now() + period, period);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    self.ticker = Some(ticker);
                }
                Directive::HaltTimer => {
                    self.ticker = None;
                    self.cancel_poll();
                }
            }
        }

        for notice in outcome.notices {
            match &notice {
                Notice::RetryFailed { attempt, ceiling } => {
                    debug!(attempt, ceiling, "Retrying tracking poll")
                }
                Notice::SimulatedTracking => warn!("Tracking feed unreachable, using simulated tracking"),
                Notice::ConnectionLost => warn!("Connectivity lost, tracking paused"),
                Notice::ConnectionRestored => info!("Connectivity restored, tracking resumed"),
            }
            // Nobody listening is fine.
            let _ = self.notices.send(notice);
        }

        let state = self.simulator.state();
        self.views.send_if_modified(|view| {
            if view == state {
                false
            } else {
                *view = state.clone();
                true
            }
        });
    }

    fn poll(&mut self) {
        if self.in_flight.is_some() {
            debug!("Poll outstanding, skipping");
            return;
        }
        self.generation += 1;
        let generation = self.generation;
        let feed = self.feed.clone();
        let order_id = self.order_id.clone();
        let results = self.results.clone();
        let timeout = self.simulator.config().request_timeout();

        self.in_flight = Some(tokio::spawn(
            async move {
                let result = match tokio::time::timeout(timeout, feed.fetch(&order_id)).await {
                    Ok(result) => result,
                    Err(_) => Err(FeedError::Timeout(timeout.as_millis() as u64)),
                };
                let _ = results.send((generation, result)).await;
            }
            .in_current_span(),
        ));
    }

    fn cancel_poll(&mut self) {
        if let Some(poll) = self.in_flight.take() {
            poll.abort();
            debug!("Outstanding poll cancelled");
        }
        self.generation += 1;
    }
}

/// Controls one running tracker. Dropping the handle stops it.
pub struct TrackingHandle {
    order_id: OrderId,
    control: mpsc::Sender<TrackingControl>,
    views: watch::Receiver<TrackingState>,
    notices: mpsc::UnboundedReceiver<Notice>,
    task: JoinHandle<()>,
}

impl TrackingHandle {
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    async fn send(&self, command: TrackingControl) -> Result<(), FrameworkError> {
        self.control
            .send(command)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    pub async fn set_online(&self, online: bool) -> Result<(), FrameworkError> {
        self.send(TrackingControl::SetOnline(online)).await
    }

    pub async fn set_visible(&self, visible: bool) -> Result<(), FrameworkError> {
        self.send(TrackingControl::SetVisible(visible)).await
    }

    pub async fn retry(&self) -> Result<(), FrameworkError> {
        self.send(TrackingControl::Retry).await
    }

    /// A receiver that sees every published view.
    pub fn subscribe(&self) -> watch::Receiver<TrackingState> {
        self.views.clone()
    }

    pub fn current(&self) -> TrackingState {
        self.views.borrow().clone()
    }

    /// Next advisory notice, or `None` once the tracker has stopped.
    pub async fn next_notice(&mut self) -> Option<Notice> {
        self.notices.recv().await
    }

    /// Notices already delivered, without waiting.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        let mut drained = Vec::new();
        while let Ok(notice) = self.notices.try_recv() {
            drained.push(notice);
        }
        drained
    }

    /// Stops the tracker, waits for its task, and returns the final view.
    pub async fn stop(self) -> TrackingState {
        let _ = self.control.send(TrackingControl::Stop).await;
        if let Err(e) = self.task.await {
            warn!(order_id = %self.order_id, error = %e, "Tracking task ended abnormally");
        }
        let last = self.views.borrow().clone();
        last
    }
}
