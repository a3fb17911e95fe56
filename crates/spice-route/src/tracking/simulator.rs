//! The tracking state machine.
//!
//! [`TrackingSimulator::handle`] is the only way state changes. It never performs I/O
//! or touches a timer; it tells its driver what to do through [`Directive`]s.

use super::error::FeedError;
use super::feed::PositionFix;
use super::TrackingConfig;
use crate::model::{Coordinate, TrackingInfo};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Not started, stopped, or hidden. No timer runs.
    Idle,
    Polling,
    /// At least one poll in a row has failed.
    Degraded,
    /// Connectivity lost. No timer runs and no position changes.
    Offline,
}

impl Phase {
    fn is_live(self) -> bool {
        matches!(self, Phase::Polling | Phase::Degraded)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    Start,
    Tick,
    PollSucceeded(PositionFix),
    PollFailed(FeedError),
    ConnectivityLost,
    ConnectivityRestored,
    Hidden,
    Shown,
    /// Manual retry: clears the failure count and polls at once.
    Retry,
    Stop,
}

/// What the driver must do with its timer and feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    PollNow,
    ResumeTimer,
    /// Cancel the timer and any outstanding poll.
    HaltTimer,
}

/// Advisory signals for the consumer. None of them require a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RetryFailed { attempt: u32, ceiling: u32 },
    SimulatedTracking,
    ConnectionLost,
    ConnectionRestored,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Outcome {
    pub directives: Vec<Directive>,
    pub notices: Vec<Notice>,
    /// The position (or route) was updated by this event.
    pub position_changed: bool,
}

/// Everything a view needs to draw the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingState {
    pub phase: Phase,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub current_position: Coordinate,
    pub route: Vec<Coordinate>,
    pub last_update: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
    pub online: bool,
    pub visible: bool,
    pub started: bool,
    pub moving: bool,
    /// The current position was synthesized rather than reported.
    pub simulated: bool,
}

#[derive(Debug, Clone)]
pub struct TrackingSimulator {
    state: TrackingState,
    config: TrackingConfig,
}

impl TrackingSimulator {
    pub fn new(info: &TrackingInfo, config: TrackingConfig) -> Self {
        Self {
            state: TrackingState {
                phase: Phase::Idle,
                origin: info.restaurant_location,
                destination: info.delivery_location,
                current_position: info.current_driver_location,
                route: info.route_points.clone(),
                last_update: None,
                consecutive_failures: 0,
                online: true,
                visible: true,
                started: false,
                moving: false,
                simulated: false,
            },
            config,
        }
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    pub fn handle(&mut self, event: TrackingEvent, now: DateTime<Utc>) -> Outcome {
        let before = self.state.phase;
        let outcome = match event {
            TrackingEvent::Start => {
                self.state.started = true;
                self.resume()
            }
            TrackingEvent::Tick if before.is_live() => Outcome::directing([Directive::PollNow]),
            TrackingEvent::Tick => Outcome::default(),
            TrackingEvent::PollSucceeded(fix) if before.is_live() => {
                if fix.current_location.is_valid() {
                    self.accept(fix, now)
                } else {
                    self.fail(FeedError::Decode("coordinate out of range".into()), now)
                }
            }
            TrackingEvent::PollFailed(error) if before.is_live() => self.fail(error, now),
            // Late results after a halt are dropped.
            TrackingEvent::PollSucceeded(_) | TrackingEvent::PollFailed(_) => Outcome::default(),
            TrackingEvent::ConnectivityLost => self.lose_connectivity(),
            TrackingEvent::ConnectivityRestored => self.restore_connectivity(),
            TrackingEvent::Hidden => {
                self.state.visible = false;
                self.halt()
            }
            TrackingEvent::Shown => {
                self.state.visible = true;
                if before.is_live() {
                    Outcome::default()
                } else {
                    self.resume()
                }
            }
            TrackingEvent::Retry => {
                if self.state.started && self.state.online && self.state.visible {
                    self.clear_outage();
                    self.state.phase = Phase::Polling;
                    Outcome::directing([Directive::ResumeTimer, Directive::PollNow])
                } else {
                    Outcome::default()
                }
            }
            TrackingEvent::Stop => {
                self.state.started = false;
                self.halt()
            }
        };
        if self.state.phase != before {
            debug!(from = ?before, to = ?self.state.phase, "Tracking phase changed");
        }
        outcome
    }

    /// Enters the phase implied by the flags and, when live, restarts polling.
    fn resume(&mut self) -> Outcome {
        if !self.state.started || !self.state.visible {
            self.state.phase = Phase::Idle;
            return Outcome::default();
        }
        if !self.state.online {
            self.state.phase = Phase::Offline;
            return Outcome::default();
        }
        self.state.phase = if self.state.consecutive_failures > 0 {
            Phase::Degraded
        } else {
            Phase::Polling
        };
        Outcome::directing([Directive::ResumeTimer, Directive::PollNow])
    }

    fn halt(&mut self) -> Outcome {
        let was_idle = self.state.phase == Phase::Idle;
        self.state.phase = Phase::Idle;
        self.state.moving = false;
        if was_idle {
            Outcome::default()
        } else {
            Outcome::directing([Directive::HaltTimer])
        }
    }

    fn accept(&mut self, fix: PositionFix, now: DateTime<Utc>) -> Outcome {
        let previous = self.state.current_position;
        self.state.moving = fix
            .current_location
            .moved_beyond(&previous, self.config.movement_epsilon);
        self.state.current_position = fix.current_location;
        if !fix.route_points.is_empty() {
            self.state.route = fix.route_points;
        }
        self.clear_outage();
        self.state.last_update = Some(now);
        self.state.phase = Phase::Polling;
        Outcome {
            position_changed: true,
            ..Outcome::default()
        }
    }

    fn fail(&mut self, error: FeedError, now: DateTime<Utc>) -> Outcome {
        self.state.consecutive_failures += 1;
        self.state.phase = Phase::Degraded;
        let attempt = self.state.consecutive_failures;
        let ceiling = self.config.retry_ceiling;
        debug!(attempt, ceiling, %error, "Tracking poll failed");

        if attempt < ceiling {
            return Outcome {
                notices: vec![Notice::RetryFailed { attempt, ceiling }],
                ..Outcome::default()
            };
        }

        let next = self
            .state
            .current_position
            .step_toward(&self.state.destination, self.config.synthetic_step);
        let keep = self.config.trail_length;
        let skip = self.state.route.len().saturating_sub(keep);
        self.state.route.drain(..skip);
        self.state.route.push(next);
        self.state.current_position = next;
        self.state.moving = true;
        self.state.last_update = Some(now);

        let first = !self.state.simulated;
        self.state.simulated = true;
        Outcome {
            notices: if first {
                vec![Notice::SimulatedTracking]
            } else {
                Vec::new()
            },
            position_changed: true,
            ..Outcome::default()
        }
    }

    /// Ends the current outage: the next one counts from zero and announces itself again.
    fn clear_outage(&mut self) {
        self.state.consecutive_failures = 0;
        self.state.simulated = false;
    }

    fn lose_connectivity(&mut self) -> Outcome {
        let was_online = std::mem::replace(&mut self.state.online, false);
        let mut outcome = Outcome::default();
        if self.state.phase != Phase::Idle && self.state.phase != Phase::Offline {
            self.state.phase = Phase::Offline;
            self.state.moving = false;
            outcome.directives.push(Directive::HaltTimer);
        }
        if was_online {
            outcome.notices.push(Notice::ConnectionLost);
        }
        outcome
    }

    fn restore_connectivity(&mut self) -> Outcome {
        let was_online = std::mem::replace(&mut self.state.online, true);
        if was_online {
            return Outcome::default();
        }
        self.clear_outage();
        let mut outcome = self.resume();
        outcome.notices.push(Notice::ConnectionRestored);
        outcome
    }
}

impl Outcome {
    fn directing<const N: usize>(directives: [Directive; N]) -> Self {
        Self {
            directives: directives.to_vec(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn info() -> TrackingInfo {
        TrackingInfo {
            restaurant_location: Coordinate::new(13.0827, 80.2707),
            delivery_location: Coordinate::new(13.0878, 80.2785),
            current_driver_location: Coordinate::new(13.0850, 80.2750),
            estimated_arrival: "15 mins".into(),
            distance_remaining: "2.5 km".into(),
            route_points: vec![
                Coordinate::new(13.0827, 80.2707),
                Coordinate::new(13.0835, 80.2720),
                Coordinate::new(13.0842, 80.2735),
                Coordinate::new(13.0850, 80.2750),
            ],
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 15, 2, 0).unwrap()
    }

    fn started() -> TrackingSimulator {
        let mut sim = TrackingSimulator::new(&info(), TrackingConfig::default());
        sim.handle(TrackingEvent::Start, now());
        sim
    }

    fn fix(lat: f64, lng: f64) -> PositionFix {
        PositionFix {
            current_location: Coordinate::new(lat, lng),
            route_points: Vec::new(),
        }
    }

    fn fail(sim: &mut TrackingSimulator) -> Outcome {
        sim.handle(TrackingEvent::PollFailed(FeedError::Timeout(5000)), now())
    }

    #[test]
    fn start_polls_immediately_and_arms_the_timer() {
        let mut sim = TrackingSimulator::new(&info(), TrackingConfig::default());
        assert_eq!(sim.phase(), Phase::Idle);
        assert!(sim.handle(TrackingEvent::Tick, now()).directives.is_empty());

        let out = sim.handle(TrackingEvent::Start, now());
        assert_eq!(sim.phase(), Phase::Polling);
        assert_eq!(out.directives, vec![Directive::ResumeTimer, Directive::PollNow]);
        assert_eq!(
            sim.handle(TrackingEvent::Tick, now()).directives,
            vec![Directive::PollNow]
        );
    }

    #[test]
    fn successful_poll_moves_the_driver_and_flags_movement() {
        let mut sim = started();
        let out = sim.handle(TrackingEvent::PollSucceeded(fix(13.0860, 80.2760)), now());
        assert!(out.position_changed);
        assert!(sim.state().moving);
        assert_eq!(sim.state().last_update, Some(now()));

        sim.handle(TrackingEvent::PollSucceeded(fix(13.08605, 80.2760)), now());
        assert!(!sim.state().moving);
        // Route untouched when the fix carries none.
        assert_eq!(sim.state().route, info().route_points);
    }

    #[test]
    fn three_failures_degrade_to_a_synthetic_position_between_driver_and_destination() {
        let mut sim = started();
        let origin = sim.state().current_position;
        let destination = sim.state().destination;

        assert_eq!(
            fail(&mut sim).notices,
            vec![Notice::RetryFailed { attempt: 1, ceiling: 3 }]
        );
        assert_eq!(sim.phase(), Phase::Degraded);
        assert_eq!(sim.state().current_position, origin);
        fail(&mut sim);
        assert_eq!(sim.state().current_position, origin);

        let out = fail(&mut sim);
        assert_eq!(out.notices, vec![Notice::SimulatedTracking]);
        assert!(sim.state().simulated);
        let pos = sim.state().current_position;
        assert!(pos.lat > origin.lat && pos.lat < destination.lat);
        assert!(pos.lng > origin.lng && pos.lng < destination.lng);
        assert_eq!(sim.state().route.last(), Some(&pos));
    }

    #[test]
    fn synthetic_positions_approach_the_destination_monotonically() {
        let mut sim = started();
        let destination = sim.state().destination;
        let mut last = sim.state().current_position.planar_distance(&destination);
        for _ in 0..40 {
            let out = fail(&mut sim);
            assert!(!out.notices.contains(&Notice::ConnectionLost));
            let d = sim.state().current_position.planar_distance(&destination);
            assert!(d <= last);
            last = d;
        }
        // Trail: five kept points plus the newest.
        assert_eq!(sim.state().route.len(), 6);
    }

    #[test]
    fn simulated_notice_is_raised_once_per_outage() {
        let mut sim = started();
        let notices: Vec<_> = (0..6).flat_map(|_| fail(&mut sim).notices).collect();
        assert_eq!(
            notices.iter().filter(|n| **n == Notice::SimulatedTracking).count(),
            1
        );

        sim.handle(TrackingEvent::PollSucceeded(fix(13.0860, 80.2760)), now());
        assert_eq!(sim.phase(), Phase::Polling);
        assert!(!sim.state().simulated);
        assert_eq!(sim.state().consecutive_failures, 0);
    }

    #[test]
    fn offline_halts_and_ignores_results_until_restored() {
        let mut sim = started();
        fail(&mut sim);
        let out = sim.handle(TrackingEvent::ConnectivityLost, now());
        assert_eq!(sim.phase(), Phase::Offline);
        assert_eq!(out.directives, vec![Directive::HaltTimer]);
        assert_eq!(out.notices, vec![Notice::ConnectionLost]);

        let before = sim.state().clone();
        assert!(sim.handle(TrackingEvent::Tick, now()).directives.is_empty());
        let late = sim.handle(TrackingEvent::PollSucceeded(fix(13.09, 80.28)), now());
        assert!(!late.position_changed);
        fail(&mut sim);
        assert_eq!(sim.state(), &before);

        let out = sim.handle(TrackingEvent::ConnectivityRestored, now());
        assert_eq!(sim.phase(), Phase::Polling);
        assert_eq!(sim.state().consecutive_failures, 0);
        assert_eq!(out.directives, vec![Directive::ResumeTimer, Directive::PollNow]);
        assert_eq!(out.notices, vec![Notice::ConnectionRestored]);
    }

    #[test]
    fn hiding_keeps_the_failure_count() {
        let mut sim = started();
        fail(&mut sim);
        fail(&mut sim);

        let out = sim.handle(TrackingEvent::Hidden, now());
        assert_eq!(sim.phase(), Phase::Idle);
        assert_eq!(out.directives, vec![Directive::HaltTimer]);
        assert_eq!(sim.state().consecutive_failures, 2);
        assert!(sim.handle(TrackingEvent::Tick, now()).directives.is_empty());

        let out = sim.handle(TrackingEvent::Shown, now());
        assert_eq!(sim.phase(), Phase::Degraded);
        assert_eq!(out.directives, vec![Directive::ResumeTimer, Directive::PollNow]);
        assert_eq!(fail(&mut sim).notices, vec![Notice::SimulatedTracking]);
    }

    #[test]
    fn out_of_range_fix_counts_as_a_failure() {
        let mut sim = started();
        let out = sim.handle(TrackingEvent::PollSucceeded(fix(f64::NAN, 80.0)), now());
        assert_eq!(sim.state().consecutive_failures, 1);
        assert!(!out.position_changed);
    }

    #[test]
    fn manual_retry_resets_and_polls() {
        let mut sim = started();
        fail(&mut sim);
        fail(&mut sim);
        let out = sim.handle(TrackingEvent::Retry, now());
        assert_eq!(sim.phase(), Phase::Polling);
        assert_eq!(sim.state().consecutive_failures, 0);
        assert!(out.directives.contains(&Directive::PollNow));
    }

    #[test]
    fn reconnecting_starts_a_new_outage() {
        let mut sim = started();
        (0..3).for_each(|_| {
            fail(&mut sim);
        });
        assert!(sim.state().simulated);

        sim.handle(TrackingEvent::ConnectivityLost, now());
        sim.handle(TrackingEvent::ConnectivityRestored, now());
        assert_eq!(sim.phase(), Phase::Polling);
        assert!(!sim.state().simulated);

        let notices: Vec<_> = (0..3).flat_map(|_| fail(&mut sim).notices).collect();
        assert_eq!(
            notices,
            vec![
                Notice::RetryFailed { attempt: 1, ceiling: 3 },
                Notice::RetryFailed { attempt: 2, ceiling: 3 },
                Notice::SimulatedTracking,
            ]
        );
    }

    #[test]
    fn retry_after_simulating_announces_the_next_fallback() {
        let mut sim = started();
        (0..4).for_each(|_| {
            fail(&mut sim);
        });
        sim.handle(TrackingEvent::Retry, now());
        assert!(!sim.state().simulated);

        let notices: Vec<_> = (0..3).flat_map(|_| fail(&mut sim).notices).collect();
        assert_eq!(notices.last(), Some(&Notice::SimulatedTracking));
        assert_eq!(
            notices.iter().filter(|n| **n == Notice::SimulatedTracking).count(),
            1
        );
    }

    #[test]
    fn starting_while_offline_waits_for_connectivity() {
        let mut sim = TrackingSimulator::new(&info(), TrackingConfig::default());
        sim.handle(TrackingEvent::ConnectivityLost, now());
        assert_eq!(sim.phase(), Phase::Idle);

        let out = sim.handle(TrackingEvent::Start, now());
        assert_eq!(sim.phase(), Phase::Offline);
        assert!(out.directives.is_empty());

        sim.handle(TrackingEvent::Stop, now());
        assert_eq!(sim.phase(), Phase::Idle);
        let out = sim.handle(TrackingEvent::ConnectivityRestored, now());
        assert_eq!(sim.phase(), Phase::Idle);
        assert!(out.directives.is_empty());
    }
}
