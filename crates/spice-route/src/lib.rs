//! # Spice Route
//!
//! The ordering core of a single-restaurant food app: menu browsing, a persisted cart,
//! pricing and checkout, order status, and live delivery tracking with a map layout.
//!
//! - [`lifecycle`]: [`SpiceSystem`](lifecycle::SpiceSystem) starts and wires the actors.
//! - [`menu_actor`], [`order_actor`], [`cart_actor`]: resources hosted on
//!   [`spice_actors`].
//! - [`clients`]: typed wrappers over each actor.
//! - [`pricing`], [`status`], [`catalog`]: pure domain logic.
//! - [`tracking`], [`projection`]: the tracking state machine, its driver, and the map.
//! - [`storage`], [`config`]: persistence and configuration.

pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod fixtures;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod pricing;
pub mod projection;
pub mod status;
pub mod storage;
pub mod tracking;
