//! # System Lifecycle
//!
//! [`SpiceSystem`] creates the menu, order and cart actors, wires them together and
//! owns their tasks.
//!
//! ## Wiring
//!
//! Actors are created first and receive their collaborators at `run()`:
//!
//! | Actor | Context |
//! |---|---|
//! | menu | `()` |
//! | order | [`OrderContext`](crate::order_actor::OrderContext): menu client, clock |
//! | cart | [`CartContext`](crate::cart_actor::CartContext): menu client, persisted cart |
//!
//! The dependency graph is acyclic, so shutdown only has to drop the system's clients:
//! the order and cart actors end when their channels close, which releases the last
//! menu client clones and lets the menu actor end too.
//!
//! ## Start-up
//!
//! 1. Seed the menu and the sample orders.
//! 2. Open the cart with whatever the key-value store still holds.
//!
//! Tracking drivers are not part of the system's tasks. [`SpiceSystem::track`] hands
//! back a [`TrackingHandle`](crate::tracking::TrackingHandle) that the caller stops.

pub mod error;
pub mod spice_system;

pub use error::SystemError;
pub use spice_system::{CheckoutRequest, SpiceSystem};
