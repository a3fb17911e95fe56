//! # Observability
//!
//! Structured logging for every actor and for the tracking driver.
//!
//! The output uses the compact formatter with the module path hidden
//! (`with_target(false)`); actors tag their lines with an `entity_type` field instead.
//! Levels come from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle, creates, successful actions
//! RUST_LOG=debug cargo run     # plus full payloads and every get/list
//! RUST_LOG=spice_route::tracking=debug cargo run   # just the poll loop
//! ```
//!
//! A checkout at `info` reads roughly:
//!
//! ```text
//! INFO Actor started entity_type="Order"
//! INFO checkout: Quote computed subtotal=747 total=709
//! INFO Created entity_type="Order" id=ord-007 size=7
//! INFO track: Tracking started order_id=ord-007
//! WARN track: Poll failed attempt=1 ceiling=3
//! ```

/// Installs the global subscriber.
///
/// Safe to call more than once (tests call it from several places); later calls are
/// no-ops.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
