//! Plain data types. The ones hosted by an actor implement
//! [`ActorEntity`](spice_actors::ActorEntity) in their `*_actor` module.

pub mod address;
pub mod cart;
pub mod geo;
pub mod menu;
pub mod order;

pub use address::*;
pub use cart::*;
pub use geo::*;
pub use menu::*;
pub use order::*;

/// Money in whole rupees.
pub type Amount = u64;
