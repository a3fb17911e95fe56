//! Typed wrappers around each actor's [`ResourceClient`](spice_actors::ResourceClient).
//!
//! Each wrapper implements [`ActorClient`](spice_actors::ActorClient) for `get`/`list`
//! and adds the resource's own operations. Errors raised by an entity come back as the
//! entity's typed error rather than a boxed framework error.

pub mod cart_client;
pub mod menu_client;
pub mod order_client;

pub use cart_client::CartClient;
pub use menu_client::MenuClient;
pub use order_client::OrderClient;
