//! # Menu Actor
//!
//! Hosts the dishes. The catalog is seeded at start-up with
//! [`ResourceClient::seed`](spice_actors::ResourceClient::seed) under the catalog's own
//! slugs; `create` adds a special at runtime under a minted `special-N` id.
//!
//! The menu has no collaborators (`Context = ()`) and no actions: dishes are read-only
//! once listed.
//!
//! ```rust
//! use spice_route::clients::MenuClient;
//! use spice_route::menu_actor;
//! use spice_route::model::{Category, MenuItemCreate, SpiceLevel};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, inner) = menu_actor::new();
//!     tokio::spawn(actor.run(()));
//!     let menu = MenuClient::new(inner);
//!
//!     let id = menu
//!         .add_special(MenuItemCreate {
//!             name: "Kothu Parotta".into(),
//!             description: "Shredded parotta tossed with egg and salna".into(),
//!             price: 179,
//!             image: "/kothu_parotta.webp".into(),
//!             category: Category::Snacks,
//!             is_veg: false,
//!             spice_level: SpiceLevel::Hot,
//!         })
//!         .await
//!         .unwrap();
//!     assert_eq!(id.to_string(), "special-1");
//! }
//! ```

pub mod entity;
pub mod error;

pub use entity::MenuAction;
pub use error::*;

use crate::model::MenuItem;
use spice_actors::{ResourceActor, ResourceClient};

/// Creates the menu actor and its generic client.
pub fn new() -> (ResourceActor<MenuItem>, ResourceClient<MenuItem>) {
    ResourceActor::new(32)
}
