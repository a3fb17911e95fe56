//! [`ActorEntity`] implementation for [`Cart`].
//!
//! Actions return the cart as it stands afterwards, so callers never need a second
//! round trip to redraw totals.

use super::actions::CartAction;
use super::error::CartError;
use super::CartContext;
use crate::model::{Cart, CartCreate, CartId, CartLine};
use async_trait::async_trait;
use spice_actors::{ActorClient, ActorEntity};
use tracing::{debug, warn};

impl Cart {
    fn persist(&self, ctx: &CartContext) -> Result<(), CartError> {
        ctx.store.save(&self.lines).map_err(|e| {
            warn!(cart_id = %self.id, error = %e, "Cart not persisted");
            CartError::Persistence(e.to_string())
        })
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Action = CartAction;
    type ActionResult = Cart;
    type Context = CartContext;
    type Error = CartError;

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, CartError> {
        Ok(Cart::new(id, params.lines))
    }

    async fn on_create(&mut self, ctx: &CartContext) -> Result<(), CartError> {
        self.persist(ctx)
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<Cart, CartError> {
        match action {
            CartAction::Add { item, quantity } => {
                if quantity == 0 {
                    return Err(CartError::InvalidQuantity);
                }
                let dish = ctx
                    .menu
                    .get(item.clone())
                    .await
                    .map_err(|e| CartError::ActorCommunicationError(e.to_string()))?
                    .ok_or_else(|| CartError::UnknownItem(item.to_string()))?;
                self.add(CartLine::for_item(&dish, quantity));
            }
            CartAction::SetQuantity { item, quantity } => {
                if !self.set_quantity(&item, quantity) {
                    return Err(CartError::NotInCart(item.to_string()));
                }
            }
            CartAction::Remove { item } => {
                if !self.remove(&item) {
                    return Err(CartError::NotInCart(item.to_string()));
                }
            }
            CartAction::Clear => self.clear(),
        }
        self.persist(ctx)?;
        debug!(
            cart_id = %self.id,
            items = self.item_count(),
            subtotal = self.subtotal(),
            "Cart updated"
        );
        Ok(self.clone())
    }
}
