//! [`ActorEntity`] implementation for [`Order`].
//!
//! Creation checks everything that can be checked without other actors (items,
//! quantities, address, subtotal); `on_create` then checks each dish against the menu.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use super::OrderContext;
use crate::model::{
    Order, OrderCreate, OrderId, OrderType, RESTAURANT_ADDRESS, RESTAURANT_NAME,
};
use crate::status::{OrderStatus, StatusError, StatusTimeline, StatusUpdate};
use async_trait::async_trait;
use spice_actors::{ActorClient, ActorEntity};
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(item) = params.items.iter().find(|i| i.quantity == 0) {
            return Err(OrderError::InvalidQuantity {
                item: item.id.to_string(),
                quantity: item.quantity,
            });
        }
        params.delivery_address.validate()?;

        let expected: u64 = params
            .items
            .iter()
            .map(|i| i.price * u64::from(i.quantity))
            .sum();
        if params.pricing.subtotal != expected {
            return Err(OrderError::PricingMismatch {
                expected,
                actual: params.pricing.subtotal,
            });
        }

        Ok(Order {
            order_number: id.order_number(),
            id,
            placed_at: params.placed_at,
            items: params.items,
            pricing: params.pricing,
            timeline: StatusTimeline::confirmed_at(params.placed_at),
            delivery_address: params.delivery_address,
            delivery_window: params.delivery_window,
            payment_method: params.payment_method,
            restaurant_name: RESTAURANT_NAME.to_string(),
            restaurant_address: RESTAURANT_ADDRESS.to_string(),
            delivery_person: None,
            tracking: None,
            special_instructions: params.special_instructions,
            order_type: OrderType::Delivery,
        })
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        for item in &self.items {
            let listed = ctx
                .menu
                .get(item.id.clone())
                .await
                .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?
                .ok_or_else(|| OrderError::UnknownItem(item.id.to_string()))?;
            if listed.price != item.price {
                return Err(OrderError::PriceChanged {
                    item: item.id.to_string(),
                    ordered: item.price,
                    listed: listed.price,
                });
            }
        }
        debug!(order_id = %self.id, items = self.items.len(), "Items verified against menu");
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::Advance { message, location } => {
                let current = self.status();
                let next = current
                    .next()
                    .ok_or(OrderError::Status(StatusError::Terminal(current)))?;
                let mut update = StatusUpdate::new(next, ctx.clock.now());
                if let Some(message) = message {
                    update = update.with_message(message);
                }
                if let Some(location) = location {
                    update = update.at(location);
                }
                self.timeline.append(update.clone())?;
                info!(order_id = %self.id, status = %next, "Order advanced");
                Ok(OrderActionResult::Advanced(update))
            }
            OrderAction::Cancel { reason } => {
                let mut update = StatusUpdate::new(OrderStatus::Cancelled, ctx.clock.now());
                if let Some(reason) = reason {
                    update = update.with_message(reason);
                }
                self.timeline.append(update.clone())?;
                info!(order_id = %self.id, "Order cancelled");
                Ok(OrderActionResult::Cancelled(update))
            }
            OrderAction::AssignDriver(person) => {
                if !self.is_active() {
                    return Err(OrderError::NotActive(self.id.to_string()));
                }
                self.delivery_person = Some(person);
                Ok(OrderActionResult::DriverAssigned)
            }
            OrderAction::AttachTracking(info) => {
                if !self.is_active() {
                    return Err(OrderError::NotActive(self.id.to_string()));
                }
                self.tracking = Some(info);
                Ok(OrderActionResult::TrackingAttached)
            }
        }
    }
}
