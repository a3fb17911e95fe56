//! [`ActorEntity`] implementation for [`MenuItem`].

use super::error::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId};
use async_trait::async_trait;
use spice_actors::ActorEntity;

/// Dishes take no actions once listed.
#[derive(Debug, Clone)]
pub enum MenuAction {}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Action = MenuAction;
    type ActionResult = ();
    type Context = ();
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, MenuError> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(MenuError::ValidationError("name is required".into()));
        }
        if params.price == 0 {
            return Err(MenuError::ValidationError(format!(
                "{name} needs a price above zero"
            )));
        }
        Ok(MenuItem {
            id,
            name: name.to_string(),
            description: params.description,
            price: params.price,
            original_price: None,
            image: params.image,
            category: params.category,
            rating: 0.0,
            reviews: 0,
            is_veg: params.is_veg,
            spice_level: params.spice_level,
            tags: vec!["New".to_string()],
            calories: None,
            prep_time_minutes: None,
        })
    }

    async fn handle_action(&mut self, action: MenuAction, _ctx: &()) -> Result<(), MenuError> {
        match action {}
    }
}
