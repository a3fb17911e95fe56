//! # Menu Client
//!
//! High-level API over the menu actor, and the menu's
//! [`DataProvider`](crate::catalog::DataProvider).

use crate::catalog::DataProvider;
use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId};
use async_trait::async_trait;
use spice_actors::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    /// Loads catalog dishes under their own ids.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn seed(&self, items: Vec<MenuItem>) -> Result<(), MenuError> {
        for item in items {
            self.inner
                .seed(item.id.clone(), item)
                .await
                .map_err(Self::map_error)?;
        }
        info!("Menu seeded");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn add_special(&self, params: MenuItemCreate) -> Result<MenuItemId, MenuError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// A dish that must exist.
    #[instrument(skip(self))]
    pub async fn dish(&self, id: MenuItemId) -> Result<MenuItem, MenuError> {
        self.get(id.clone())
            .await?
            .ok_or_else(|| MenuError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<MenuError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => MenuError::NotFound(id),
            other => MenuError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl DataProvider<MenuItem> for MenuClient {
    type Id = MenuItemId;
    type Error = MenuError;

    async fn list(&self) -> Result<Vec<MenuItem>, MenuError> {
        ActorClient::list(self).await
    }

    async fn get_by_id(&self, id: &MenuItemId) -> Result<Option<MenuItem>, MenuError> {
        ActorClient::get(self, id.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, SpiceLevel};
    use spice_actors::mock::{create_mock_client, expect_create, MockClient};

    #[tokio::test]
    async fn dish_reports_missing_items() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_get(MenuItemId::from("rice-9")).return_ok(None);
        let menu = MenuClient::new(mock.client());

        assert_eq!(
            menu.dish(MenuItemId::from("rice-9")).await,
            Err(MenuError::NotFound("rice-9".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn entity_errors_come_back_typed() {
        let (client, mut receiver) = create_mock_client::<MenuItem>(4);
        let menu = MenuClient::new(client);

        let task = tokio::spawn(async move {
            menu.add_special(MenuItemCreate {
                name: String::new(),
                description: String::new(),
                price: 0,
                image: String::new(),
                category: Category::Snacks,
                is_veg: true,
                spice_level: SpiceLevel::Mild,
            })
            .await
        });

        let (_params, responder) = expect_create(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                MenuError::ValidationError("name is required".into()),
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(MenuError::ValidationError("name is required".into()))
        );
    }
}
