//! # Data providers
//!
//! Read-only access to menu items and orders. Core logic (menu browsing, the
//! active-order lookup) is written against [`DataProvider`] and never against fixture
//! data, so it runs the same over the actor-backed clients and over a plain list in a
//! test.

use crate::model::{Amount, Category, MenuItem, MenuItemId, Order, OrderId, SpiceLevel};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait DataProvider<T>: Send + Sync {
    type Id: Send + Sync;
    type Error: Send;

    async fn list(&self) -> Result<Vec<T>, Self::Error>;

    async fn get_by_id(&self, id: &Self::Id) -> Result<Option<T>, Self::Error>;
}

/// A provider over an in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider<T> {
    items: Vec<T>,
}

impl<T> StaticProvider<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl DataProvider<MenuItem> for StaticProvider<MenuItem> {
    type Id = MenuItemId;
    type Error = std::convert::Infallible;

    async fn list(&self) -> Result<Vec<MenuItem>, Self::Error> {
        Ok(self.items.clone())
    }

    async fn get_by_id(&self, id: &MenuItemId) -> Result<Option<MenuItem>, Self::Error> {
        Ok(self.items.iter().find(|i| &i.id == id).cloned())
    }
}

#[async_trait]
impl DataProvider<Order> for StaticProvider<Order> {
    type Id = OrderId;
    type Error = std::convert::Infallible;

    async fn list(&self) -> Result<Vec<Order>, Self::Error> {
        Ok(self.items.clone())
    }

    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>, Self::Error> {
        Ok(self.items.iter().find(|o| &o.id == id).cloned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBand {
    /// Up to 150.
    Budget,
    /// 151 to 300.
    Mid,
    /// Above 300.
    Premium,
}

impl PriceBand {
    pub fn contains(&self, price: Amount) -> bool {
        match self {
            PriceBand::Budget => price <= 150,
            PriceBand::Mid => price > 150 && price <= 300,
            PriceBand::Premium => price > 300,
        }
    }
}

/// Menu page filters. The default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuFilter {
    /// Case-insensitive substring of the name or description.
    pub search: String,
    pub category: Option<Category>,
    pub veg_only: bool,
    pub spice_level: Option<SpiceLevel>,
    pub price_band: Option<PriceBand>,
}

impl MenuFilter {
    pub fn matches(&self, item: &MenuItem) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || item.name.to_lowercase().contains(&needle)
            || item.description.to_lowercase().contains(&needle);
        matches_search
            && self.category.is_none_or(|c| c == item.category)
            && (!self.veg_only || item.is_veg)
            && self.spice_level.is_none_or(|s| s == item.spice_level)
            && self.price_band.is_none_or(|b| b.contains(item.price))
    }

    /// Any filter other than the search box is set.
    pub fn has_active_filters(&self) -> bool {
        self.category.is_some()
            || self.veg_only
            || self.spice_level.is_some()
            || self.price_band.is_some()
    }

    pub fn apply<'a>(&self, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        items.iter().filter(|i| self.matches(i)).collect()
    }
}

/// The menu as the filters leave it, in catalog order.
pub async fn browse<P>(provider: &P, filter: &MenuFilter) -> Result<Vec<MenuItem>, P::Error>
where
    P: DataProvider<MenuItem> + ?Sized,
{
    let mut items = provider.list().await?;
    items.retain(|i| filter.matches(i));
    Ok(items)
}

/// Dish count per category, in menu order.
pub fn category_counts(items: &[MenuItem]) -> Vec<(Category, usize)> {
    Category::ALL
        .iter()
        .map(|c| (*c, items.iter().filter(|i| i.category == *c).count()))
        .collect()
}

/// The most recently placed order that is still on its way.
pub async fn active_order<P>(provider: &P) -> Result<Option<Order>, P::Error>
where
    P: DataProvider<Order> + ?Sized,
{
    let orders = provider.list().await?;
    Ok(orders
        .into_iter()
        .filter(Order::is_active)
        .max_by_key(|o| o.placed_at))
}

/// Delivered and cancelled orders, newest first.
pub async fn order_history<P>(provider: &P) -> Result<Vec<Order>, P::Error>
where
    P: DataProvider<Order> + ?Sized,
{
    let mut orders: Vec<Order> = provider
        .list()
        .await?
        .into_iter()
        .filter(|o| !o.is_active())
        .collect();
    orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn price_bands_split_at_150_and_300() {
        assert!(PriceBand::Budget.contains(150));
        assert!(!PriceBand::Budget.contains(151));
        assert!(PriceBand::Mid.contains(151));
        assert!(PriceBand::Mid.contains(300));
        assert!(PriceBand::Premium.contains(301));
    }

    #[tokio::test]
    async fn browse_combines_every_filter() {
        let provider = StaticProvider::new(fixtures::menu_items());
        let all = browse(&provider, &MenuFilter::default()).await.unwrap();
        assert_eq!(all.len(), fixtures::menu_items().len());

        let filter = MenuFilter {
            search: "BIRYANI".into(),
            veg_only: true,
            ..MenuFilter::default()
        };
        let veg_biryani = browse(&provider, &filter).await.unwrap();
        assert!(!veg_biryani.is_empty());
        assert!(veg_biryani
            .iter()
            .all(|i| i.is_veg && i.name.to_lowercase().contains("biryani")));

        let filter = MenuFilter {
            category: Some(Category::Rice),
            price_band: Some(PriceBand::Premium),
            ..MenuFilter::default()
        };
        assert!(filter.has_active_filters());
        let found = browse(&provider, &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Mutton Biryani");
    }

    #[test]
    fn category_counts_cover_the_whole_menu() {
        let items = fixtures::menu_items();
        let counts = category_counts(&items);
        assert_eq!(counts.len(), 6);
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), items.len());
    }

    #[tokio::test]
    async fn active_order_and_history_partition_the_orders() {
        let provider = StaticProvider::new(fixtures::orders());
        let active = active_order(&provider).await.unwrap().unwrap();
        assert!(active.is_active());

        let history = order_history(&provider).await.unwrap();
        assert!(history.iter().all(|o| !o.is_active()));
        assert!(history.windows(2).all(|w| w[0].placed_at >= w[1].placed_at));
        assert!(!history.iter().any(|o| o.id == active.id));
    }
}
