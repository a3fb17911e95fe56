use crate::model::MenuItemId;

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds `quantity` of a dish, looked up on the menu. Merges with an existing line.
    Add { item: MenuItemId, quantity: u32 },
    /// Zero removes the line.
    SetQuantity { item: MenuItemId, quantity: u32 },
    Remove { item: MenuItemId },
    Clear,
}
