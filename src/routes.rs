// Route path constants for the local HTTP front-end

pub const ITEMS: &str = "/items";
pub const ITEM: &str = "/items/{id}";
