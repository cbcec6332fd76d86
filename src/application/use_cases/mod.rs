pub mod apply_command;
pub mod column_resolver;
pub mod find_item;
pub mod import_inventory;
pub mod rooms;
