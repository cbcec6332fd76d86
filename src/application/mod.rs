pub mod use_cases;

pub use use_cases::apply_command::{fill_form, update_item, update_item_from_command};
pub use use_cases::find_item::find_item;
pub use use_cases::import_inventory::{ImportInventoryUseCase, ImportOutcome};
pub use use_cases::rooms::{items_in_room, list_rooms};
