pub mod listing;
pub mod saved;

pub use listing::{
    create_property, delete_property, get_property, list_properties, update_property, PropertyPage,
};
pub use saved::{list_saved_properties, save_property, unsave_property};
