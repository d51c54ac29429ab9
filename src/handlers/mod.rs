pub mod cats;

// Re-export handler functions for use in routing
pub use cats::create as cat_create;
pub use cats::delete as cat_delete;
pub use cats::get as cat_get;
pub use cats::list as cat_list;
pub use cats::update as cat_update;
