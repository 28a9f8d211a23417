// Bot tracking infra layer.
// - `json_config_store.rs` persists the tracking document to disk.

#[path = "json_config_store.rs"]
pub mod json_config_store;

pub use json_config_store::JsonConfigStore;
