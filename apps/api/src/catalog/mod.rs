// Furniture catalog: item model, local/storage category mappings, in-memory
// registry, and the prompt-context formatter.
// The catalog feeds the selection engine — it never calls it.

pub mod formatter;
pub mod handlers;
pub mod item;
pub mod mapping;
pub mod store;
