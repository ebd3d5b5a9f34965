// Furniture selection: catalog-constrained greedy selection, the BOM
// assembly built from it, and the HTTP handlers exposing both.

pub mod bom;
pub mod handlers;
pub mod selector;
