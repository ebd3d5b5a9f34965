// Project session: the configurator's application state and its explicit
// serialization boundary.

pub mod handlers;
pub mod store;
