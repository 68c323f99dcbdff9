//! Pipeline module - load, clean, split, model and evaluate

pub mod cleaner;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod schema;
pub mod split;

pub use cleaner::*;
pub use loader::*;
pub use metrics::*;
pub use model::*;
pub use schema::*;
pub use split::*;
