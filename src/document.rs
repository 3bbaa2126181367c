pub mod store;

pub(crate) mod model;
mod snapshot;

// Re-export main types
pub use model::Document;
pub use snapshot::DocumentSnapshot;
pub use store::DocumentStore;
