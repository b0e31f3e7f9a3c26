mod store;
mod types;
pub mod version;

pub use store::DocumentStore;
pub use types::*;
