//! Training: building and persisting the classification database.
//!
//! - [`builder::DatabaseBuilder`]: train a database from labeled references
//! - [`store::TrainedDatabase`]: the immutable trained artifact, with
//!   versioned binary persistence and JSON export

pub mod builder;
pub mod store;
