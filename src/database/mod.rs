pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryRadarStore;
pub use repository::PgRadarStore;
pub use store::RadarStore;
