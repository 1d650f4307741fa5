pub mod entry;
pub mod server;
