// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Middleware: CORS and request tracing only

pub mod debug;
pub mod health;
pub mod radar;
