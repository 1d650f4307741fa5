// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Security Level: RS256 JWT validated against the configured issuer and audience
// Middleware: jwt_auth_middleware, applied per route in server::app

pub mod radar;
pub mod secure;
