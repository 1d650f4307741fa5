// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (bearer token required)
pub mod protected; // Mutating radar operations and the auth smoke test
pub mod public;    // Health, diagnostics and the radar listing
