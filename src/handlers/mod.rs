// handlers/mod.rs - Handlers grouped by security tier
//
// Public (no auth) → Protected (USER or ADMIN) → Elevated (ADMIN).
// The tiers document intent; enforcement lives in `crate::auth` and runs
// in the auth middleware before any handler.
pub mod elevated;
pub mod protected;
pub mod public;
