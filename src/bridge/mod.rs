//! Command execution bridge
//!
//! Funnels command text into the external batch executable through its input
//! file and relays whatever it leaves in its output file.

pub mod executor;
pub mod state;

pub use executor::CommandBridge;
pub use state::BridgeState;
