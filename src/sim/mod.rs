/// Battery-gated zone admission policy.
pub mod admission;
/// Deficit-resolution state machine.
pub mod deficit;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod power_balance;
pub mod types;

pub use engine::Household;
pub use error::EnergyError;
