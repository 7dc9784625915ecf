//! Deposit Handler Contract
//!
//! Lives at a deterministic deposit address derived from the gateway address,
//! a salt and this contract's code checksum. Users send bridged funds to the
//! address before the handler exists; when the gateway executes a `burnToken`
//! command it instantiates (or re-invokes) the handler, which sweeps the cw20
//! balance (burn or release to the gateway) and forwards any native coins to
//! the gateway. Each invocation performs exactly one sweep under a lock.

pub mod contract;
pub mod error;
pub mod state;

pub use crate::error::ContractError;
