//! Gateway Contract - Cross-Chain Command Execution and Token Custody
//!
//! Operators of a weighted multisig sign batches of commands on another chain.
//! Anyone relays a batch here; the gateway checks the proof against the
//! recent operator sets and executes each command at most once.
//!
//! # Commands
//! - `deployToken` - issue a cw20 at a deterministic address, or register an
//!   existing one
//! - `mintToken` - mint (or release from custody) within the 6-hour mint limit
//! - `burnToken` - sweep a deterministic deposit address through a deposit
//!   handler
//! - `approveContractCall` / `approveContractCallWithMint` - approve an inbound
//!   call for its destination contract
//! - `transferOperatorship` - rotate to a new operator set (current set only)
//!
//! # Security
//! - Proofs from the last 16 operator epochs are accepted
//! - A command id is marked executed before dispatch and never cleared
//! - A failing command does not abort its batch
//! - Per-token mint windows and freezing, administered by the mint limiter
//! - Code upgrades check the new code's checksum and run setup only once

pub mod auth;
pub mod command;
pub mod contract;
pub mod crypto;
pub mod deposit;
pub mod error;
pub mod events;
mod execute;
pub mod hash;
pub mod msg;
mod query;
pub mod reply;
pub mod state;
pub mod tokens;

pub use crate::error::ContractError;
