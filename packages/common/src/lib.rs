//! Common - Shared Types and Utilities for the Gateway Contracts
//!
//! This package provides the message types exchanged between the gateway and
//! the deposit handler it instantiates at deterministic addresses, plus the
//! keccak256 helper both sides hash with.

pub mod deposit;
pub mod hash;

pub use deposit::{
    DepositHandlerExecuteMsg, DepositHandlerInstantiateMsg, DepositHandlerQueryMsg,
    LockedResponse, OwnerResponse, SweepMode, SweepMsg,
};
pub use hash::keccak256;
