//! Execute handlers for the gateway contract.
//!
//! Handlers are grouped by category:
//! - `commands` - Signed command batches and their dispatch
//! - `contract_call` - Inbound contract call approval and consumption
//! - `outbound` - Outbound contract calls and token transfers
//! - `governance` - Role transfers, mint limits and freezing
//! - `upgrade` - Self-migration and the setup it runs

mod commands;
mod contract_call;
mod governance;
mod outbound;
mod upgrade;

pub use commands::*;
pub use contract_call::*;
pub use governance::*;
pub use outbound::*;
pub use upgrade::*;
