//! State definitions for the gateway contract
//!
//! Operator epochs, the command replay ledger, the token registry and the
//! bookkeeping for sub-messages emitted by commands.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:gateway";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of most recent epochs whose operator sets still validate proofs
pub const OLD_KEY_RETENTION: u64 = 16;

/// Mint window length: 6 hours
pub const MINT_WINDOW_SECONDS: u64 = 21_600;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Chain id every command batch must carry
    pub chain_id: u64,
    /// May transfer governance, manage tokens and upgrade the gateway
    pub governance: Addr,
    /// May set mint limits and freeze tokens
    pub mint_limiter: Addr,
    /// cw20-base code used for gateway-issued tokens
    pub token_code_id: u64,
    /// Deposit handler code instantiated at deposit addresses
    pub deposit_handler_code_id: u64,
    /// Checksum of the code the gateway currently runs
    pub implementation_code_hash: HexBinary,
    /// Global freeze, on top of the per-token flags
    pub all_tokens_frozen: bool,
}

// ============================================================================
// Token Registry
// ============================================================================

#[cw_serde]
pub enum TokenKind {
    /// Issued by the gateway; minted on the way in, burnt on the way out
    Internal,
    /// Pre-existing cw20; released from and locked into gateway custody
    External,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Internal => "internal",
            TokenKind::External => "external",
        }
    }
}

#[cw_serde]
pub struct TokenRecord {
    pub symbol: String,
    pub address: Addr,
    pub kind: TokenKind,
    /// Maximum minted per window, zero means unlimited
    pub mint_limit: Uint128,
    /// Amount minted during `window_start`'s window
    pub window_minted: Uint128,
    /// Start of the window `window_minted` belongs to (seconds)
    pub window_start: u64,
    pub frozen: bool,
}

// ============================================================================
// Sub-message Bookkeeping
// ============================================================================

/// What to undo when a command's sub-message fails
#[cw_serde]
pub enum PendingEffect {
    /// Drop the token registration
    DeployToken { symbol: String },
    /// Give the amount back to the mint window it was charged to
    MintToken {
        symbol: String,
        amount: Uint128,
        window_start: u64,
    },
    /// Nothing to undo; the failure is only reported
    BurnToken { symbol: String },
}

#[cw_serde]
pub struct PendingReply {
    pub command_id: HexBinary,
    pub command: String,
    pub effect: PendingEffect,
}

/// Set by `Upgrade`, consumed by `migrate`
#[cw_serde]
pub struct PendingUpgrade {
    pub code_id: u64,
    pub code_hash: HexBinary,
}

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

/// Epoch of the current operator set, 0 before the first rotation
pub const CURRENT_EPOCH: Item<u64> = Item::new("current_epoch");

/// Operator set hash registered for each epoch
pub const HASH_FOR_EPOCH: Map<u64, [u8; 32]> = Map::new("hash_for_epoch");

/// Epoch each operator set hash was registered in
pub const EPOCH_FOR_HASH: Map<&[u8], u64> = Map::new("epoch_for_hash");

/// Replay ledger, keyed by command id. Entries are never removed.
pub const COMMAND_EXECUTED: Map<&[u8], bool> = Map::new("command_executed");

/// Token records by symbol
pub const TOKENS: Map<&str, TokenRecord> = Map::new("tokens");

/// Reverse index from token contract to symbol
pub const TOKEN_BY_ADDRESS: Map<&Addr, String> = Map::new("token_by_address");

/// Approved inbound contract calls, removed on consumption
pub const CONTRACT_CALL_APPROVALS: Map<&[u8], bool> = Map::new("contract_call_approvals");

pub const PENDING_REPLIES: Map<u64, PendingReply> = Map::new("pending_replies");
pub const NEXT_REPLY_ID: Item<u64> = Item::new("next_reply_id");

pub const PENDING_UPGRADE: Item<PendingUpgrade> = Item::new("pending_upgrade");
