//! Typed events emitted by the gateway.
//!
//! Byte strings are rendered as `0x`-prefixed lowercase hex.

use cosmwasm_std::{Addr, Binary, Event, Uint128};

use crate::msg::OperatorSet;
use crate::state::TokenKind;

pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Operator Registry
// ============================================================================

pub fn operatorship_transferred(epoch: u64, hash: &[u8; 32], set: &OperatorSet) -> Event {
    let operators: Vec<String> = set.operators.iter().map(|o| to_hex(o)).collect();
    Event::new("operatorship_transferred")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("operators_hash", to_hex(hash))
        .add_attribute("operators", operators.join(","))
        .add_attribute("weights", join(&set.weights))
        .add_attribute("threshold", set.threshold.to_string())
}

// ============================================================================
// Command Execution
// ============================================================================

pub fn command_executed(command_id: &[u8], command: &str) -> Event {
    Event::new("command_executed")
        .add_attribute("command_id", to_hex(command_id))
        .add_attribute("command", command)
}

pub fn command_failed(command_id: &[u8], command: &str, error: &str) -> Event {
    Event::new("command_failed")
        .add_attribute("command_id", to_hex(command_id))
        .add_attribute("command", command)
        .add_attribute("error", error)
}

// ============================================================================
// Tokens
// ============================================================================

pub fn token_deployed(symbol: &str, address: &Addr, kind: &TokenKind) -> Event {
    Event::new("token_deployed")
        .add_attribute("symbol", symbol)
        .add_attribute("token_address", address)
        .add_attribute("kind", kind.as_str())
}

pub fn token_mint_limit_updated(symbol: &str, limit: Uint128) -> Event {
    Event::new("token_mint_limit_updated")
        .add_attribute("symbol", symbol)
        .add_attribute("limit", limit)
}

pub fn token_frozen(symbol: &str) -> Event {
    Event::new("token_frozen").add_attribute("symbol", symbol)
}

pub fn token_unfrozen(symbol: &str) -> Event {
    Event::new("token_unfrozen").add_attribute("symbol", symbol)
}

pub fn all_tokens_frozen() -> Event {
    Event::new("all_tokens_frozen")
}

pub fn all_tokens_unfrozen() -> Event {
    Event::new("all_tokens_unfrozen")
}

// ============================================================================
// Contract Calls
// ============================================================================

pub fn contract_call_approved(
    command_id: &[u8],
    source_chain: &str,
    source_address: &str,
    contract_address: &Addr,
    payload_hash: &[u8],
    source_tx_hash: &[u8],
    source_event_index: u64,
) -> Event {
    Event::new("contract_call_approved")
        .add_attribute("command_id", to_hex(command_id))
        .add_attribute("source_chain", source_chain)
        .add_attribute("source_address", source_address)
        .add_attribute("contract_address", contract_address)
        .add_attribute("payload_hash", to_hex(payload_hash))
        .add_attribute("source_tx_hash", to_hex(source_tx_hash))
        .add_attribute("source_event_index", source_event_index.to_string())
}

/// Same as `contract_call_approved` plus the minted symbol and amount
pub fn contract_call_approved_with_mint(approved: Event, symbol: &str, amount: Uint128) -> Event {
    Event::new("contract_call_approved_with_mint")
        .add_attributes(approved.attributes)
        .add_attribute("symbol", symbol)
        .add_attribute("amount", amount)
}

pub fn contract_call_executed(command_id: &[u8], contract_address: &Addr) -> Event {
    Event::new("contract_call_executed")
        .add_attribute("command_id", to_hex(command_id))
        .add_attribute("contract_address", contract_address)
}

pub fn contract_call(
    sender: &Addr,
    destination_chain: &str,
    destination_contract_address: &str,
    payload_hash: &[u8; 32],
    payload: &Binary,
) -> Event {
    Event::new("contract_call")
        .add_attribute("sender", sender)
        .add_attribute("destination_chain", destination_chain)
        .add_attribute("destination_contract_address", destination_contract_address)
        .add_attribute("payload_hash", to_hex(payload_hash))
        .add_attribute("payload", payload.to_base64())
}

pub fn token_sent(
    sender: &str,
    destination_chain: &str,
    destination_address: &str,
    symbol: &str,
    amount: Uint128,
) -> Event {
    Event::new("token_sent")
        .add_attribute("sender", sender)
        .add_attribute("destination_chain", destination_chain)
        .add_attribute("destination_address", destination_address)
        .add_attribute("symbol", symbol)
        .add_attribute("amount", amount)
}

pub fn contract_call_with_token(
    sender: &str,
    destination_chain: &str,
    destination_contract_address: &str,
    payload_hash: &[u8; 32],
    payload: &Binary,
    symbol: &str,
    amount: Uint128,
) -> Event {
    Event::new("contract_call_with_token")
        .add_attribute("sender", sender)
        .add_attribute("destination_chain", destination_chain)
        .add_attribute("destination_contract_address", destination_contract_address)
        .add_attribute("payload_hash", to_hex(payload_hash))
        .add_attribute("payload", payload.to_base64())
        .add_attribute("symbol", symbol)
        .add_attribute("amount", amount)
}

// ============================================================================
// Governance & Upgrades
// ============================================================================

pub fn governance_transferred(previous: &Addr, new: &Addr) -> Event {
    Event::new("governance_transferred")
        .add_attribute("previous_governance", previous)
        .add_attribute("new_governance", new)
}

pub fn mint_limiter_transferred(previous: &Addr, new: &Addr) -> Event {
    Event::new("mint_limiter_transferred")
        .add_attribute("previous_mint_limiter", previous)
        .add_attribute("new_mint_limiter", new)
}

pub fn upgraded(code_id: u64, code_hash: &[u8]) -> Event {
    Event::new("upgraded")
        .add_attribute("code_id", code_id.to_string())
        .add_attribute("code_hash", to_hex(code_hash))
}
