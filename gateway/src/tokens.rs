//! Token registry, mint windows and freezing.
//!
//! Mint accounting uses fixed 6-hour windows aligned to multiples of
//! `MINT_WINDOW_SECONDS`. A record's `window_minted` only counts while its
//! `window_start` is the current window.

use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, Storage, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::state::{TokenKind, TokenRecord, CONFIG, MINT_WINDOW_SECONDS, TOKENS, TOKEN_BY_ADDRESS};

pub fn window_start(now_seconds: u64) -> u64 {
    now_seconds - now_seconds % MINT_WINDOW_SECONDS
}

/// Amount minted in the window containing `now_seconds`
pub fn mint_amount(record: &TokenRecord, now_seconds: u64) -> Uint128 {
    if record.window_start == window_start(now_seconds) {
        record.window_minted
    } else {
        Uint128::zero()
    }
}

pub fn load_token(storage: &dyn Storage, symbol: &str) -> Result<TokenRecord, ContractError> {
    TOKENS
        .may_load(storage, symbol)?
        .ok_or_else(|| ContractError::TokenDoesNotExist {
            symbol: symbol.to_string(),
        })
}

/// Per-token flag or the global freeze
pub fn is_frozen(storage: &dyn Storage, record: &TokenRecord) -> Result<bool, ContractError> {
    Ok(record.frozen || CONFIG.load(storage)?.all_tokens_frozen)
}

pub fn ensure_not_frozen(storage: &dyn Storage, record: &TokenRecord) -> Result<(), ContractError> {
    if is_frozen(storage, record)? {
        return Err(ContractError::TokenIsFrozen {
            symbol: record.symbol.clone(),
        });
    }
    Ok(())
}

/// Register a new token. An existing record under the same symbol is kept.
pub fn register_token(storage: &mut dyn Storage, record: &TokenRecord) -> Result<(), ContractError> {
    if TOKENS.has(storage, &record.symbol) {
        return Err(ContractError::TokenAlreadyExists {
            symbol: record.symbol.clone(),
        });
    }
    TOKENS.save(storage, &record.symbol, record)?;
    TOKEN_BY_ADDRESS.save(storage, &record.address, &record.symbol)?;
    Ok(())
}

pub fn unregister_token(storage: &mut dyn Storage, symbol: &str) -> StdResult<()> {
    if let Some(record) = TOKENS.may_load(storage, symbol)? {
        TOKEN_BY_ADDRESS.remove(storage, &record.address);
        TOKENS.remove(storage, symbol);
    }
    Ok(())
}

/// Check freeze, amount and mint limit, then charge `amount` to the current
/// window. Returns the updated record.
pub fn reserve_mint(
    storage: &mut dyn Storage,
    symbol: &str,
    amount: Uint128,
    now_seconds: u64,
) -> Result<TokenRecord, ContractError> {
    let mut record = load_token(storage, symbol)?;
    ensure_not_frozen(storage, &record)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount);
    }

    let minted = mint_amount(&record, now_seconds);
    let total = minted.checked_add(amount).map_err(|_| ContractError::ExceedMintLimit {
        symbol: symbol.to_string(),
        limit: record.mint_limit,
        requested: amount,
    })?;

    if !record.mint_limit.is_zero() && total > record.mint_limit {
        return Err(ContractError::ExceedMintLimit {
            symbol: symbol.to_string(),
            limit: record.mint_limit,
            requested: amount,
        });
    }

    record.window_start = window_start(now_seconds);
    record.window_minted = total;
    TOKENS.save(storage, symbol, &record)?;

    Ok(record)
}

/// Undo a reservation, as long as its window is still the record's window
pub fn release_mint(
    storage: &mut dyn Storage,
    symbol: &str,
    amount: Uint128,
    reserved_window_start: u64,
) -> StdResult<()> {
    if let Some(mut record) = TOKENS.may_load(storage, symbol)? {
        if record.window_start == reserved_window_start {
            record.window_minted = record.window_minted.saturating_sub(amount);
            TOKENS.save(storage, symbol, &record)?;
        }
    }
    Ok(())
}

/// Mint (internal) or release from custody (external) to `recipient`
pub fn mint_message(record: &TokenRecord, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    let msg = match record.kind {
        TokenKind::Internal => Cw20ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        },
        TokenKind::External => Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        },
    };
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: record.address.to_string(),
        msg: to_json_binary(&msg)?,
        funds: vec![],
    }))
}
