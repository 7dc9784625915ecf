//! Governance and mint limiter operations.
//!
//! This module handles:
//! - Governance and mint limiter transfer
//! - Per-token mint limits
//! - Per-token and global freezing

use cosmwasm_std::{Addr, DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::events;
use crate::state::{Config, CONFIG, TOKENS};
use crate::tokens::load_token;

pub fn ensure_governance(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if sender != config.governance {
        return Err(ContractError::NotGovernance);
    }
    Ok(())
}

/// The mint limiter or governance
pub fn ensure_mint_limiter(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if sender != config.mint_limiter && sender != config.governance {
        return Err(ContractError::NotMintLimiter);
    }
    Ok(())
}

// ============================================================================
// Role Transfers
// ============================================================================

pub fn execute_transfer_governance(
    deps: DepsMut,
    info: MessageInfo,
    governance: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_governance(&config, &info.sender)?;

    if governance.is_empty() {
        return Err(ContractError::InvalidGovernance);
    }
    let new_governance = deps
        .api
        .addr_validate(&governance)
        .map_err(|_| ContractError::InvalidGovernance)?;

    let previous = std::mem::replace(&mut config.governance, new_governance);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_governance")
        .add_event(events::governance_transferred(&previous, &config.governance)))
}

pub fn execute_transfer_mint_limiter(
    deps: DepsMut,
    info: MessageInfo,
    mint_limiter: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_mint_limiter(&config, &info.sender)?;

    if mint_limiter.is_empty() {
        return Err(ContractError::InvalidMintLimiter);
    }
    let new_mint_limiter = deps
        .api
        .addr_validate(&mint_limiter)
        .map_err(|_| ContractError::InvalidMintLimiter)?;

    let previous = std::mem::replace(&mut config.mint_limiter, new_mint_limiter);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_mint_limiter")
        .add_event(events::mint_limiter_transferred(
            &previous,
            &config.mint_limiter,
        )))
}

// ============================================================================
// Mint Limits
// ============================================================================

/// Set mint limits for several tokens. All symbols must exist.
pub fn execute_set_token_mint_limits(
    deps: DepsMut,
    info: MessageInfo,
    symbols: Vec<String>,
    limits: Vec<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_mint_limiter(&config, &info.sender)?;

    if symbols.len() != limits.len() {
        return Err(ContractError::InvalidSetMintLimitsParams);
    }

    let mut records = Vec::with_capacity(symbols.len());
    for (symbol, limit) in symbols.iter().zip(limits) {
        let mut record = load_token(deps.storage, symbol)?;
        record.mint_limit = limit;
        records.push(record);
    }

    let mut response = Response::new().add_attribute("method", "set_token_mint_limits");
    for record in records {
        TOKENS.save(deps.storage, &record.symbol, &record)?;
        response = response.add_event(events::token_mint_limit_updated(
            &record.symbol,
            record.mint_limit,
        ));
    }

    Ok(response)
}

// ============================================================================
// Freezing
// ============================================================================

fn set_token_frozen(
    deps: DepsMut,
    info: MessageInfo,
    symbol: String,
    frozen: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_mint_limiter(&config, &info.sender)?;

    let mut record = load_token(deps.storage, &symbol)?;
    record.frozen = frozen;
    TOKENS.save(deps.storage, &symbol, &record)?;

    let (method, event) = if frozen {
        ("freeze_token", events::token_frozen(&symbol))
    } else {
        ("unfreeze_token", events::token_unfrozen(&symbol))
    };
    Ok(Response::new()
        .add_attribute("method", method)
        .add_event(event))
}

pub fn execute_freeze_token(
    deps: DepsMut,
    info: MessageInfo,
    symbol: String,
) -> Result<Response, ContractError> {
    set_token_frozen(deps, info, symbol, true)
}

pub fn execute_unfreeze_token(
    deps: DepsMut,
    info: MessageInfo,
    symbol: String,
) -> Result<Response, ContractError> {
    set_token_frozen(deps, info, symbol, false)
}

fn set_all_tokens_frozen(
    deps: DepsMut,
    info: MessageInfo,
    frozen: bool,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_mint_limiter(&config, &info.sender)?;

    config.all_tokens_frozen = frozen;
    CONFIG.save(deps.storage, &config)?;

    let (method, event) = if frozen {
        ("freeze_all_tokens", events::all_tokens_frozen())
    } else {
        ("unfreeze_all_tokens", events::all_tokens_unfrozen())
    };
    Ok(Response::new()
        .add_attribute("method", method)
        .add_event(event))
}

pub fn execute_freeze_all_tokens(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    set_all_tokens_frozen(deps, info, true)
}

pub fn execute_unfreeze_all_tokens(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    set_all_tokens_frozen(deps, info, false)
}
