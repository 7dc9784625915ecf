//! Inbound contract call approvals.
//!
//! Approvals are written by the `approveContractCall` and
//! `approveContractCallWithMint` commands and consumed exactly once by the
//! destination contract.

use cosmwasm_std::{to_json_binary, DepsMut, Env, HexBinary, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::events;
use crate::hash::{contract_call_approval_key, contract_call_with_mint_approval_key};
use crate::msg::{ApproveContractCallParams, ApproveContractCallWithMintParams};
use crate::state::CONTRACT_CALL_APPROVALS;
use crate::tokens::{mint_message, reserve_mint};

fn ensure_hash_length(hash: &HexBinary) -> Result<(), ContractError> {
    if hash.len() != 32 {
        return Err(ContractError::InvalidHashLength { got: hash.len() });
    }
    Ok(())
}

// ============================================================================
// Approval Commands
// ============================================================================

pub fn approve_contract_call(
    deps: DepsMut,
    command_id: &[u8],
    params: ApproveContractCallParams,
) -> Result<Response, ContractError> {
    let contract = deps
        .api
        .addr_validate(&params.contract_address)
        .map_err(|e| ContractError::InvalidAddress {
            reason: e.to_string(),
        })?;
    ensure_hash_length(&params.payload_hash)?;
    ensure_hash_length(&params.source_tx_hash)?;

    let key = contract_call_approval_key(
        command_id,
        &params.source_chain,
        &params.source_address,
        contract.as_str(),
        &params.payload_hash,
    );
    CONTRACT_CALL_APPROVALS.save(deps.storage, &key, &true)?;

    Ok(Response::new().add_event(events::contract_call_approved(
        command_id,
        &params.source_chain,
        &params.source_address,
        &contract,
        &params.payload_hash,
        &params.source_tx_hash,
        params.source_event_index,
    )))
}

pub fn approve_contract_call_with_mint(
    deps: DepsMut,
    command_id: &[u8],
    params: ApproveContractCallWithMintParams,
) -> Result<Response, ContractError> {
    let contract = deps
        .api
        .addr_validate(&params.contract_address)
        .map_err(|e| ContractError::InvalidAddress {
            reason: e.to_string(),
        })?;
    ensure_hash_length(&params.payload_hash)?;
    ensure_hash_length(&params.source_tx_hash)?;

    let key = contract_call_with_mint_approval_key(
        command_id,
        &params.source_chain,
        &params.source_address,
        contract.as_str(),
        &params.payload_hash,
        &params.symbol,
        params.amount.u128(),
    );
    CONTRACT_CALL_APPROVALS.save(deps.storage, &key, &true)?;

    let approved = events::contract_call_approved(
        command_id,
        &params.source_chain,
        &params.source_address,
        &contract,
        &params.payload_hash,
        &params.source_tx_hash,
        params.source_event_index,
    );
    Ok(Response::new().add_event(events::contract_call_approved_with_mint(
        approved,
        &params.symbol,
        params.amount,
    )))
}

// ============================================================================
// Consumption (called by the destination contract)
// ============================================================================

/// Consume an approval addressed to the caller. Response data is the JSON
/// bool `true` when an approval was found, `false` otherwise.
pub fn execute_validate_contract_call(
    deps: DepsMut,
    info: MessageInfo,
    command_id: HexBinary,
    source_chain: String,
    source_address: String,
    payload_hash: HexBinary,
) -> Result<Response, ContractError> {
    let key = contract_call_approval_key(
        &command_id,
        &source_chain,
        &source_address,
        info.sender.as_str(),
        &payload_hash,
    );

    let valid = CONTRACT_CALL_APPROVALS.has(deps.storage, &key);
    let mut response = Response::new()
        .add_attribute("method", "validate_contract_call")
        .add_attribute("valid", valid.to_string())
        .set_data(to_json_binary(&valid)?);

    if valid {
        CONTRACT_CALL_APPROVALS.remove(deps.storage, &key);
        response = response.add_event(events::contract_call_executed(&command_id, &info.sender));
    }

    Ok(response)
}

/// As `execute_validate_contract_call`, then mints `amount` of `symbol` to the
/// caller. Mint failures abort the call.
#[allow(clippy::too_many_arguments)]
pub fn execute_validate_contract_call_and_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    command_id: HexBinary,
    source_chain: String,
    source_address: String,
    payload_hash: HexBinary,
    symbol: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let key = contract_call_with_mint_approval_key(
        &command_id,
        &source_chain,
        &source_address,
        info.sender.as_str(),
        &payload_hash,
        &symbol,
        amount.u128(),
    );

    let valid = CONTRACT_CALL_APPROVALS.has(deps.storage, &key);
    let mut response = Response::new()
        .add_attribute("method", "validate_contract_call_and_mint")
        .add_attribute("valid", valid.to_string())
        .set_data(to_json_binary(&valid)?);

    if valid {
        CONTRACT_CALL_APPROVALS.remove(deps.storage, &key);
        let record = reserve_mint(deps.storage, &symbol, amount, env.block.time.seconds())?;
        response = response
            .add_message(mint_message(&record, &info.sender, amount)?)
            .add_event(events::contract_call_executed(&command_id, &info.sender))
            .add_attribute("symbol", symbol)
            .add_attribute("amount", amount);
    }

    Ok(response)
}
