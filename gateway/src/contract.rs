//! Gateway Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `reply` - Outcomes of command sub-messages

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::auth::transfer_operatorship;
use crate::error::ContractError;
use crate::execute::{
    execute_batch, execute_call_contract, execute_freeze_all_tokens, execute_freeze_token,
    execute_receive, execute_set_token_mint_limits, execute_transfer_governance,
    execute_transfer_mint_limiter, execute_unfreeze_all_tokens, execute_unfreeze_token,
    execute_upgrade, execute_validate_contract_call, execute_validate_contract_call_and_mint,
    migrate_gateway,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_all_tokens_frozen, query_config, query_current_epoch, query_deposit_address,
    query_epoch_for_hash, query_hash_for_epoch, query_is_command_executed,
    query_is_contract_call_and_mint_approved, query_is_contract_call_approved, query_token,
    query_token_address, query_token_frozen, query_token_mint_amount, query_token_mint_limit,
    query_tokens, query_validate_proof,
};
use crate::reply::handle_reply;
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, CURRENT_EPOCH};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let governance = deps
        .api
        .addr_validate(&msg.governance)
        .map_err(|_| ContractError::InvalidGovernance)?;
    let mint_limiter = deps
        .api
        .addr_validate(&msg.mint_limiter)
        .map_err(|_| ContractError::InvalidMintLimiter)?;

    // Checksum of the code this instance runs
    let code_id = deps
        .querier
        .query_wasm_contract_info(env.contract.address.as_str())?
        .code_id;
    let implementation_code_hash = deps.querier.query_wasm_code_info(code_id)?.checksum;

    let config = Config {
        chain_id: msg.chain_id,
        governance,
        mint_limiter,
        token_code_id: msg.token_code_id,
        deposit_handler_code_id: msg.deposit_handler_code_id,
        implementation_code_hash,
        all_tokens_frozen: false,
    };
    CONFIG.save(deps.storage, &config)?;
    CURRENT_EPOCH.save(deps.storage, &0)?;

    let mut response = Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("chain_id", msg.chain_id.to_string())
        .add_attribute("governance", config.governance.as_str())
        .add_attribute("mint_limiter", config.mint_limiter.as_str());

    for set in &msg.operators {
        response = response.add_event(transfer_operatorship(deps.storage, set)?);
    }

    Ok(response)
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Signed commands
        ExecuteMsg::Execute { batch, proof } => execute_batch(deps, env, batch, proof),

        // Inbound contract calls
        ExecuteMsg::ValidateContractCall {
            command_id,
            source_chain,
            source_address,
            payload_hash,
        } => execute_validate_contract_call(
            deps,
            info,
            command_id,
            source_chain,
            source_address,
            payload_hash,
        ),
        ExecuteMsg::ValidateContractCallAndMint {
            command_id,
            source_chain,
            source_address,
            payload_hash,
            symbol,
            amount,
        } => execute_validate_contract_call_and_mint(
            deps,
            env,
            info,
            command_id,
            source_chain,
            source_address,
            payload_hash,
            symbol,
            amount,
        ),

        // Outbound
        ExecuteMsg::CallContract {
            destination_chain,
            destination_contract_address,
            payload,
        } => execute_call_contract(info, destination_chain, destination_contract_address, payload),
        ExecuteMsg::Receive(msg) => execute_receive(deps, info, msg),

        // Governance & mint limiter
        ExecuteMsg::TransferGovernance { governance } => {
            execute_transfer_governance(deps, info, governance)
        }
        ExecuteMsg::TransferMintLimiter { mint_limiter } => {
            execute_transfer_mint_limiter(deps, info, mint_limiter)
        }
        ExecuteMsg::SetTokenMintLimits { symbols, limits } => {
            execute_set_token_mint_limits(deps, info, symbols, limits)
        }
        ExecuteMsg::FreezeToken { symbol } => execute_freeze_token(deps, info, symbol),
        ExecuteMsg::UnfreezeToken { symbol } => execute_unfreeze_token(deps, info, symbol),
        ExecuteMsg::FreezeAllTokens {} => execute_freeze_all_tokens(deps, info),
        ExecuteMsg::UnfreezeAllTokens {} => execute_unfreeze_all_tokens(deps, info),

        // Upgrade
        ExecuteMsg::Upgrade {
            new_code_id,
            new_code_hash,
            setup_params,
        } => execute_upgrade(deps, env, info, new_code_id, new_code_hash, setup_params),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::IsCommandExecuted { command_id } => {
            to_json_binary(&query_is_command_executed(deps, command_id)?)
        }
        QueryMsg::Token { symbol } => to_json_binary(&query_token(deps, env, symbol)?),
        QueryMsg::Tokens { start_after, limit } => {
            to_json_binary(&query_tokens(deps, env, start_after, limit)?)
        }
        QueryMsg::TokenAddress { symbol } => to_json_binary(&query_token_address(deps, symbol)?),
        QueryMsg::TokenMintLimit { symbol } => {
            to_json_binary(&query_token_mint_limit(deps, symbol)?)
        }
        QueryMsg::TokenMintAmount { symbol } => {
            to_json_binary(&query_token_mint_amount(deps, env, symbol)?)
        }
        QueryMsg::TokenFrozen { symbol } => to_json_binary(&query_token_frozen(deps, symbol)?),
        QueryMsg::AllTokensFrozen {} => to_json_binary(&query_all_tokens_frozen(deps)?),
        QueryMsg::DepositAddress { salt } => {
            to_json_binary(&query_deposit_address(deps, env, salt)?)
        }
        QueryMsg::IsContractCallApproved {
            command_id,
            source_chain,
            source_address,
            contract_address,
            payload_hash,
        } => to_json_binary(&query_is_contract_call_approved(
            deps,
            command_id,
            source_chain,
            source_address,
            contract_address,
            payload_hash,
        )?),
        QueryMsg::IsContractCallAndMintApproved {
            command_id,
            source_chain,
            source_address,
            contract_address,
            payload_hash,
            symbol,
            amount,
        } => to_json_binary(&query_is_contract_call_and_mint_approved(
            deps,
            command_id,
            source_chain,
            source_address,
            contract_address,
            payload_hash,
            symbol,
            amount,
        )?),
        QueryMsg::CurrentEpoch {} => to_json_binary(&query_current_epoch(deps)?),
        QueryMsg::HashForEpoch { epoch } => to_json_binary(&query_hash_for_epoch(deps, epoch)?),
        QueryMsg::EpochForHash { hash } => to_json_binary(&query_epoch_for_hash(deps, hash)?),
        QueryMsg::ValidateProof {
            message_hash,
            proof,
        } => to_json_binary(&query_validate_proof(deps, message_hash, proof)?),
    }
}

// ============================================================================
// Migrate & Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, msg: MigrateMsg) -> Result<Response, ContractError> {
    migrate_gateway(deps, msg)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    handle_reply(deps, msg)
}
