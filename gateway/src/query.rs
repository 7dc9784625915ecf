//! Query handlers for the gateway contract.

use cosmwasm_std::{Deps, Env, HexBinary, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::auth;
use crate::deposit::deposit_address;
use crate::error::ContractError;
use crate::hash::{contract_call_approval_key, contract_call_with_mint_approval_key};
use crate::msg::{
    AllTokensFrozenResponse, AmountResponse, ConfigResponse, DepositAddressResponse,
    EpochResponse, HashResponse, IsApprovedResponse, IsCommandExecutedResponse, Proof,
    TokenAddressResponse, TokenFrozenResponse, TokenResponse, TokensResponse,
    ValidateProofResponse,
};
use crate::state::{
    TokenRecord, COMMAND_EXECUTED, CONFIG, CONTRACT_CALL_APPROVALS, EPOCH_FOR_HASH,
    HASH_FOR_EPOCH, TOKENS,
};
use crate::tokens::{is_frozen, load_token, mint_amount};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

fn std_err(err: ContractError) -> StdError {
    match err {
        ContractError::Std(err) => err,
        other => StdError::generic_err(other.to_string()),
    }
}

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        chain_id: config.chain_id,
        governance: config.governance,
        mint_limiter: config.mint_limiter,
        token_code_id: config.token_code_id,
        deposit_handler_code_id: config.deposit_handler_code_id,
        implementation_code_hash: config.implementation_code_hash,
        all_tokens_frozen: config.all_tokens_frozen,
    })
}

pub fn query_is_command_executed(
    deps: Deps,
    command_id: HexBinary,
) -> StdResult<IsCommandExecutedResponse> {
    let executed = COMMAND_EXECUTED
        .may_load(deps.storage, command_id.as_slice())?
        .unwrap_or(false);
    Ok(IsCommandExecutedResponse { executed })
}

// ============================================================================
// Token Queries
// ============================================================================

fn token_response(deps: Deps, env: &Env, record: TokenRecord) -> StdResult<TokenResponse> {
    let frozen = is_frozen(deps.storage, &record).map_err(std_err)?;
    Ok(TokenResponse {
        mint_amount: mint_amount(&record, env.block.time.seconds()),
        symbol: record.symbol,
        address: record.address,
        kind: record.kind,
        mint_limit: record.mint_limit,
        frozen,
    })
}

pub fn query_token(deps: Deps, env: Env, symbol: String) -> StdResult<TokenResponse> {
    let record = load_token(deps.storage, &symbol).map_err(std_err)?;
    token_response(deps, &env, record)
}

/// Query paginated list of tokens, ordered by symbol.
pub fn query_tokens(
    deps: Deps,
    env: Env,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<TokensResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let tokens = TOKENS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (_, record) = item?;
            token_response(deps, &env, record)
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TokensResponse { tokens })
}

pub fn query_token_address(deps: Deps, symbol: String) -> StdResult<TokenAddressResponse> {
    let address = TOKENS
        .may_load(deps.storage, &symbol)?
        .map(|record| record.address);
    Ok(TokenAddressResponse { address })
}

pub fn query_token_mint_limit(deps: Deps, symbol: String) -> StdResult<AmountResponse> {
    let record = load_token(deps.storage, &symbol).map_err(std_err)?;
    Ok(AmountResponse {
        amount: record.mint_limit,
    })
}

pub fn query_token_mint_amount(deps: Deps, env: Env, symbol: String) -> StdResult<AmountResponse> {
    let record = load_token(deps.storage, &symbol).map_err(std_err)?;
    Ok(AmountResponse {
        amount: mint_amount(&record, env.block.time.seconds()),
    })
}

pub fn query_token_frozen(deps: Deps, symbol: String) -> StdResult<TokenFrozenResponse> {
    let record = load_token(deps.storage, &symbol).map_err(std_err)?;
    Ok(TokenFrozenResponse {
        frozen: is_frozen(deps.storage, &record).map_err(std_err)?,
    })
}

pub fn query_all_tokens_frozen(deps: Deps) -> StdResult<AllTokensFrozenResponse> {
    Ok(AllTokensFrozenResponse {
        frozen: CONFIG.load(deps.storage)?.all_tokens_frozen,
    })
}

pub fn query_deposit_address(
    deps: Deps,
    env: Env,
    salt: HexBinary,
) -> StdResult<DepositAddressResponse> {
    let config = CONFIG.load(deps.storage)?;
    let address = deposit_address(deps, &env, config.deposit_handler_code_id, &salt)
        .map_err(std_err)?;
    Ok(DepositAddressResponse { address })
}

// ============================================================================
// Contract Call Queries
// ============================================================================

pub fn query_is_contract_call_approved(
    deps: Deps,
    command_id: HexBinary,
    source_chain: String,
    source_address: String,
    contract_address: String,
    payload_hash: HexBinary,
) -> StdResult<IsApprovedResponse> {
    let key = contract_call_approval_key(
        &command_id,
        &source_chain,
        &source_address,
        &contract_address,
        &payload_hash,
    );
    Ok(IsApprovedResponse {
        approved: CONTRACT_CALL_APPROVALS.has(deps.storage, &key),
    })
}

#[allow(clippy::too_many_arguments)]
pub fn query_is_contract_call_and_mint_approved(
    deps: Deps,
    command_id: HexBinary,
    source_chain: String,
    source_address: String,
    contract_address: String,
    payload_hash: HexBinary,
    symbol: String,
    amount: Uint128,
) -> StdResult<IsApprovedResponse> {
    let key = contract_call_with_mint_approval_key(
        &command_id,
        &source_chain,
        &source_address,
        &contract_address,
        &payload_hash,
        &symbol,
        amount.u128(),
    );
    Ok(IsApprovedResponse {
        approved: CONTRACT_CALL_APPROVALS.has(deps.storage, &key),
    })
}

// ============================================================================
// Operator Registry Queries
// ============================================================================

pub fn query_current_epoch(deps: Deps) -> StdResult<EpochResponse> {
    Ok(EpochResponse {
        epoch: auth::current_epoch(deps.storage).map_err(std_err)?,
    })
}

pub fn query_hash_for_epoch(deps: Deps, epoch: u64) -> StdResult<HashResponse> {
    let hash = HASH_FOR_EPOCH
        .may_load(deps.storage, epoch)?
        .map(|hash| HexBinary::from(hash.to_vec()));
    Ok(HashResponse { hash })
}

/// Epoch 0 means the hash was never registered
pub fn query_epoch_for_hash(deps: Deps, hash: HexBinary) -> StdResult<EpochResponse> {
    let epoch = EPOCH_FOR_HASH
        .may_load(deps.storage, hash.as_slice())?
        .unwrap_or(0);
    Ok(EpochResponse { epoch })
}

pub fn query_validate_proof(
    deps: Deps,
    message_hash: HexBinary,
    proof: Proof,
) -> StdResult<ValidateProofResponse> {
    let message_hash: [u8; 32] = message_hash
        .as_slice()
        .try_into()
        .map_err(|_| std_err(ContractError::InvalidHashLength {
            got: message_hash.len(),
        }))?;
    let is_current_epoch = auth::validate_proof(deps, &message_hash, &proof).map_err(std_err)?;
    Ok(ValidateProofResponse { is_current_epoch })
}
