//! Deterministic addresses for gateway-instantiated contracts.
//!
//! Both gateway-issued tokens and deposit handlers live at
//! `instantiate2_address(checksum(code), canonical(gateway), salt)`.

use cosmwasm_std::{instantiate2_address, Addr, Deps, Env, StdError};

use crate::error::ContractError;

pub const SALT_LENGTH: usize = 32;

/// Address `code_id` would be instantiated at by the gateway with `salt`
pub fn predict_address(
    deps: Deps,
    env: &Env,
    code_id: u64,
    salt: &[u8],
) -> Result<Addr, ContractError> {
    let checksum = deps.querier.query_wasm_code_info(code_id)?.checksum;
    let creator = deps.api.addr_canonicalize(env.contract.address.as_str())?;
    let canonical = instantiate2_address(checksum.as_slice(), &creator, salt)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(deps.api.addr_humanize(&canonical)?)
}

/// Deposit address for `salt`. Depends only on the salt, not on the token.
pub fn deposit_address(
    deps: Deps,
    env: &Env,
    deposit_handler_code_id: u64,
    salt: &[u8],
) -> Result<Addr, ContractError> {
    if salt.len() != SALT_LENGTH {
        return Err(ContractError::InvalidSalt { got: salt.len() });
    }
    predict_address(deps, env, deposit_handler_code_id, salt)
}

/// Whether a contract is instantiated at `address`
pub fn contract_exists(deps: Deps, address: &Addr) -> bool {
    deps.querier
        .query_wasm_contract_info(address.as_str())
        .is_ok()
}
