//! Upgrade controller.
//!
//! The gateway is deployed as its own contract admin, so governance can swap
//! its code by having the gateway migrate itself. `Upgrade` checks the new
//! code's checksum and leaves a `PendingUpgrade` marker; `migrate` refuses to
//! run setup without one.

use cosmwasm_std::{
    to_json_binary, DepsMut, Env, HexBinary, MessageInfo, Response, WasmMsg,
};
use cw2::set_contract_version;

use crate::auth::transfer_operatorship;
use crate::error::ContractError;
use crate::events;
use crate::execute::governance::ensure_governance;
use crate::msg::{MigrateMsg, SetupParams};
use crate::state::{
    PendingUpgrade, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, PENDING_UPGRADE,
};

pub fn execute_upgrade(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_code_id: u64,
    new_code_hash: HexBinary,
    setup_params: Option<SetupParams>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_governance(&config, &info.sender)?;

    let contract_info = deps
        .querier
        .query_wasm_contract_info(env.contract.address.as_str())?;
    if contract_info.admin.as_deref() != Some(env.contract.address.as_str()) {
        return Err(ContractError::NotProxy);
    }

    let checksum = deps.querier.query_wasm_code_info(new_code_id)?.checksum;
    if checksum != new_code_hash {
        return Err(ContractError::InvalidCodeHash {
            expected: new_code_hash.to_hex(),
            actual: checksum.to_hex(),
        });
    }

    PENDING_UPGRADE.save(
        deps.storage,
        &PendingUpgrade {
            code_id: new_code_id,
            code_hash: new_code_hash.clone(),
        },
    )?;

    let migrate = WasmMsg::Migrate {
        contract_addr: env.contract.address.to_string(),
        new_code_id,
        msg: to_json_binary(&MigrateMsg { setup_params })?,
    };

    Ok(Response::new()
        .add_message(migrate)
        .add_attribute("method", "upgrade")
        .add_event(events::upgraded(new_code_id, &new_code_hash)))
}

/// Migration entry: only valid as the second half of `execute_upgrade`
pub fn migrate_gateway(deps: DepsMut, msg: MigrateMsg) -> Result<Response, ContractError> {
    let pending = PENDING_UPGRADE
        .may_load(deps.storage)?
        .ok_or(ContractError::AlreadyInitialized)?;
    PENDING_UPGRADE.remove(deps.storage);

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.implementation_code_hash = pending.code_hash;

    let mut response = Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("code_id", pending.code_id.to_string());

    if let Some(setup) = msg.setup_params {
        if let Some(governance) = setup.governance {
            let governance = deps
                .api
                .addr_validate(&governance)
                .map_err(|_| ContractError::InvalidGovernance)?;
            response = response.add_event(events::governance_transferred(
                &config.governance,
                &governance,
            ));
            config.governance = governance;
        }

        if let Some(mint_limiter) = setup.mint_limiter {
            let mint_limiter = deps
                .api
                .addr_validate(&mint_limiter)
                .map_err(|_| ContractError::InvalidMintLimiter)?;
            response = response.add_event(events::mint_limiter_transferred(
                &config.mint_limiter,
                &mint_limiter,
            ));
            config.mint_limiter = mint_limiter;
        }

        for set in setup.operators.unwrap_or_default() {
            response = response.add_event(transfer_operatorship(deps.storage, &set)?);
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(response)
}
