//! Deposit Handler - Entry Points

use cosmwasm_std::{
    entry_point, to_json_binary, Addr, BankMsg, Binary, CosmosMsg, Deps, DepsMut, Env,
    MessageInfo, Reply, Response, StdResult, SubMsg, WasmMsg,
};
use cw2::set_contract_version;
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};

use common::{
    DepositHandlerExecuteMsg, DepositHandlerInstantiateMsg, DepositHandlerQueryMsg,
    LockedResponse, OwnerResponse, SweepMode, SweepMsg,
};

use crate::error::ContractError;
use crate::state::{CONTRACT_NAME, CONTRACT_VERSION, LOCKED, OWNER};

/// Reply id of the last message of a sweep; releases the lock
pub const SWEEP_SETTLED_REPLY_ID: u64 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: DepositHandlerInstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    OWNER.save(deps.storage, &info.sender)?;
    LOCKED.save(deps.storage, &false)?;

    let response = sweep(deps, &env, &info.sender, msg.sweep)?;

    Ok(response.add_attribute("owner", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: DepositHandlerExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        DepositHandlerExecuteMsg::Sweep(sweep_msg) => {
            let owner = OWNER.load(deps.storage)?;
            if info.sender != owner {
                return Err(ContractError::Unauthorized);
            }
            sweep(deps, &env, &owner, sweep_msg)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: DepositHandlerQueryMsg) -> StdResult<Binary> {
    match msg {
        DepositHandlerQueryMsg::Owner {} => to_json_binary(&OwnerResponse {
            owner: OWNER.load(deps.storage)?,
        }),
        DepositHandlerQueryMsg::Locked {} => to_json_binary(&LockedResponse {
            locked: LOCKED.may_load(deps.storage)?.unwrap_or(false),
        }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        SWEEP_SETTLED_REPLY_ID => {
            LOCKED.save(deps.storage, &false)?;
            Ok(Response::new().add_attribute("method", "sweep_settled"))
        }
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

/// Empty the handler's balances into the owner's custody.
///
/// The lock is taken when there is anything to move and released by the reply
/// to the final outgoing message, so a token contract calling back into the
/// handler mid-sweep is rejected.
fn sweep(
    deps: DepsMut,
    env: &Env,
    owner: &Addr,
    msg: SweepMsg,
) -> Result<Response, ContractError> {
    if LOCKED.may_load(deps.storage)?.unwrap_or(false) {
        return Err(ContractError::Locked);
    }

    let token = deps.api.addr_validate(&msg.token)?;
    let balance: BalanceResponse = deps.querier.query_wasm_smart(
        token.as_str(),
        &Cw20QueryMsg::Balance {
            address: env.contract.address.to_string(),
        },
    )?;

    let mut messages: Vec<CosmosMsg> = vec![];
    if !balance.balance.is_zero() {
        let cw20_msg = match msg.mode {
            SweepMode::Burn => Cw20ExecuteMsg::Burn {
                amount: balance.balance,
            },
            SweepMode::Release => Cw20ExecuteMsg::Transfer {
                recipient: owner.to_string(),
                amount: balance.balance,
            },
        };
        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&cw20_msg)?,
            funds: vec![],
        }));
    }

    let native = deps.querier.query_all_balances(env.contract.address.as_str())?;
    let native_swept = native
        .iter()
        .map(|coin| coin.to_string())
        .collect::<Vec<_>>()
        .join(",");
    if !native.is_empty() {
        messages.push(CosmosMsg::Bank(BankMsg::Send {
            to_address: owner.to_string(),
            amount: native,
        }));
    }

    let mut response = Response::new()
        .add_attribute("method", "sweep")
        .add_attribute("token", token)
        .add_attribute("amount", balance.balance.to_string())
        .add_attribute("native", native_swept);

    if let Some(last) = messages.pop() {
        LOCKED.save(deps.storage, &true)?;
        response = response
            .add_messages(messages)
            .add_submessage(SubMsg::reply_on_success(last, SWEEP_SETTLED_REPLY_ID));
    }

    Ok(response)
}
