//! Outbound calls and token transfers to other chains.
//!
//! Tokens enter through the cw20 `Send` hook. Gateway-issued tokens are burnt
//! out of custody, registered external tokens stay locked in it.

use cosmwasm_std::{
    from_json, to_json_binary, Binary, DepsMut, MessageInfo, Response, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};

use crate::error::ContractError;
use crate::events;
use crate::hash::keccak256;
use crate::msg::ReceiveMsg;
use crate::state::{TokenKind, TOKEN_BY_ADDRESS};
use crate::tokens::{ensure_not_frozen, load_token};

pub fn execute_call_contract(
    info: MessageInfo,
    destination_chain: String,
    destination_contract_address: String,
    payload: Binary,
) -> Result<Response, ContractError> {
    let payload_hash = keccak256(&payload);

    Ok(Response::new()
        .add_attribute("method", "call_contract")
        .add_event(events::contract_call(
            &info.sender,
            &destination_chain,
            &destination_contract_address,
            &payload_hash,
            &payload,
        )))
}

/// cw20 receive hook; `info.sender` is the token contract
pub fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let symbol = TOKEN_BY_ADDRESS
        .may_load(deps.storage, &info.sender)?
        .ok_or_else(|| ContractError::TokenNotRegistered {
            address: info.sender.to_string(),
        })?;
    let record = load_token(deps.storage, &symbol)?;
    ensure_not_frozen(deps.storage, &record)?;

    if wrapper.amount.is_zero() {
        return Err(ContractError::InvalidAmount);
    }

    let msg: ReceiveMsg = from_json(&wrapper.msg)?;

    let mut response = Response::new();
    if record.kind == TokenKind::Internal {
        response = response.add_message(WasmMsg::Execute {
            contract_addr: record.address.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Burn {
                amount: wrapper.amount,
            })?,
            funds: vec![],
        });
    }

    let response = match msg {
        ReceiveMsg::SendToken {
            destination_chain,
            destination_address,
        } => response
            .add_attribute("method", "send_token")
            .add_event(events::token_sent(
                &wrapper.sender,
                &destination_chain,
                &destination_address,
                &symbol,
                wrapper.amount,
            )),
        ReceiveMsg::CallContractWithToken {
            destination_chain,
            destination_contract_address,
            payload,
        } => {
            let payload_hash = keccak256(&payload);
            response
                .add_attribute("method", "call_contract_with_token")
                .add_event(events::contract_call_with_token(
                    &wrapper.sender,
                    &destination_chain,
                    &destination_contract_address,
                    &payload_hash,
                    &payload,
                    &symbol,
                    wrapper.amount,
                ))
        }
    };

    Ok(response)
}
