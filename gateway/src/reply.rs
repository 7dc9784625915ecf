//! Sub-message bookkeeping.
//!
//! Commands dispatch token and handler calls as `reply_always` sub-messages so
//! a failing token contract fails only its own command. The reply settles the
//! command: `command_executed` on success, otherwise the registry effect is
//! undone and `command_failed` is reported.

use cosmwasm_std::{
    CosmosMsg, DepsMut, HexBinary, Reply, Response, StdResult, Storage, SubMsg, SubMsgResult,
};

use crate::error::ContractError;
use crate::events;
use crate::state::{PendingEffect, PendingReply, NEXT_REPLY_ID, PENDING_REPLIES};
use crate::tokens::{load_token, release_mint, unregister_token};

/// Wrap `msg` so its outcome is reported back for `command_id`
pub fn track(
    storage: &mut dyn Storage,
    command_id: &[u8],
    command: &str,
    effect: PendingEffect,
    msg: CosmosMsg,
) -> StdResult<SubMsg> {
    let id = NEXT_REPLY_ID.may_load(storage)?.unwrap_or(1);
    NEXT_REPLY_ID.save(storage, &(id + 1))?;

    PENDING_REPLIES.save(
        storage,
        id,
        &PendingReply {
            command_id: HexBinary::from(command_id),
            command: command.to_string(),
            effect,
        },
    )?;

    Ok(SubMsg::reply_always(msg, id))
}

pub fn handle_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_REPLIES
        .may_load(deps.storage, msg.id)?
        .ok_or(ContractError::UnknownReplyId { id: msg.id })?;
    PENDING_REPLIES.remove(deps.storage, msg.id);

    let error = match msg.result {
        SubMsgResult::Ok(_) => return settle_success(deps, &pending),
        SubMsgResult::Err(error) => error,
    };

    match &pending.effect {
        PendingEffect::DeployToken { symbol } => unregister_token(deps.storage, symbol)?,
        PendingEffect::MintToken {
            symbol,
            amount,
            window_start,
        } => release_mint(deps.storage, symbol, *amount, *window_start)?,
        PendingEffect::BurnToken { .. } => {}
    }

    Ok(Response::new()
        .add_attribute("method", "reply")
        .add_attribute("command_id", events::to_hex(&pending.command_id))
        .add_attribute("result", "error")
        .add_event(events::command_failed(
            &pending.command_id,
            &pending.command,
            &error,
        )))
}

fn settle_success(deps: DepsMut, pending: &PendingReply) -> Result<Response, ContractError> {
    let mut response = Response::new()
        .add_attribute("method", "reply")
        .add_attribute("command_id", events::to_hex(&pending.command_id))
        .add_attribute("result", "ok");

    if let PendingEffect::DeployToken { symbol } = &pending.effect {
        let record = load_token(deps.storage, symbol)?;
        response = response
            .add_event(events::token_deployed(
                &record.symbol,
                &record.address,
                &record.kind,
            ))
            .add_event(events::token_mint_limit_updated(
                &record.symbol,
                record.mint_limit,
            ));
    }

    Ok(response.add_event(events::command_executed(
        &pending.command_id,
        &pending.command,
    )))
}
