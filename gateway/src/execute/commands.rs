//! Signed command batch execution.
//!
//! This module handles:
//! - Batch decoding, chain id check and proof validation (batch-fatal)
//! - Replay protection through the permanent executed flag
//! - Dispatch of `deployToken`, `mintToken`, `burnToken` and `transferOperatorship`
//!
//! A failing command never aborts the batch. Its executed flag stays set and a
//! `command_failed` event is emitted instead. Commands that hand work to a
//! sub-message are settled by the reply, which emits `command_executed` or
//! `command_failed` once the outcome is known.

use cosmwasm_std::{
    from_json, to_json_binary, Binary, CosmosMsg, DepsMut, Env, Response, WasmMsg,
};
use cw20::MinterResponse;
use cw20_base::msg::InstantiateMsg as Cw20InstantiateMsg;

use common::{DepositHandlerExecuteMsg, DepositHandlerInstantiateMsg, SweepMode, SweepMsg};

use crate::auth;
use crate::command::{self, Command};
use crate::deposit::{contract_exists, deposit_address, predict_address};
use crate::error::ContractError;
use crate::events;
use crate::execute::contract_call::{approve_contract_call, approve_contract_call_with_mint};
use crate::hash::{keccak256, prefixed_message_hash};
use crate::msg::{BurnTokenParams, CommandBatch, DeployTokenParams, MintTokenParams, Proof};
use crate::reply::track;
use crate::state::{
    PendingEffect, TokenKind, TokenRecord, COMMAND_EXECUTED, CONFIG, TOKENS, TOKEN_BY_ADDRESS,
};
use crate::tokens::{load_token, mint_message, register_token, reserve_mint};

/// Per-batch dispatch state
struct BatchContext {
    /// The proof was signed by the current operator set
    signed_by_current_operators: bool,
    operatorship_transferred: bool,
}

// ============================================================================
// Execute
// ============================================================================

/// Execute a signed batch. Anyone may submit.
pub fn execute_batch(
    mut deps: DepsMut,
    env: Env,
    batch: Binary,
    proof: Binary,
) -> Result<Response, ContractError> {
    let decoded: CommandBatch = from_json(&batch).map_err(|e| ContractError::MalformedBatch {
        reason: e.to_string(),
    })?;
    let proof: Proof = from_json(&proof).map_err(|e| ContractError::MalformedBatch {
        reason: format!("invalid proof: {}", e),
    })?;

    let count = decoded.command_ids.len();
    if decoded.commands.len() != count || decoded.params.len() != count {
        return Err(ContractError::MalformedBatch {
            reason: "command_ids, commands and params lengths differ".to_string(),
        });
    }
    if let Some(id) = decoded.command_ids.iter().find(|id| id.len() != 32) {
        return Err(ContractError::MalformedBatch {
            reason: format!("command id must be 32 bytes, got {}", id.len()),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    if decoded.chain_id != config.chain_id {
        return Err(ContractError::InvalidChainId {
            expected: config.chain_id,
            got: decoded.chain_id,
        });
    }

    let message_hash = prefixed_message_hash(batch.as_slice());
    let signed_by_current_operators = auth::validate_proof(deps.as_ref(), &message_hash, &proof)?;

    let mut ctx = BatchContext {
        signed_by_current_operators,
        operatorship_transferred: false,
    };

    let mut response = Response::new();
    let (mut executed, mut pending, mut failed, mut skipped) = (0u32, 0u32, 0u32, 0u32);

    for ((command_id, name), params) in decoded
        .command_ids
        .iter()
        .zip(decoded.commands.iter())
        .zip(decoded.params.iter())
    {
        let command_id = command_id.as_slice();
        if COMMAND_EXECUTED.has(deps.storage, command_id) {
            skipped += 1;
            continue;
        }
        // set before dispatch so a command can never run twice
        COMMAND_EXECUTED.save(deps.storage, command_id, &true)?;

        let outcome = Command::decode(name, params).and_then(|command| {
            let command_name = command.name();
            dispatch(deps.branch(), &env, command_id, command, &mut ctx)
                .map(|out| (command_name, out))
        });

        match outcome {
            // tracked sub-messages report executed or failed from the reply
            Ok((_, out)) if !out.messages.is_empty() => {
                pending += 1;
                response = response
                    .add_submessages(out.messages)
                    .add_events(out.events);
            }
            Ok((command_name, out)) => {
                executed += 1;
                response = response
                    .add_events(out.events)
                    .add_event(events::command_executed(command_id, command_name));
            }
            Err(err) => {
                failed += 1;
                response =
                    response.add_event(events::command_failed(command_id, name, &err.to_string()));
            }
        }
    }

    Ok(response
        .add_attribute("method", "execute")
        .add_attribute("batch_hash", events::to_hex(&keccak256(batch.as_slice())))
        .add_attribute("signed_by_current_operators", signed_by_current_operators.to_string())
        .add_attribute("executed", executed.to_string())
        .add_attribute("pending", pending.to_string())
        .add_attribute("failed", failed.to_string())
        .add_attribute("skipped", skipped.to_string()))
}

/// Run one command. Every handler validates before it writes, so an error
/// leaves no state behind.
fn dispatch(
    deps: DepsMut,
    env: &Env,
    command_id: &[u8],
    command: Command,
    ctx: &mut BatchContext,
) -> Result<Response, ContractError> {
    match command {
        Command::DeployToken(params) => deploy_token(deps, env, command_id, params),
        Command::MintToken(params) => mint_token(deps, env, command_id, params),
        Command::BurnToken(params) => burn_token(deps, env, command_id, params),
        Command::ApproveContractCall(params) => approve_contract_call(deps, command_id, params),
        Command::ApproveContractCallWithMint(params) => {
            approve_contract_call_with_mint(deps, command_id, params)
        }
        Command::TransferOperatorship(set) => {
            if !ctx.signed_by_current_operators {
                return Err(ContractError::NotCurrentOperators);
            }
            if ctx.operatorship_transferred {
                return Err(ContractError::OperatorshipAlreadyTransferred);
            }
            let event = auth::transfer_operatorship(deps.storage, &set)?;
            ctx.operatorship_transferred = true;
            Ok(Response::new().add_event(event))
        }
    }
}

// ============================================================================
// Token Commands
// ============================================================================

fn invalid_address(err: impl ToString) -> ContractError {
    ContractError::InvalidAddress {
        reason: err.to_string(),
    }
}

/// Register an existing cw20, or issue a new one at the address derived from
/// the symbol.
fn deploy_token(
    deps: DepsMut,
    env: &Env,
    command_id: &[u8],
    params: DeployTokenParams,
) -> Result<Response, ContractError> {
    if TOKENS.has(deps.storage, &params.symbol) {
        return Err(ContractError::TokenAlreadyExists {
            symbol: params.symbol,
        });
    }

    if let Some(token_address) = params.token_address {
        let address = deps
            .api
            .addr_validate(&token_address)
            .map_err(invalid_address)?;
        if !contract_exists(deps.as_ref(), &address) {
            return Err(ContractError::TokenContractDoesNotExist {
                address: address.to_string(),
            });
        }
        if let Some(existing) = TOKEN_BY_ADDRESS.may_load(deps.storage, &address)? {
            return Err(ContractError::TokenAlreadyExists { symbol: existing });
        }

        let record = TokenRecord {
            symbol: params.symbol,
            address,
            kind: TokenKind::External,
            mint_limit: params.mint_limit,
            window_minted: Default::default(),
            window_start: 0,
            frozen: false,
        };
        register_token(deps.storage, &record)?;

        return Ok(Response::new()
            .add_event(events::token_deployed(
                &record.symbol,
                &record.address,
                &record.kind,
            ))
            .add_event(events::token_mint_limit_updated(
                &record.symbol,
                record.mint_limit,
            )));
    }

    let instantiate = Cw20InstantiateMsg {
        name: params.name,
        symbol: params.symbol.clone(),
        decimals: params.decimals,
        initial_balances: vec![],
        mint: Some(MinterResponse {
            minter: env.contract.address.to_string(),
            cap: if params.cap.is_zero() {
                None
            } else {
                Some(params.cap)
            },
        }),
        marketing: None,
    };
    // cw20-base would reject these only inside the instantiate sub-message
    instantiate
        .validate()
        .map_err(|e| ContractError::InvalidTokenMetadata {
            reason: e.to_string(),
        })?;

    let config = CONFIG.load(deps.storage)?;
    let salt = keccak256(params.symbol.as_bytes());
    let address = predict_address(deps.as_ref(), env, config.token_code_id, &salt)?;

    let msg: CosmosMsg = WasmMsg::Instantiate2 {
        admin: None,
        code_id: config.token_code_id,
        label: format!("gateway-token-{}", params.symbol),
        msg: to_json_binary(&instantiate)?,
        funds: vec![],
        salt: Binary::from(salt.to_vec()),
    }
    .into();

    let record = TokenRecord {
        symbol: params.symbol,
        address,
        kind: TokenKind::Internal,
        mint_limit: params.mint_limit,
        window_minted: Default::default(),
        window_start: 0,
        frozen: false,
    };
    register_token(deps.storage, &record)?;

    let sub_msg = track(
        deps.storage,
        command_id,
        command::DEPLOY_TOKEN,
        PendingEffect::DeployToken {
            symbol: record.symbol.clone(),
        },
        msg,
    )?;

    // deployment events follow from the reply once the contract exists
    Ok(Response::new().add_submessage(sub_msg))
}

/// Mint an internal token or release an external one from custody
fn mint_token(
    deps: DepsMut,
    env: &Env,
    command_id: &[u8],
    params: MintTokenParams,
) -> Result<Response, ContractError> {
    let account = deps
        .api
        .addr_validate(&params.account)
        .map_err(invalid_address)?;

    let record = reserve_mint(
        deps.storage,
        &params.symbol,
        params.amount,
        env.block.time.seconds(),
    )?;
    let msg = mint_message(&record, &account, params.amount)?;

    let sub_msg = track(
        deps.storage,
        command_id,
        command::MINT_TOKEN,
        PendingEffect::MintToken {
            symbol: params.symbol,
            amount: params.amount,
            window_start: record.window_start,
        },
        msg,
    )?;

    Ok(Response::new().add_submessage(sub_msg))
}

/// Sweep the deposit address of `salt`. The handler is instantiated there on
/// first use and invoked directly afterwards.
fn burn_token(
    deps: DepsMut,
    env: &Env,
    command_id: &[u8],
    params: BurnTokenParams,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let record = load_token(deps.storage, &params.symbol)?;
    let salt = params.salt.as_slice();
    let deposit = deposit_address(deps.as_ref(), env, config.deposit_handler_code_id, salt)?;

    let sweep = SweepMsg {
        token: record.address.to_string(),
        mode: match record.kind {
            TokenKind::Internal => SweepMode::Burn,
            TokenKind::External => SweepMode::Release,
        },
    };

    let msg: CosmosMsg = if contract_exists(deps.as_ref(), &deposit) {
        WasmMsg::Execute {
            contract_addr: deposit.to_string(),
            msg: to_json_binary(&DepositHandlerExecuteMsg::Sweep(sweep))?,
            funds: vec![],
        }
        .into()
    } else {
        WasmMsg::Instantiate2 {
            admin: None,
            code_id: config.deposit_handler_code_id,
            label: format!("deposit-handler-{}", hex::encode(salt)),
            msg: to_json_binary(&DepositHandlerInstantiateMsg { sweep })?,
            funds: vec![],
            salt: Binary::from(salt),
        }
        .into()
    };

    let sub_msg = track(
        deps.storage,
        command_id,
        command::BURN_TOKEN,
        PendingEffect::BurnToken {
            symbol: params.symbol,
        },
        msg,
    )?;

    Ok(Response::new().add_submessage(sub_msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::{ApproveContractCallParams, OperatorSet};
    use crate::state::{Config, CONTRACT_CALL_APPROVALS, CURRENT_EPOCH, PENDING_REPLIES};
    use cosmwasm_std::testing::{mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage};
    use cosmwasm_std::{to_json_vec, Addr, Event, HexBinary, OwnedDeps, SubMsg, Uint128};
    use k256::ecdsa::{RecoveryId, SigningKey};
    use k256::elliptic_curve::sec1::ToEncodedPoint;

    const CHAIN_ID: u64 = 7;

    struct Operators {
        keys: Vec<SigningKey>,
        set: OperatorSet,
    }

    fn operators(seeds: &[u8], threshold: u128) -> Operators {
        let mut keyed: Vec<([u8; 20], SigningKey)> = seeds
            .iter()
            .map(|seed| {
                let key = SigningKey::from_slice(&[*seed; 32]).unwrap();
                let point = k256::PublicKey::from(key.verifying_key()).to_encoded_point(false);
                let hash = keccak256(&point.as_bytes()[1..]);
                let mut address = [0u8; 20];
                address.copy_from_slice(&hash[12..]);
                (address, key)
            })
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        Operators {
            set: OperatorSet {
                operators: keyed
                    .iter()
                    .map(|(a, _)| HexBinary::from(a.to_vec()))
                    .collect(),
                weights: keyed.iter().map(|_| Uint128::one()).collect(),
                threshold: Uint128::new(threshold),
            },
            keys: keyed.into_iter().map(|(_, k)| k).collect(),
        }
    }

    fn sign_batch(ops: &Operators, batch: &[u8]) -> Binary {
        let hash = prefixed_message_hash(batch);
        let signatures = ops
            .keys
            .iter()
            .map(|key| {
                let (signature, recid) = key.sign_prehash_recoverable(&hash).unwrap();
                let (signature, recid) = match signature.normalize_s() {
                    Some(normalized) => (
                        normalized,
                        RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced()),
                    ),
                    None => (signature, recid),
                };
                let mut bytes = signature.to_bytes().to_vec();
                bytes.push(recid.to_byte() + 27);
                HexBinary::from(bytes)
            })
            .collect();
        to_json_binary(&Proof {
            operators: ops.set.operators.clone(),
            weights: ops.set.weights.clone(),
            threshold: ops.set.threshold,
            signatures,
        })
        .unwrap()
    }

    fn batch(commands: Vec<(u8, &str, Binary)>) -> Binary {
        let mut b = CommandBatch {
            chain_id: CHAIN_ID,
            command_ids: vec![],
            commands: vec![],
            params: vec![],
        };
        for (id, name, params) in commands {
            b.command_ids.push(HexBinary::from(vec![id; 32]));
            b.commands.push(name.to_string());
            b.params.push(params);
        }
        Binary::from(to_json_vec(&b).unwrap())
    }

    fn setup(ops: &Operators) -> OwnedDeps<MockStorage, MockApi, MockQuerier> {
        let mut deps = mock_dependencies();
        CONFIG
            .save(
                deps.as_mut().storage,
                &Config {
                    chain_id: CHAIN_ID,
                    governance: Addr::unchecked("governance"),
                    mint_limiter: Addr::unchecked("limiter"),
                    token_code_id: 1,
                    deposit_handler_code_id: 2,
                    implementation_code_hash: HexBinary::from(vec![0u8; 32]),
                    all_tokens_frozen: false,
                },
            )
            .unwrap();
        CURRENT_EPOCH.save(deps.as_mut().storage, &0).unwrap();
        auth::transfer_operatorship(deps.as_mut().storage, &ops.set).unwrap();
        register_token(
            deps.as_mut().storage,
            &TokenRecord {
                symbol: "WETH".to_string(),
                address: Addr::unchecked("weth"),
                kind: TokenKind::Internal,
                mint_limit: Uint128::new(1_000),
                window_minted: Uint128::zero(),
                window_start: 0,
                frozen: false,
            },
        )
        .unwrap();
        deps
    }

    fn mint_params(amount: u128) -> Binary {
        to_json_binary(&MintTokenParams {
            symbol: "WETH".to_string(),
            account: "recipient".to_string(),
            amount: Uint128::new(amount),
        })
        .unwrap()
    }

    fn approve_params() -> Binary {
        to_json_binary(&ApproveContractCallParams {
            source_chain: "ethereum".to_string(),
            source_address: "0xsource".to_string(),
            contract_address: "destination".to_string(),
            payload_hash: HexBinary::from(vec![9u8; 32]),
            source_tx_hash: HexBinary::from(vec![8u8; 32]),
            source_event_index: 3,
        })
        .unwrap()
    }

    fn events_of<'a>(res: &'a Response, ty: &str) -> Vec<&'a Event> {
        res.events.iter().filter(|e| e.ty == ty).collect()
    }

    #[test]
    fn test_executes_commands_once() {
        let ops = operators(&[1, 2, 3], 2);
        let mut deps = setup(&ops);
        let b = batch(vec![
            (1, command::MINT_TOKEN, mint_params(100)),
            (2, command::APPROVE_CONTRACT_CALL, approve_params()),
        ]);
        let proof = sign_batch(&ops, &b);

        let res = execute_batch(deps.as_mut(), mock_env(), b.clone(), proof.clone()).unwrap();
        // the mint settles in its reply
        assert_eq!(events_of(&res, "command_executed").len(), 1);
        assert!(res
            .attributes
            .iter()
            .any(|a| a.key == "pending" && a.value == "1"));
        assert_eq!(events_of(&res, "contract_call_approved").len(), 1);
        assert_eq!(res.messages.len(), 1);
        assert_eq!(
            res.messages[0].msg,
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: "weth".to_string(),
                msg: to_json_binary(&cw20::Cw20ExecuteMsg::Mint {
                    recipient: "recipient".to_string(),
                    amount: Uint128::new(100),
                })
                .unwrap(),
                funds: vec![],
            })
        );
        assert!(PENDING_REPLIES.has(&deps.storage, res.messages[0].id));
        assert_eq!(
            CONTRACT_CALL_APPROVALS
                .keys(&deps.storage, None, None, cosmwasm_std::Order::Ascending)
                .count(),
            1
        );

        // replaying the same batch does nothing
        let res = execute_batch(deps.as_mut(), mock_env(), b, proof).unwrap();
        assert!(events_of(&res, "command_executed").is_empty());
        assert!(res.messages.is_empty());
        assert_eq!(
            load_token(&deps.storage, "WETH").unwrap().window_minted,
            Uint128::new(100)
        );
    }

    #[test]
    fn test_failed_command_does_not_abort_batch() {
        let ops = operators(&[1, 2], 1);
        let mut deps = setup(&ops);
        let b = batch(vec![
            (1, command::MINT_TOKEN, mint_params(5_000)),
            (2, "unknownCommand", Binary::default()),
            (3, command::MINT_TOKEN, mint_params(10)),
        ]);
        let proof = sign_batch(&ops, &b);

        let res = execute_batch(deps.as_mut(), mock_env(), b, proof).unwrap();

        let failed = events_of(&res, "command_failed");
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].attributes[1].value, "mintToken");
        assert!(failed[0].attributes[2].value.contains("Exceeds mint limit"));
        assert!(failed[1].attributes[2].value.contains("Unknown command"));
        assert!(events_of(&res, "command_executed").is_empty());
        assert_eq!(res.messages.len(), 1);

        // failed commands keep their executed flag
        for id in [1u8, 2, 3] {
            assert!(COMMAND_EXECUTED.has(&deps.storage, &[id; 32]));
        }
        assert_eq!(
            load_token(&deps.storage, "WETH").unwrap().window_minted,
            Uint128::new(10)
        );
    }

    #[test]
    fn test_batch_fatal_errors() {
        let ops = operators(&[1, 2], 2);
        let mut deps = setup(&ops);

        // wrong chain
        let mut wrong_chain: CommandBatch =
            from_json(batch(vec![(1, command::MINT_TOKEN, mint_params(1))])).unwrap();
        wrong_chain.chain_id = 8;
        let wrong_chain = Binary::from(to_json_vec(&wrong_chain).unwrap());
        let proof = sign_batch(&ops, &wrong_chain);
        assert_eq!(
            execute_batch(deps.as_mut(), mock_env(), wrong_chain, proof).unwrap_err(),
            ContractError::InvalidChainId {
                expected: CHAIN_ID,
                got: 8
            }
        );

        // short command id
        let mut short_id: CommandBatch =
            from_json(batch(vec![(1, command::MINT_TOKEN, mint_params(1))])).unwrap();
        short_id.command_ids[0] = HexBinary::from(vec![1u8; 31]);
        let short_id = Binary::from(to_json_vec(&short_id).unwrap());
        let proof = sign_batch(&ops, &short_id);
        assert!(matches!(
            execute_batch(deps.as_mut(), mock_env(), short_id, proof).unwrap_err(),
            ContractError::MalformedBatch { .. }
        ));

        // signature over a different batch
        let b = batch(vec![(1, command::MINT_TOKEN, mint_params(1))]);
        let other = batch(vec![(2, command::MINT_TOKEN, mint_params(1))]);
        let proof = sign_batch(&ops, &other);
        assert!(execute_batch(deps.as_mut(), mock_env(), b, proof).is_err());

        assert!(!COMMAND_EXECUTED.has(&deps.storage, &[1u8; 32]));
    }

    #[test]
    fn test_only_one_operatorship_transfer_per_batch() {
        let ops = operators(&[1, 2], 2);
        let mut deps = setup(&ops);
        let next = operators(&[3, 4], 2);
        let after = operators(&[5, 6], 2);

        let b = batch(vec![
            (1, command::TRANSFER_OPERATORSHIP, to_json_binary(&next.set).unwrap()),
            (2, command::TRANSFER_OPERATORSHIP, to_json_binary(&after.set).unwrap()),
        ]);
        let proof = sign_batch(&ops, &b);
        let res = execute_batch(deps.as_mut(), mock_env(), b, proof).unwrap();

        assert_eq!(events_of(&res, "operatorship_transferred").len(), 1);
        let failed = events_of(&res, "command_failed");
        assert_eq!(failed.len(), 1);
        assert_eq!(
            failed[0].attributes[2].value,
            ContractError::OperatorshipAlreadyTransferred.to_string()
        );
        assert_eq!(auth::current_epoch(&deps.storage).unwrap(), 2);
    }

    #[test]
    fn test_retained_operators_cannot_transfer_operatorship() {
        let ops = operators(&[1, 2], 2);
        let mut deps = setup(&ops);
        let next = operators(&[3, 4], 2);
        auth::transfer_operatorship(deps.as_mut().storage, &next.set).unwrap();

        let other = operators(&[5, 6], 2);
        let b = batch(vec![
            (1, command::TRANSFER_OPERATORSHIP, to_json_binary(&other.set).unwrap()),
            (2, command::MINT_TOKEN, mint_params(1)),
        ]);
        let proof = sign_batch(&ops, &b);
        let res = execute_batch(deps.as_mut(), mock_env(), b, proof).unwrap();

        let failed = events_of(&res, "command_failed");
        assert_eq!(failed.len(), 1);
        assert_eq!(
            failed[0].attributes[2].value,
            ContractError::NotCurrentOperators.to_string()
        );
        // other commands still run under a retained set
        assert_eq!(res.messages.len(), 1);
        assert!(COMMAND_EXECUTED.has(&deps.storage, &[1u8; 32]));
        assert_eq!(auth::current_epoch(&deps.storage).unwrap(), 2);
    }

    #[test]
    fn test_deploy_with_invalid_metadata_fails_synchronously() {
        let ops = operators(&[1], 1);
        let mut deps = setup(&ops);
        let params = to_json_binary(&DeployTokenParams {
            name: "X".to_string(),
            symbol: "X".to_string(),
            decimals: 18,
            cap: Uint128::new(1_000),
            token_address: None,
            mint_limit: Uint128::new(999),
        })
        .unwrap();
        let b = batch(vec![(1, command::DEPLOY_TOKEN, params)]);
        let proof = sign_batch(&ops, &b);

        let res = execute_batch(deps.as_mut(), mock_env(), b, proof).unwrap();
        let failed = events_of(&res, "command_failed");
        assert_eq!(failed.len(), 1);
        assert!(failed[0].attributes[2]
            .value
            .starts_with("Invalid token metadata"));
        assert!(events_of(&res, "command_executed").is_empty());
        assert!(events_of(&res, "token_deployed").is_empty());
        assert!(res.messages.is_empty());
        assert!(!TOKENS.has(&deps.storage, "X"));
    }

    #[test]
    fn test_mint_is_tracked_for_reply() {
        let ops = operators(&[1], 1);
        let mut deps = setup(&ops);
        let b = batch(vec![(1, command::MINT_TOKEN, mint_params(10))]);
        let proof = sign_batch(&ops, &b);

        let res = execute_batch(deps.as_mut(), mock_env(), b, proof).unwrap();
        let SubMsg { id, reply_on, .. } = res.messages[0].clone();
        assert_eq!(reply_on, cosmwasm_std::ReplyOn::Always);

        let pending = PENDING_REPLIES.load(&deps.storage, id).unwrap();
        assert_eq!(pending.command, "mintToken");
        assert_eq!(pending.command_id.as_slice(), &[1u8; 32]);
    }
}
