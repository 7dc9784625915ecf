//! Weighted multisig operator registry.
//!
//! Every rotation registers a new operator set under the next epoch. Proofs
//! signed by any of the last `OLD_KEY_RETENTION` sets are accepted; only the
//! current set may rotate operatorship again.

use cosmwasm_std::{Api, Deps, Event, HexBinary, StdError, Storage, Uint128};

use crate::crypto::recover_signer;
use crate::error::ContractError;
use crate::events;
use crate::hash::operator_set_hash;
use crate::msg::{OperatorSet, Proof};
use crate::state::{CURRENT_EPOCH, EPOCH_FOR_HASH, HASH_FOR_EPOCH, OLD_KEY_RETENTION};

/// Parse 20-byte operator addresses; any other length makes the set invalid
fn parse_operators(operators: &[HexBinary]) -> Result<Vec<[u8; 20]>, ContractError> {
    operators
        .iter()
        .map(|operator| {
            operator
                .as_slice()
                .try_into()
                .map_err(|_| ContractError::InvalidOperators)
        })
        .collect()
}

fn weights_u128(weights: &[Uint128]) -> Vec<u128> {
    weights.iter().map(|w| w.u128()).collect()
}

pub fn current_epoch(storage: &dyn Storage) -> Result<u64, ContractError> {
    Ok(CURRENT_EPOCH.may_load(storage)?.unwrap_or(0))
}

/// Hash identifying an operator set
pub fn operators_hash(
    operators: &[HexBinary],
    weights: &[Uint128],
    threshold: Uint128,
) -> Result<[u8; 32], ContractError> {
    let operators = parse_operators(operators)?;
    Ok(operator_set_hash(
        &operators,
        &weights_u128(weights),
        threshold.u128(),
    ))
}

// ============================================================================
// Proof Validation
// ============================================================================

/// Validate `proof` over `message_hash`.
///
/// Returns whether the signing set is the current one.
pub fn validate_proof(
    deps: Deps,
    message_hash: &[u8; 32],
    proof: &Proof,
) -> Result<bool, ContractError> {
    if proof.weights.len() != proof.operators.len() {
        return Err(ContractError::InvalidOperators);
    }

    let hash = operators_hash(&proof.operators, &proof.weights, proof.threshold)?;
    let epoch = EPOCH_FOR_HASH
        .may_load(deps.storage, &hash)?
        .unwrap_or(0);
    let current = current_epoch(deps.storage)?;

    if epoch == 0 || current - epoch >= OLD_KEY_RETENTION {
        return Err(ContractError::InvalidOperators);
    }

    validate_signatures(
        deps.api,
        message_hash,
        &parse_operators(&proof.operators)?,
        &proof.weights,
        proof.threshold,
        &proof.signatures,
    )?;

    Ok(epoch == current)
}

/// Walk the signatures in order, matching each recovered signer against the
/// remaining operators. Signers must therefore appear in operator order and
/// at most once.
fn validate_signatures(
    api: &dyn Api,
    message_hash: &[u8; 32],
    operators: &[[u8; 20]],
    weights: &[Uint128],
    threshold: Uint128,
    signatures: &[HexBinary],
) -> Result<(), ContractError> {
    let mut operator_index = 0usize;
    let mut weight = Uint128::zero();

    for signature in signatures {
        let signer = recover_signer(api, message_hash, signature.as_slice())?;

        while operator_index < operators.len() && operators[operator_index] != signer {
            operator_index += 1;
        }

        if operator_index == operators.len() {
            return Err(ContractError::MalformedSigners);
        }

        weight = weight
            .checked_add(weights[operator_index])
            .map_err(StdError::from)?;

        if weight >= threshold {
            return Ok(());
        }

        operator_index += 1;
    }

    Err(ContractError::LowSignaturesWeight)
}

// ============================================================================
// Operatorship Transfer
// ============================================================================

/// Check the structural invariants of a new operator set
fn validate_operator_set(set: &OperatorSet) -> Result<(), ContractError> {
    let operators = parse_operators(&set.operators)?;
    if operators.is_empty() {
        return Err(ContractError::InvalidOperators);
    }
    if operators.iter().any(|operator| operator == &[0u8; 20]) {
        return Err(ContractError::InvalidOperators);
    }
    // strictly ascending also rules out duplicates
    if operators.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ContractError::InvalidOperators);
    }

    if set.weights.len() != operators.len() || set.weights.iter().any(|w| w.is_zero()) {
        return Err(ContractError::InvalidWeights);
    }

    let mut total_weight = Uint128::zero();
    for weight in &set.weights {
        total_weight = total_weight
            .checked_add(*weight)
            .map_err(|_| ContractError::InvalidWeights)?;
    }

    if set.threshold.is_zero() || set.threshold > total_weight {
        return Err(ContractError::InvalidThreshold);
    }

    Ok(())
}

/// Register `set` as the operator set of the next epoch.
///
/// Only reachable from the authenticated `transferOperatorship` command,
/// instantiate and the upgrade setup path.
pub fn transfer_operatorship(
    storage: &mut dyn Storage,
    set: &OperatorSet,
) -> Result<Event, ContractError> {
    validate_operator_set(set)?;

    let hash = operators_hash(&set.operators, &set.weights, set.threshold)?;
    let current = current_epoch(storage)?;

    if current > 0 && HASH_FOR_EPOCH.may_load(storage, current)? == Some(hash) {
        return Err(ContractError::SameOperators);
    }
    if EPOCH_FOR_HASH.has(storage, &hash) {
        return Err(ContractError::DuplicateOperators);
    }

    let epoch = current + 1;
    CURRENT_EPOCH.save(storage, &epoch)?;
    HASH_FOR_EPOCH.save(storage, epoch, &hash)?;
    EPOCH_FOR_HASH.save(storage, &hash, &epoch)?;

    Ok(events::operatorship_transferred(epoch, &hash, set))
}
