//! Hash computation for batch signing, operator set identity and contract-call
//! approvals.
//!
//! # Operator set identity
//! Matches the EVM `keccak256(abi.encode(address[] operators, uint256[] weights,
//! uint256 threshold))`.
//!
//! # abi.encode layout for (address[], uint256[], uint256) with n operators
//! - Word 0: offset of `operators` (0x60)
//! - Word 1: offset of `weights` (0x60 + 32 * (n + 1))
//! - Word 2: threshold
//! - `operators`: length word, then n addresses left-padded to 32 bytes
//! - `weights`: length word, then n uint256 values

pub use common::keccak256;

const WORD: usize = 32;

/// `keccak256("\x19Ethereum Signed Message:\n32" || keccak256(data))`
pub fn prefixed_message_hash(data: &[u8]) -> [u8; 32] {
    let inner = keccak256(data);
    let mut buf = Vec::with_capacity(28 + WORD);
    buf.extend_from_slice(b"\x19Ethereum Signed Message:\n32");
    buf.extend_from_slice(&inner);
    keccak256(&buf)
}

fn u128_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn usize_word(value: usize) -> [u8; WORD] {
    u128_word(value as u128)
}

/// ABI-encode an operator set. Addresses must already be 20 bytes.
pub fn encode_operator_set(operators: &[[u8; 20]], weights: &[u128], threshold: u128) -> Vec<u8> {
    let n = operators.len();
    let mut data = Vec::with_capacity(WORD * (5 + n + weights.len()));

    data.extend_from_slice(&usize_word(3 * WORD));
    data.extend_from_slice(&usize_word(3 * WORD + WORD * (n + 1)));
    data.extend_from_slice(&u128_word(threshold));

    data.extend_from_slice(&usize_word(n));
    for operator in operators {
        let mut word = [0u8; WORD];
        word[12..].copy_from_slice(operator);
        data.extend_from_slice(&word);
    }

    data.extend_from_slice(&usize_word(weights.len()));
    for weight in weights {
        data.extend_from_slice(&u128_word(*weight));
    }

    data
}

pub fn operator_set_hash(operators: &[[u8; 20]], weights: &[u128], threshold: u128) -> [u8; 32] {
    keccak256(&encode_operator_set(operators, weights, threshold))
}

// ============================================================================
// Contract Call Approval Keys
// ============================================================================

const PREFIX_CONTRACT_CALL_APPROVED: &[u8] = b"contract-call-approved";
const PREFIX_CONTRACT_CALL_APPROVED_WITH_MINT: &[u8] = b"contract-call-approved-with-mint";

/// Length-prefixed concatenation so adjacent fields cannot be shifted into
/// each other.
fn encode_fields(fields: &[&[u8]]) -> Vec<u8> {
    let mut data = Vec::new();
    for field in fields {
        data.extend_from_slice(&(field.len() as u32).to_be_bytes());
        data.extend_from_slice(field);
    }
    data
}

pub fn contract_call_approval_key(
    command_id: &[u8],
    source_chain: &str,
    source_address: &str,
    contract_address: &str,
    payload_hash: &[u8],
) -> [u8; 32] {
    keccak256(&encode_fields(&[
        PREFIX_CONTRACT_CALL_APPROVED,
        command_id,
        source_chain.as_bytes(),
        source_address.as_bytes(),
        contract_address.as_bytes(),
        payload_hash,
    ]))
}

#[allow(clippy::too_many_arguments)]
pub fn contract_call_with_mint_approval_key(
    command_id: &[u8],
    source_chain: &str,
    source_address: &str,
    contract_address: &str,
    payload_hash: &[u8],
    symbol: &str,
    amount: u128,
) -> [u8; 32] {
    keccak256(&encode_fields(&[
        PREFIX_CONTRACT_CALL_APPROVED_WITH_MINT,
        command_id,
        source_chain.as_bytes(),
        source_address.as_bytes(),
        contract_address.as_bytes(),
        payload_hash,
        symbol.as_bytes(),
        &amount.to_be_bytes(),
    ]))
}
