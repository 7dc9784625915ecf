//! Message types for the gateway contract
//!
//! Signed command batches travel as opaque JSON bytes (`Binary`) so operators
//! sign exactly the bytes the contract hashes.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, HexBinary, Uint128};

use crate::state::TokenKind;

// ============================================================================
// Operator Sets & Proofs
// ============================================================================

/// A weighted operator set. Operators are 20-byte EVM-style addresses in
/// strictly ascending byte order.
#[cw_serde]
pub struct OperatorSet {
    pub operators: Vec<HexBinary>,
    pub weights: Vec<Uint128>,
    pub threshold: Uint128,
}

/// Signatures over a batch by (a subset of) a registered operator set.
///
/// Signatures are 65-byte `r || s || v` and must be ordered by signer address.
#[cw_serde]
pub struct Proof {
    pub operators: Vec<HexBinary>,
    pub weights: Vec<Uint128>,
    pub threshold: Uint128,
    pub signatures: Vec<HexBinary>,
}

/// The signed payload of `ExecuteMsg::Execute`
#[cw_serde]
pub struct CommandBatch {
    pub chain_id: u64,
    /// 32-byte command ids
    pub command_ids: Vec<HexBinary>,
    /// Command names, e.g. `mintToken`
    pub commands: Vec<String>,
    /// JSON-encoded params per command
    pub params: Vec<Binary>,
}

// ============================================================================
// Command Params
// ============================================================================

#[cw_serde]
pub struct DeployTokenParams {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Supply cap of a gateway-issued token, zero for uncapped
    pub cap: Uint128,
    /// Existing cw20 to register instead of issuing a new one
    pub token_address: Option<String>,
    pub mint_limit: Uint128,
}

#[cw_serde]
pub struct MintTokenParams {
    pub symbol: String,
    pub account: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct BurnTokenParams {
    pub symbol: String,
    /// 32-byte salt identifying the deposit address
    pub salt: HexBinary,
}

#[cw_serde]
pub struct ApproveContractCallParams {
    pub source_chain: String,
    pub source_address: String,
    pub contract_address: String,
    pub payload_hash: HexBinary,
    pub source_tx_hash: HexBinary,
    pub source_event_index: u64,
}

#[cw_serde]
pub struct ApproveContractCallWithMintParams {
    pub source_chain: String,
    pub source_address: String,
    pub contract_address: String,
    pub payload_hash: HexBinary,
    pub symbol: String,
    pub amount: Uint128,
    pub source_tx_hash: HexBinary,
    pub source_event_index: u64,
}

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct InstantiateMsg {
    pub chain_id: u64,
    pub governance: String,
    pub mint_limiter: String,
    pub token_code_id: u64,
    pub deposit_handler_code_id: u64,
    /// Recent operator sets, oldest first. Each one starts a new epoch.
    pub operators: Vec<OperatorSet>,
}

/// Optional setup applied by the upgrade path
#[cw_serde]
pub struct SetupParams {
    pub governance: Option<String>,
    pub mint_limiter: Option<String>,
    pub operators: Option<Vec<OperatorSet>>,
}

#[cw_serde]
pub struct MigrateMsg {
    pub setup_params: Option<SetupParams>,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    /// Execute a signed command batch.
    ///
    /// Authorization: anyone; authenticity comes from the proof.
    Execute {
        /// JSON `CommandBatch`
        batch: Binary,
        /// JSON `Proof`
        proof: Binary,
    },

    /// Consume an approved contract call addressed to the caller.
    /// Response data is a JSON bool telling whether the call was approved.
    ValidateContractCall {
        command_id: HexBinary,
        source_chain: String,
        source_address: String,
        payload_hash: HexBinary,
    },

    /// Consume an approved contract call with mint, minting to the caller
    ValidateContractCallAndMint {
        command_id: HexBinary,
        source_chain: String,
        source_address: String,
        payload_hash: HexBinary,
        symbol: String,
        amount: Uint128,
    },

    /// Emit an outbound contract call
    CallContract {
        destination_chain: String,
        destination_contract_address: String,
        payload: Binary,
    },

    /// Outbound token transfers (cw20 send hook)
    Receive(cw20::Cw20ReceiveMsg),

    // ========================================================================
    // Governance
    // ========================================================================
    /// Authorization: governance
    TransferGovernance { governance: String },

    /// Authorization: mint limiter or governance
    TransferMintLimiter { mint_limiter: String },

    /// Authorization: mint limiter or governance
    SetTokenMintLimits {
        symbols: Vec<String>,
        limits: Vec<Uint128>,
    },

    /// Authorization: mint limiter or governance
    FreezeToken { symbol: String },

    /// Authorization: mint limiter or governance
    UnfreezeToken { symbol: String },

    /// Authorization: mint limiter or governance
    FreezeAllTokens {},

    /// Authorization: mint limiter or governance
    UnfreezeAllTokens {},

    /// Migrate the gateway to `new_code_id` after checking its checksum.
    ///
    /// Authorization: governance. The gateway must be its own contract admin.
    Upgrade {
        new_code_id: u64,
        new_code_hash: HexBinary,
        setup_params: Option<SetupParams>,
    },
}

/// Payload of the cw20 `Send` hook
#[cw_serde]
pub enum ReceiveMsg {
    SendToken {
        destination_chain: String,
        destination_address: String,
    },
    CallContractWithToken {
        destination_chain: String,
        destination_contract_address: String,
        payload: Binary,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(IsCommandExecutedResponse)]
    IsCommandExecuted { command_id: HexBinary },

    #[returns(TokenResponse)]
    Token { symbol: String },

    #[returns(TokensResponse)]
    Tokens {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(TokenAddressResponse)]
    TokenAddress { symbol: String },

    #[returns(AmountResponse)]
    TokenMintLimit { symbol: String },

    /// Amount minted in the current window
    #[returns(AmountResponse)]
    TokenMintAmount { symbol: String },

    /// Per-token flag combined with the global freeze
    #[returns(TokenFrozenResponse)]
    TokenFrozen { symbol: String },

    #[returns(AllTokensFrozenResponse)]
    AllTokensFrozen {},

    #[returns(DepositAddressResponse)]
    DepositAddress { salt: HexBinary },

    #[returns(IsApprovedResponse)]
    IsContractCallApproved {
        command_id: HexBinary,
        source_chain: String,
        source_address: String,
        contract_address: String,
        payload_hash: HexBinary,
    },

    #[returns(IsApprovedResponse)]
    IsContractCallAndMintApproved {
        command_id: HexBinary,
        source_chain: String,
        source_address: String,
        contract_address: String,
        payload_hash: HexBinary,
        symbol: String,
        amount: Uint128,
    },

    #[returns(EpochResponse)]
    CurrentEpoch {},

    #[returns(HashResponse)]
    HashForEpoch { epoch: u64 },

    #[returns(EpochResponse)]
    EpochForHash { hash: HexBinary },

    /// Errors when the proof does not validate
    #[returns(ValidateProofResponse)]
    ValidateProof {
        message_hash: HexBinary,
        proof: Proof,
    },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub chain_id: u64,
    pub governance: Addr,
    pub mint_limiter: Addr,
    pub token_code_id: u64,
    pub deposit_handler_code_id: u64,
    pub implementation_code_hash: HexBinary,
    pub all_tokens_frozen: bool,
}

#[cw_serde]
pub struct IsCommandExecutedResponse {
    pub executed: bool,
}

#[cw_serde]
pub struct TokenResponse {
    pub symbol: String,
    pub address: Addr,
    pub kind: TokenKind,
    pub mint_limit: Uint128,
    pub mint_amount: Uint128,
    pub frozen: bool,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<TokenResponse>,
}

#[cw_serde]
pub struct TokenAddressResponse {
    pub address: Option<Addr>,
}

#[cw_serde]
pub struct AmountResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct TokenFrozenResponse {
    pub frozen: bool,
}

#[cw_serde]
pub struct AllTokensFrozenResponse {
    pub frozen: bool,
}

#[cw_serde]
pub struct DepositAddressResponse {
    pub address: Addr,
}

#[cw_serde]
pub struct IsApprovedResponse {
    pub approved: bool,
}

#[cw_serde]
pub struct EpochResponse {
    pub epoch: u64,
}

#[cw_serde]
pub struct HashResponse {
    pub hash: Option<HexBinary>,
}

#[cw_serde]
pub struct ValidateProofResponse {
    pub is_current_epoch: bool,
}
