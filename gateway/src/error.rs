//! Error types for the gateway contract
//!
//! Errors fall into three classes. Batch-fatal errors abort a whole `Execute`
//! call, command-fatal errors are caught by the executor loop and reported as a
//! `command_failed` event, and call-fatal errors abort administrative calls.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Batch Errors
    // ========================================================================
    #[error("Malformed batch: {reason}")]
    MalformedBatch { reason: String },

    #[error("Invalid chain ID: expected {expected}, got {got}")]
    InvalidChainId { expected: u64, got: u64 },

    // ========================================================================
    // Operator Registry Errors
    // ========================================================================
    #[error("Invalid operators")]
    InvalidOperators,

    #[error("Invalid weights")]
    InvalidWeights,

    #[error("Invalid threshold")]
    InvalidThreshold,

    #[error("Operator set is already current")]
    SameOperators,

    #[error("Operator set was already registered for an earlier epoch")]
    DuplicateOperators,

    #[error("Malformed signers")]
    MalformedSigners,

    #[error("Low signatures weight")]
    LowSignaturesWeight,

    #[error("Invalid signature: {reason}")]
    InvalidSignature { reason: String },

    #[error("Batch is not signed by the current operators")]
    NotCurrentOperators,

    #[error("Operatorship was already transferred in this batch")]
    OperatorshipAlreadyTransferred,

    // ========================================================================
    // Command Errors
    // ========================================================================
    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },

    #[error("Invalid params for {command}: {reason}")]
    InvalidCommandParams { command: String, reason: String },

    // ========================================================================
    // Token Errors
    // ========================================================================
    #[error("Token already exists: {symbol}")]
    TokenAlreadyExists { symbol: String },

    #[error("Token does not exist: {symbol}")]
    TokenDoesNotExist { symbol: String },

    #[error("Token contract not registered: {address}")]
    TokenNotRegistered { address: String },

    #[error("Token contract does not exist: {address}")]
    TokenContractDoesNotExist { address: String },

    #[error("Invalid token metadata: {reason}")]
    InvalidTokenMetadata { reason: String },

    #[error("Token is frozen: {symbol}")]
    TokenIsFrozen { symbol: String },

    #[error("Exceeds mint limit for {symbol}: limit {limit}, requested {requested}")]
    ExceedMintLimit {
        symbol: String,
        limit: Uint128,
        requested: Uint128,
    },

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Invalid hash length: expected 32, got {got}")]
    InvalidHashLength { got: usize },

    #[error("Invalid salt: expected 32 bytes, got {got}")]
    InvalidSalt { got: usize },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    // ========================================================================
    // Role Errors
    // ========================================================================
    #[error("Unauthorized: only governance can perform this action")]
    NotGovernance,

    #[error("Unauthorized: only the mint limiter can perform this action")]
    NotMintLimiter,

    #[error("Invalid governance address")]
    InvalidGovernance,

    #[error("Invalid mint limiter address")]
    InvalidMintLimiter,

    #[error("Symbols and limits length mismatch")]
    InvalidSetMintLimitsParams,

    // ========================================================================
    // Upgrade Errors
    // ========================================================================
    #[error("Gateway is not its own contract admin")]
    NotProxy,

    #[error("Invalid code hash: expected {expected}, got {actual}")]
    InvalidCodeHash { expected: String, actual: String },

    #[error("Already initialized")]
    AlreadyInitialized,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
