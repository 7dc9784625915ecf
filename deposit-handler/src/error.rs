use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only the owner can sweep")]
    Unauthorized,

    #[error("Deposit handler is locked")]
    Locked,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
