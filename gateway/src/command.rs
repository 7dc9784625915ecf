//! Decoding of batch commands into a closed set of operations.

use cosmwasm_std::{from_json, Binary};
use serde::de::DeserializeOwned;

use crate::error::ContractError;
use crate::msg::{
    ApproveContractCallParams, ApproveContractCallWithMintParams, BurnTokenParams,
    DeployTokenParams, MintTokenParams, OperatorSet,
};

pub const DEPLOY_TOKEN: &str = "deployToken";
pub const MINT_TOKEN: &str = "mintToken";
pub const BURN_TOKEN: &str = "burnToken";
pub const APPROVE_CONTRACT_CALL: &str = "approveContractCall";
pub const APPROVE_CONTRACT_CALL_WITH_MINT: &str = "approveContractCallWithMint";
pub const TRANSFER_OPERATORSHIP: &str = "transferOperatorship";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    DeployToken(DeployTokenParams),
    MintToken(MintTokenParams),
    BurnToken(BurnTokenParams),
    ApproveContractCall(ApproveContractCallParams),
    ApproveContractCallWithMint(ApproveContractCallWithMintParams),
    TransferOperatorship(OperatorSet),
}

fn decode_params<T: DeserializeOwned>(name: &str, params: &Binary) -> Result<T, ContractError> {
    from_json(params).map_err(|e| ContractError::InvalidCommandParams {
        command: name.to_string(),
        reason: e.to_string(),
    })
}

impl Command {
    /// Decode a named command. Unknown names and undecodable params fail only
    /// the command they belong to.
    pub fn decode(name: &str, params: &Binary) -> Result<Self, ContractError> {
        let command = match name {
            DEPLOY_TOKEN => Command::DeployToken(decode_params(name, params)?),
            MINT_TOKEN => Command::MintToken(decode_params(name, params)?),
            BURN_TOKEN => Command::BurnToken(decode_params(name, params)?),
            APPROVE_CONTRACT_CALL => Command::ApproveContractCall(decode_params(name, params)?),
            APPROVE_CONTRACT_CALL_WITH_MINT => {
                Command::ApproveContractCallWithMint(decode_params(name, params)?)
            }
            TRANSFER_OPERATORSHIP => Command::TransferOperatorship(decode_params(name, params)?),
            _ => {
                return Err(ContractError::UnknownCommand {
                    command: name.to_string(),
                })
            }
        };
        Ok(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::DeployToken(_) => DEPLOY_TOKEN,
            Command::MintToken(_) => MINT_TOKEN,
            Command::BurnToken(_) => BURN_TOKEN,
            Command::ApproveContractCall(_) => APPROVE_CONTRACT_CALL,
            Command::ApproveContractCallWithMint(_) => APPROVE_CONTRACT_CALL_WITH_MINT,
            Command::TransferOperatorship(_) => TRANSFER_OPERATORSHIP,
        }
    }
}
