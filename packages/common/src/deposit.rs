//! Deposit handler messages.
//!
//! The gateway instantiates a deposit handler at
//! `instantiate2_address(checksum(handler_code), gateway, salt)` the first time a
//! deposit address is swept, and invokes the existing instance on later cycles.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

/// What the handler does with the cw20 balance it holds
#[cw_serde]
pub enum SweepMode {
    /// Burn the balance (gateway-minted tokens)
    Burn,
    /// Transfer the balance to the owner (externally issued tokens)
    Release,
}

/// A single sweep of a deposit address.
///
/// Native coins held by the handler are always forwarded to the owner.
#[cw_serde]
pub struct SweepMsg {
    /// cw20 contract whose balance is swept
    pub token: String,
    pub mode: SweepMode,
}

/// Instantiating the handler performs its first sweep
#[cw_serde]
pub struct DepositHandlerInstantiateMsg {
    pub sweep: SweepMsg,
}

#[cw_serde]
pub enum DepositHandlerExecuteMsg {
    /// Authorization: owner (the instantiating gateway) only
    Sweep(SweepMsg),
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum DepositHandlerQueryMsg {
    #[returns(OwnerResponse)]
    Owner {},

    #[returns(LockedResponse)]
    Locked {},
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

#[cw_serde]
pub struct LockedResponse {
    pub locked: bool,
}
