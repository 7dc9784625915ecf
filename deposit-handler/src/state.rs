use cosmwasm_std::Addr;
use cw_storage_plus::Item;

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:gateway-deposit-handler";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The gateway that instantiated this handler
pub const OWNER: Item<Addr> = Item::new("owner");

/// Set while a sweep's outgoing messages are in flight
pub const LOCKED: Item<bool> = Item::new("locked");
