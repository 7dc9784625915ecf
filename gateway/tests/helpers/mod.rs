//! Shared setup for the gateway integration tests.
//!
//! The app runs on a bech32 mock API with a predictable address generator, so
//! `Instantiate2` addresses match what the gateway derives itself.

#![allow(dead_code)]

use cosmwasm_std::{
    coins, to_json_binary, Addr, Binary, CosmosMsg, Empty, Event, HexBinary, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};
use cw_multi_test::{MockAddressGenerator, MockApiBech32};
use cw_multi_test::{
    no_init, App, AppBuilder, AppResponse, BankKeeper, Contract, ContractWrapper, Executor,
    WasmKeeper,
};
use k256::ecdsa::{RecoveryId, SigningKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::de::DeserializeOwned;
use serde::Serialize;

use gateway::command;
use gateway::hash::{keccak256, prefixed_message_hash};
use gateway::msg::{
    CommandBatch, DeployTokenParams, ExecuteMsg, InstantiateMsg, MintTokenParams, OperatorSet,
    Proof, QueryMsg, TokenAddressResponse,
};

pub type GatewayApp = App<BankKeeper, MockApiBech32>;

pub const CHAIN_ID: u64 = 1;
pub const NATIVE_DENOM: &str = "uatom";

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_gateway() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        gateway::contract::execute,
        gateway::contract::instantiate,
        gateway::contract::query,
    )
    .with_reply(gateway::contract::reply)
    .with_migrate(gateway::contract::migrate);
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

pub fn contract_deposit_handler() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        deposit_handler::contract::execute,
        deposit_handler::contract::instantiate,
        deposit_handler::contract::query,
    )
    .with_reply(deposit_handler::contract::reply);
    Box::new(contract)
}

// ============================================================================
// Operators & Signing
// ============================================================================

pub struct Operators {
    pub keys: Vec<SigningKey>,
    pub set: OperatorSet,
}

fn eth_address(key: &SigningKey) -> [u8; 20] {
    let point = k256::PublicKey::from(key.verifying_key()).to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Operators with one key per seed and unit weights, sorted by address
pub fn operators(seeds: &[u8], threshold: u128) -> Operators {
    let mut keyed: Vec<([u8; 20], SigningKey)> = seeds
        .iter()
        .map(|seed| {
            let key = SigningKey::from_slice(&[*seed; 32]).unwrap();
            (eth_address(&key), key)
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

/// 65-byte low-s signature with a 27/28 recovery byte
pub fn sign(key: &SigningKey, message_hash: &[u8; 32]) -> HexBinary {
    let (signature, recid) = key.sign_prehash_recoverable(message_hash).unwrap();
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
}

impl Operators {
    /// Proof with every key signing `batch`
    pub fn proof(&self, batch: &Binary) -> Binary {
        let hash = prefixed_message_hash(batch.as_slice());
        to_json_binary(&Proof {
            operators: self.set.operators.clone(),
            weights: self.set.weights.clone(),
            threshold: self.set.threshold,
            signatures: self.keys.iter().map(|key| sign(key, &hash)).collect(),
        })
        .unwrap()
    }

    /// Proof signed only by the keys derived from `seeds`
    pub fn proof_from(&self, batch: &Binary, seeds: &[u8]) -> Binary {
        let hash = prefixed_message_hash(batch.as_slice());
        let signers: Vec<[u8; 20]> = seeds
            .iter()
            .map(|seed| eth_address(&SigningKey::from_slice(&[*seed; 32]).unwrap()))
            .collect();
        to_json_binary(&Proof {
            operators: self.set.operators.clone(),
            weights: self.set.weights.clone(),
            threshold: self.set.threshold,
            signatures: self
                .keys
                .iter()
                .filter(|key| signers.contains(&eth_address(key)))
                .map(|key| sign(key, &hash))
                .collect(),
        })
        .unwrap()
    }
}

// ============================================================================
// Batches
// ============================================================================

pub struct BatchBuilder {
    batch: CommandBatch,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::for_chain(CHAIN_ID)
    }

    pub fn for_chain(chain_id: u64) -> Self {
        Self {
            batch: CommandBatch {
                chain_id,
                command_ids: vec![],
                commands: vec![],
                params: vec![],
            },
        }
    }

    pub fn command<T: Serialize>(mut self, id: &HexBinary, name: &str, params: &T) -> Self {
        self.batch.command_ids.push(id.clone());
        self.batch.commands.push(name.to_string());
        self.batch.params.push(to_json_binary(params).unwrap());
        self
    }

    pub fn build(&self) -> Binary {
        to_json_binary(&self.batch).unwrap()
    }
}

pub fn command_id(n: u64) -> HexBinary {
    HexBinary::from(keccak256(format!("command-{n}").as_bytes()).to_vec())
}

// ============================================================================
// Events
// ============================================================================

/// Custom contract events carry a `wasm-` prefix in the app response
pub fn events_of<'a>(res: &'a AppResponse, ty: &str) -> Vec<&'a Event> {
    let ty = format!("wasm-{ty}");
    res.events.iter().filter(|e| e.ty == ty).collect()
}

pub fn attr<'a>(event: &'a Event, key: &str) -> &'a str {
    event
        .attributes
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.value.as_str())
        .unwrap_or_else(|| panic!("attribute {key} missing from {}", event.ty))
}

// ============================================================================
// Test Environment
// ============================================================================

pub struct TestEnv {
    pub app: GatewayApp,
    pub gateway: Addr,
    pub gateway_code_id: u64,
    pub token_code_id: u64,
    pub handler_code_id: u64,
    pub governance: Addr,
    pub mint_limiter: Addr,
    pub relayer: Addr,
    pub user: Addr,
    pub operators: Operators,
    next_command: u64,
}

pub fn setup() -> TestEnv {
    let mut app: GatewayApp = AppBuilder::default()
        .with_api(MockApiBech32::new("wasm"))
        .with_wasm(WasmKeeper::default().with_address_generator(MockAddressGenerator))
        .build(no_init);

    let governance = app.api().addr_make("governance");
    let mint_limiter = app.api().addr_make("mint_limiter");
    let relayer = app.api().addr_make("relayer");
    let user = app.api().addr_make("user");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &user, coins(1_000_000, NATIVE_DENOM))
            .unwrap();
    });

    let gateway_code_id = app.store_code(contract_gateway());
    let token_code_id = app.store_code(contract_cw20());
    let handler_code_id = app.store_code(contract_deposit_handler());

    let ops = operators(&[1, 2, 3], 2);

    let gateway = app
        .instantiate_contract(
            gateway_code_id,
            governance.clone(),
            &InstantiateMsg {
                chain_id: CHAIN_ID,
                governance: governance.to_string(),
                mint_limiter: mint_limiter.to_string(),
                token_code_id,
                deposit_handler_code_id: handler_code_id,
                operators: vec![ops.set.clone()],
            },
            &[],
            "gateway",
            Some(governance.to_string()),
        )
        .unwrap();

    // The gateway upgrades itself, so it has to be its own admin
    app.execute(
        governance.clone(),
        CosmosMsg::Wasm(WasmMsg::UpdateAdmin {
            contract_addr: gateway.to_string(),
            admin: gateway.to_string(),
        }),
    )
    .unwrap();

    TestEnv {
        app,
        gateway,
        gateway_code_id,
        token_code_id,
        handler_code_id,
        governance,
        mint_limiter,
        relayer,
        user,
        operators: ops,
        next_command: 0,
    }
}

impl TestEnv {
    pub fn next_command_id(&mut self) -> HexBinary {
        self.next_command += 1;
        command_id(self.next_command)
    }

    pub fn addr(&self, name: &str) -> Addr {
        self.app.api().addr_make(name)
    }

    /// Relay `batch` signed by the current operators
    pub fn execute_batch(&mut self, batch: BatchBuilder) -> anyhow::Result<AppResponse> {
        let batch = batch.build();
        let proof = self.operators.proof(&batch);
        self.relay(batch, proof)
    }

    pub fn relay(&mut self, batch: Binary, proof: Binary) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.relayer.clone(),
            self.gateway.clone(),
            &ExecuteMsg::Execute { batch, proof },
            &[],
        )
    }

    pub fn query<T: DeserializeOwned>(&self, msg: &QueryMsg) -> T {
        self.app
            .wrap()
            .query_wasm_smart(self.gateway.to_string(), msg)
            .unwrap()
    }

    pub fn token_address(&self, symbol: &str) -> Option<Addr> {
        let res: TokenAddressResponse = self.query(&QueryMsg::TokenAddress {
            symbol: symbol.to_string(),
        });
        res.address
    }

    /// Issue a gateway token through a signed `deployToken`
    pub fn deploy_internal(&mut self, symbol: &str, cap: u128, mint_limit: u128) -> Addr {
        let id = self.next_command_id();
        let res = self
            .execute_batch(BatchBuilder::new().command(
                &id,
                command::DEPLOY_TOKEN,
                &DeployTokenParams {
                    name: format!("Wrapped {symbol}"),
                    symbol: symbol.to_string(),
                    decimals: 6,
                    cap: Uint128::new(cap),
                    token_address: None,
                    mint_limit: Uint128::new(mint_limit),
                },
            ))
            .unwrap();
        assert_eq!(events_of(&res, "command_executed").len(), 1);
        self.token_address(symbol).unwrap()
    }

    /// Instantiate a cw20 holding `custody` in the gateway and register it
    pub fn deploy_external(&mut self, symbol: &str, custody: u128, mint_limit: u128) -> Addr {
        let token = self
            .app
            .instantiate_contract(
                self.token_code_id,
                self.governance.clone(),
                &cw20_base::msg::InstantiateMsg {
                    name: format!("External {symbol}"),
                    symbol: symbol.to_string(),
                    decimals: 6,
                    initial_balances: vec![Cw20Coin {
                        address: self.gateway.to_string(),
                        amount: Uint128::new(custody),
                    }],
                    mint: None,
                    marketing: None,
                },
                &[],
                "external-token",
                None,
            )
            .unwrap();

        let id = self.next_command_id();
        self.execute_batch(BatchBuilder::new().command(
            &id,
            command::DEPLOY_TOKEN,
            &DeployTokenParams {
                name: format!("External {symbol}"),
                symbol: symbol.to_string(),
                decimals: 6,
                cap: Uint128::zero(),
                token_address: Some(token.to_string()),
                mint_limit: Uint128::new(mint_limit),
            },
        ))
        .unwrap();

        token
    }

    pub fn mint(&mut self, symbol: &str, account: &Addr, amount: u128) -> AppResponse {
        let id = self.next_command_id();
        self.execute_batch(BatchBuilder::new().command(
            &id,
            command::MINT_TOKEN,
            &MintTokenParams {
                symbol: symbol.to_string(),
                account: account.to_string(),
                amount: Uint128::new(amount),
            },
        ))
        .unwrap()
    }

    pub fn cw20_balance(&self, token: &Addr, account: &Addr) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token.to_string(),
                &Cw20QueryMsg::Balance {
                    address: account.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    pub fn cw20_supply(&self, token: &Addr) -> Uint128 {
        let res: TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(token.to_string(), &Cw20QueryMsg::TokenInfo {})
            .unwrap();
        res.total_supply
    }

    pub fn cw20_transfer(&mut self, token: &Addr, from: &Addr, to: &Addr, amount: u128) {
        self.app
            .execute_contract(
                from.clone(),
                token.clone(),
                &Cw20ExecuteMsg::Transfer {
                    recipient: to.to_string(),
                    amount: Uint128::new(amount),
                },
                &[],
            )
            .unwrap();
    }

    pub fn native_balance(&self, account: &Addr) -> Uint128 {
        self.app
            .wrap()
            .query_balance(account.to_string(), NATIVE_DENOM)
            .unwrap()
            .amount
    }
}
