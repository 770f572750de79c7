/* This file is part of ProfitUnity DAO
 *
 * Copyright (C) 2022-2026 ProfitUnity developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::{str::FromStr, time::Duration};

use log::{debug, info};
use num_bigint::BigUint;
use smol::Timer;

use super::{
    units::{parse_hex_data, parse_quantity, parse_quantity_u64, to_hex_data, to_quantity},
    Address,
};
use crate::{
    rpc::{
        client::RpcPtr,
        jsonrpc::JsonRequest,
        util::{json_as_str, json_field, json_map, json_str, JsonValue},
    },
    Error, Result,
};

/// Read-only access to chain state through the wallet endpoint
#[derive(Clone)]
pub struct Provider {
    rpc: RpcPtr,
}

impl Provider {
    pub fn new(rpc: RpcPtr) -> Self {
        Self { rpc }
    }

    pub fn rpc(&self) -> &RpcPtr {
        &self.rpc
    }

    /// `eth_chainId`
    pub async fn chain_id(&self) -> Result<u64> {
        let req = JsonRequest::new("eth_chainId", JsonValue::Array(vec![]));
        let rep = self.rpc.request(req).await?;
        parse_quantity_u64(json_as_str(&rep, "eth_chainId")?)
    }

    /// `eth_requestAccounts`, prompting the wallet for access if needed.
    pub async fn request_accounts(&self) -> Result<Vec<Address>> {
        let req = JsonRequest::new("eth_requestAccounts", JsonValue::Array(vec![]));
        let rep = self.rpc.request(req).await?;

        let Some(accounts) = rep.get::<Vec<JsonValue>>() else {
            return Err(Error::InvalidJsonRpcReply("eth_requestAccounts: expected an array".into()))
        };

        let mut ret = Vec::with_capacity(accounts.len());
        for account in accounts {
            ret.push(Address::from_str(json_as_str(account, "eth_requestAccounts")?)?);
        }

        Ok(ret)
    }

    /// `eth_getBalance` at the latest block, in wei.
    pub async fn get_balance(&self, address: &Address) -> Result<BigUint> {
        let params = JsonValue::Array(vec![json_str(&address.to_string()), json_str("latest")]);
        let req = JsonRequest::new("eth_getBalance", params);
        let rep = self.rpc.request(req).await?;
        parse_quantity(json_as_str(&rep, "eth_getBalance")?)
    }

    /// `eth_call` against the latest block. Node-side failures such as
    /// reverts surface as [`Error::ContractCallFailed`].
    pub async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>> {
        let call = json_map([("to", json_str(&to.to_string())), ("data", json_str(&to_hex_data(data)))]);
        let req = JsonRequest::new("eth_call", JsonValue::Array(vec![call, json_str("latest")]));

        let rep = match self.rpc.request(req).await {
            Ok(v) => v,
            Err(Error::JsonRpcError(_, msg)) => return Err(Error::ContractCallFailed(msg)),
            Err(e) => return Err(e),
        };

        parse_hex_data(json_as_str(&rep, "eth_call")?)
    }

    /// `eth_getTransactionReceipt`. `None` while the transaction is pending.
    pub async fn get_transaction_receipt(&self, tx_hash: &str) -> Result<Option<Receipt>> {
        let req = JsonRequest::new("eth_getTransactionReceipt", JsonValue::Array(vec![json_str(tx_hash)]));
        let rep = self.rpc.request(req).await?;

        if rep.is_null() {
            return Ok(None)
        }

        Ok(Some(Receipt::try_from(&rep)?))
    }
}

/// A mined transaction's receipt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: String,
    /// 1 on success, 0 when reverted
    pub status: u64,
    pub block_number: u64,
    /// Set for contract creation transactions
    pub contract_address: Option<Address>,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        self.status == 1
    }
}

impl TryFrom<&JsonValue> for Receipt {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self> {
        let field = |key: &'static str| match json_field(value, key) {
            Some(v) => json_as_str(v, key),
            None => Err(Error::InvalidJsonRpcReply(format!("Receipt is missing \"{key}\""))),
        };

        let transaction_hash = field("transactionHash")?.to_string();
        let block_number = parse_quantity_u64(field("blockNumber")?)?;

        // Pre-Byzantium receipts carry no status
        let status = match json_field(value, "status") {
            None | Some(JsonValue::Null) => 1,
            Some(v) => parse_quantity_u64(json_as_str(v, "status")?)?,
        };

        let contract_address = match json_field(value, "contractAddress") {
            None | Some(JsonValue::Null) => None,
            Some(v) => Some(Address::from_str(json_as_str(v, "contractAddress")?)?),
        };

        Ok(Self { transaction_hash, status, block_number, contract_address })
    }
}

/// How to wait for a submitted transaction to be mined
#[derive(Clone, Copy, Debug)]
pub struct ConfirmSettings {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ConfirmSettings {
    fn default() -> Self {
        Self { poll_interval: Duration::from_secs(2), timeout: Duration::from_secs(300) }
    }
}

/// A transaction to hand to the wallet for signing
#[derive(Clone, Debug, Default)]
pub struct TxRequest {
    /// `None` deploys a contract with `data` as its creation code
    pub to: Option<Address>,
    pub data: Vec<u8>,
    pub value: Option<BigUint>,
}

/// A provider bound to an unlocked wallet account, able to submit
/// transactions through `eth_sendTransaction`.
#[derive(Clone)]
pub struct Signer {
    provider: Provider,
    account: Address,
    confirm: ConfirmSettings,
}

impl Signer {
    pub fn new(provider: Provider, account: Address, confirm: ConfirmSettings) -> Self {
        Self { provider, account, confirm }
    }

    pub fn address(&self) -> Address {
        self.account
    }

    /// Submit a transaction from the bound account. Wallet rejections stay
    /// [`Error::UserRejected`], other node errors become
    /// [`Error::TransactionFailed`].
    pub async fn send_transaction(&self, tx: TxRequest) -> Result<PendingTransaction> {
        let mut params = vec![
            ("from", json_str(&self.account.to_string())),
            ("data", json_str(&to_hex_data(&tx.data))),
        ];
        if let Some(to) = tx.to {
            params.push(("to", json_str(&to.to_string())));
        }
        if let Some(value) = &tx.value {
            params.push(("value", json_str(&to_quantity(value))));
        }

        let params = JsonValue::Object(params.into_iter().map(|(k, v)| (k.to_string(), v)).collect());
        let req = JsonRequest::new("eth_sendTransaction", JsonValue::Array(vec![params]));

        let rep = match self.provider.rpc.request(req).await {
            Ok(v) => v,
            Err(Error::JsonRpcError(_, msg)) => return Err(Error::TransactionFailed(msg)),
            Err(e) => return Err(e),
        };

        let hash = json_as_str(&rep, "eth_sendTransaction")?.to_string();
        info!(target: "eth::provider", "Submitted transaction {}", hash);

        Ok(PendingTransaction { provider: self.provider.clone(), hash, confirm: self.confirm })
    }
}

/// A submitted transaction that has not been confirmed yet
pub struct PendingTransaction {
    provider: Provider,
    hash: String,
    confirm: ConfirmSettings,
}

impl PendingTransaction {
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Poll for the receipt until it shows up or the timeout elapses.
    pub async fn wait(self) -> Result<Receipt> {
        let started = std::time::Instant::now();

        loop {
            if let Some(receipt) = self.provider.get_transaction_receipt(&self.hash).await? {
                if !receipt.succeeded() {
                    return Err(Error::TransactionFailed(format!("Transaction {} reverted", self.hash)))
                }

                debug!(
                    target: "eth::provider",
                    "Transaction {} mined in block {}", self.hash, receipt.block_number,
                );
                return Ok(receipt)
            }

            if started.elapsed() >= self.confirm.timeout {
                return Err(Error::TransactionTimeout(self.hash))
            }

            Timer::after(self.confirm.poll_interval).await;
        }
    }
}

/// Anything that can serve reads
pub trait AsProvider {
    fn as_provider(&self) -> &Provider;
}

impl AsProvider for Provider {
    fn as_provider(&self) -> &Provider {
        self
    }
}

impl AsProvider for Signer {
    fn as_provider(&self) -> &Provider {
        &self.provider
    }
}

/// What the wallet session hands out: a read-only provider, or a signer
/// when the caller needs to write.
#[derive(Clone)]
pub enum ProviderOrSigner {
    Provider(Provider),
    Signer(Signer),
}

impl ProviderOrSigner {
    pub fn into_signer(self) -> Option<Signer> {
        match self {
            Self::Signer(s) => Some(s),
            Self::Provider(_) => None,
        }
    }
}

impl AsProvider for ProviderOrSigner {
    fn as_provider(&self) -> &Provider {
        match self {
            Self::Provider(p) => p,
            Self::Signer(s) => s.as_provider(),
        }
    }
}
