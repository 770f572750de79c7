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

//! In-memory chain answering the wallet JSON-RPC methods the client uses,
//! with just enough DAO and NFT contract behaviour to drive the flows.
#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    str::FromStr,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use num_bigint::BigUint;
use num_traits::Zero;

use profitunity::{
    contract::{ContractGateway, ProposalInfo},
    eth::{
        abi::{encode, keccak256, selector, AbiReader, Token},
        provider::ConfirmSettings,
        units::{parse_hex_data, parse_quantity, to_hex_data, to_quantity},
        Address,
    },
    rpc::{
        client::{EthRpc, RpcPtr},
        jsonrpc::{ErrorCode, JsonError, JsonRequest, JsonResponse},
        util::{json_field, json_map, json_str, JsonValue},
    },
    session::{Network, WalletSession},
    ui::ViewController,
    util::time::Timestamp,
};

pub const CHAIN_ID: u64 = 4;

pub fn addr(s: &str) -> Address {
    Address::from_str(s).unwrap()
}

pub fn account() -> Address {
    addr("0x1000000000000000000000000000000000000001")
}

pub fn dao_address() -> Address {
    addr("0xda00000000000000000000000000000000000da0")
}

pub fn nft_address() -> Address {
    addr("0x0ff0000000000000000000000000000000000ff0")
}

pub fn ether(n: u64) -> BigUint {
    BigUint::from(n) * BigUint::from(10u64.pow(18))
}

/// Chain state behind the lock
#[derive(Default)]
pub struct ChainState {
    pub chain_id: u64,
    pub accounts: Vec<Address>,
    /// Answer every wallet prompt with EIP-1193 code 4001
    pub reject: bool,
    pub balances: HashMap<Address, BigUint>,
    pub nft_balances: HashMap<Address, u64>,
    pub proposals: Vec<ProposalInfo>,
    /// Proposal ids whose accessor reverts
    pub broken_proposals: HashSet<u64>,
    /// Revert the next transaction on-chain
    pub revert_next: bool,
    /// Number of receipt polls answered with `null` before a receipt shows
    pub pending_polls: usize,
    /// Never mine anything
    pub stalled: bool,
    pub receipts: HashMap<String, (usize, JsonValue)>,
    pub tx_count: u64,
    /// Calls per JSON-RPC method, and per contract function for `eth_call`
    pub calls: HashMap<String, usize>,
    pub deployed: Vec<Address>,
}

pub struct FakeChain {
    pub state: Mutex<ChainState>,
}

impl FakeChain {
    /// A chain on the expected network with one funded NFT holder.
    pub fn new() -> Arc<Self> {
        let mut state = ChainState {
            chain_id: CHAIN_ID,
            accounts: vec![account()],
            ..Default::default()
        };
        state.balances.insert(account(), ether(10));
        state.balances.insert(dao_address(), ether(1));
        state.nft_balances.insert(account(), 1);

        Arc::new(Self { state: Mutex::new(state) })
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut ChainState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn calls(&self, key: &str) -> usize {
        self.with(|s| s.calls.get(key).copied().unwrap_or(0))
    }

    pub fn reset_calls(&self) {
        self.with(|s| s.calls.clear())
    }

    /// Add a proposal straight into contract storage.
    pub fn add_proposal(&self, token_id: u64, deadline: u64, yay: u64, nay: u64, executed: bool) {
        self.with(|s| {
            s.proposals.push(ProposalInfo {
                nft_token_id: BigUint::from(token_id),
                deadline,
                yay_votes: yay,
                nay_votes: nay,
                executed,
            })
        })
    }

    pub fn rpc(self: &Arc<Self>) -> RpcPtr {
        self.clone()
    }

    /// Answer a request the way a node with unlocked accounts would.
    pub fn handle_request(&self, req: &JsonRequest) -> JsonValue {
        let mut s = self.state.lock().unwrap();
        *s.calls.entry(req.method.clone()).or_default() += 1;

        let params = match req.params.get::<Vec<JsonValue>>() {
            Some(p) => p.clone(),
            None => vec![],
        };

        let res = match req.method.as_str() {
            "eth_chainId" => Ok(json_str(&to_quantity(&BigUint::from(s.chain_id)))),
            "eth_requestAccounts" if s.reject => Err(rejected()),
            "eth_requestAccounts" => Ok(JsonValue::Array(
                s.accounts.iter().map(|a| json_str(&a.to_string())).collect(),
            )),
            "eth_getBalance" => {
                let who = addr(params[0].get::<String>().unwrap());
                let bal = s.balances.get(&who).cloned().unwrap_or_default();
                Ok(json_str(&to_quantity(&bal)))
            }
            "eth_call" => s.eth_call(&params[0]),
            "eth_sendTransaction" if s.reject => Err(rejected()),
            "eth_sendTransaction" => s.send_transaction(&params[0]),
            "eth_getTransactionReceipt" => {
                let hash = params[0].get::<String>().unwrap().clone();
                let pending_polls = s.pending_polls;
                match s.receipts.get_mut(&hash) {
                    Some((polls, receipt)) if *polls >= pending_polls => Ok(receipt.clone()),
                    Some((polls, _)) => {
                        *polls += 1;
                        Ok(JsonValue::Null)
                    }
                    None => Ok(JsonValue::Null),
                }
            }
            _ => Err((ErrorCode::MethodNotFound, None)),
        };

        match res {
            Ok(v) => (&JsonResponse::new(v, req.id)).into(),
            Err((code, msg)) => (&JsonError::new(code, msg, req.id)).into(),
        }
    }
}

type Reply = std::result::Result<JsonValue, (ErrorCode, Option<String>)>;

fn rejected() -> (ErrorCode, Option<String>) {
    (ErrorCode::UserRejectedRequest, Some("User rejected the request.".to_string()))
}

fn revert(msg: &str) -> (ErrorCode, Option<String>) {
    (ErrorCode::ServerError(-32000), Some(msg.to_string()))
}

impl ChainState {
    fn count(&mut self, key: &str) {
        *self.calls.entry(key.to_string()).or_default() += 1;
    }

    fn eth_call(&mut self, call: &JsonValue) -> Reply {
        let to = addr(json_field(call, "to").unwrap().get::<String>().unwrap());
        let data = parse_hex_data(json_field(call, "data").unwrap().get::<String>().unwrap()).unwrap();
        let (sel, args) = data.split_at(4);
        let mut r = AbiReader::new(args);

        let out = if to == nft_address() && sel == selector("balanceOf(address)") {
            self.count("balanceOf");
            let owner = r.read_address().unwrap();
            encode(&[Token::from(self.nft_balances.get(&owner).copied().unwrap_or(0))])
        } else if to == dao_address() && sel == selector("numProposals()") {
            self.count("numProposals");
            encode(&[Token::from(self.proposals.len() as u64)])
        } else if to == dao_address() && sel == selector("proposals(uint256)") {
            self.count("proposals");
            let id = r.read_u64().unwrap();
            if self.broken_proposals.contains(&id) {
                return Err(revert("execution reverted"))
            }
            // Out of range reads return the zeroed struct, like a Solidity mapping
            let p = self.proposals.get(id as usize).cloned().unwrap_or(ProposalInfo {
                nft_token_id: BigUint::zero(),
                deadline: 0,
                yay_votes: 0,
                nay_votes: 0,
                executed: false,
            });
            encode(&[
                Token::Uint(p.nft_token_id),
                Token::from(p.deadline),
                Token::from(p.yay_votes),
                Token::from(p.nay_votes),
                Token::Bool(p.executed),
            ])
        } else {
            return Err(revert("execution reverted"))
        };

        Ok(json_str(&to_hex_data(&out.unwrap())))
    }

    fn send_transaction(&mut self, tx: &JsonValue) -> Reply {
        let from = addr(json_field(tx, "from").unwrap().get::<String>().unwrap());
        let to = json_field(tx, "to").map(|v| addr(v.get::<String>().unwrap()));
        let data = parse_hex_data(json_field(tx, "data").unwrap().get::<String>().unwrap()).unwrap();
        let value = match json_field(tx, "value") {
            Some(v) => parse_quantity(v.get::<String>().unwrap()).unwrap(),
            None => BigUint::zero(),
        };

        if !self.accounts.contains(&from) {
            return Err((ErrorCode::Unauthorized, None))
        }

        let balance = self.balances.get(&from).cloned().unwrap_or_default();
        if balance < value {
            return Err(revert("insufficient funds for gas * price + value"))
        }

        self.tx_count += 1;
        let hash = to_hex_data(&keccak256(&self.tx_count.to_be_bytes()));

        // Sits in the mempool: no receipt and no state change
        if self.stalled {
            return Ok(json_str(&hash))
        }

        let mut status = !std::mem::take(&mut self.revert_next);
        let mut contract_address = JsonValue::Null;

        if status {
            match to {
                None => {
                    let hash = keccak256(&data);
                    let mut bytes = [0u8; 20];
                    bytes.copy_from_slice(&hash[12..]);
                    bytes[0] = self.deployed.len() as u8;
                    let created = Address(bytes);
                    self.deployed.push(created);
                    *self.balances.entry(created).or_default() += &value;
                    contract_address = json_str(&created.to_string());
                }
                Some(to) if to == dao_address() => status = self.dao_transact(&from, &data),
                Some(_) => {}
            }
        }

        if status {
            *self.balances.get_mut(&from).unwrap() -= &value;
        }

        let receipt = json_map([
            ("transactionHash", json_str(&hash)),
            ("status", json_str(if status { "0x1" } else { "0x0" })),
            ("blockNumber", json_str(&to_quantity(&BigUint::from(self.tx_count)))),
            ("contractAddress", contract_address),
        ]);

        self.receipts.insert(hash.clone(), (0, receipt));

        Ok(json_str(&hash))
    }

    /// Apply a DAO write. Returns whether it succeeded.
    fn dao_transact(&mut self, from: &Address, data: &[u8]) -> bool {
        let (sel, args) = data.split_at(4);
        let mut r = AbiReader::new(args);
        let holder = self.nft_balances.get(from).copied().unwrap_or(0) > 0;
        let now = Timestamp::current_time().inner();

        if sel == selector("createProposal(uint256)") {
            if !holder {
                return false
            }
            let token_id = r.read_uint().unwrap();
            self.proposals.push(ProposalInfo {
                nft_token_id: token_id,
                deadline: now + 300,
                yay_votes: 0,
                nay_votes: 0,
                executed: false,
            });
            return true
        }

        if sel == selector("voteOnProposal(uint256,uint8)") {
            let id = r.read_u64().unwrap() as usize;
            let vote = r.read_u64().unwrap();
            let Some(p) = self.proposals.get_mut(id) else { return false };
            if !holder || p.deadline <= now || p.executed {
                return false
            }
            match vote {
                0 => p.yay_votes += 1,
                1 => p.nay_votes += 1,
                _ => return false,
            }
            return true
        }

        if sel == selector("executeProposal(uint256)") {
            let id = r.read_u64().unwrap() as usize;
            let Some(p) = self.proposals.get_mut(id) else { return false };
            if !holder || p.deadline > now || p.executed {
                return false
            }
            p.executed = true;
            return true
        }

        false
    }
}

#[async_trait]
impl EthRpc for FakeChain {
    fn endpoint(&self) -> String {
        "fake://chain".to_string()
    }

    async fn send(&self, req: &JsonRequest) -> profitunity::Result<JsonValue> {
        Ok(self.handle_request(req))
    }
}

pub fn fast_confirm() -> ConfirmSettings {
    ConfirmSettings { poll_interval: Duration::from_millis(1), timeout: Duration::from_millis(200) }
}

pub fn session(chain: &Arc<FakeChain>) -> WalletSession {
    WalletSession::new(chain.rpc(), Network::default(), fast_confirm())
}

pub fn controller(chain: &Arc<FakeChain>) -> ViewController {
    ViewController::new(session(chain), ContractGateway::new(dao_address(), nft_address()))
}
