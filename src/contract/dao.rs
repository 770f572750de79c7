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

use lazy_static::lazy_static;
use log::debug;
use num_bigint::BigUint;

use crate::{
    dao::Vote,
    eth::{
        abi::{encode_call, selector, AbiReader, Token},
        provider::TxRequest,
        Address, AsProvider, PendingTransaction, Signer,
    },
    Error, Result,
};

lazy_static! {
    static ref NUM_PROPOSALS: [u8; 4] = selector("numProposals()");
    static ref PROPOSALS: [u8; 4] = selector("proposals(uint256)");
    static ref CREATE_PROPOSAL: [u8; 4] = selector("createProposal(uint256)");
    static ref VOTE_ON_PROPOSAL: [u8; 4] = selector("voteOnProposal(uint256,uint8)");
    static ref EXECUTE_PROPOSAL: [u8; 4] = selector("executeProposal(uint256)");
}

/// Proposal fields exactly as the `proposals(uint256)` accessor returns them
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalInfo {
    pub nft_token_id: BigUint,
    /// Seconds since the Unix epoch
    pub deadline: u64,
    pub yay_votes: u64,
    pub nay_votes: u64,
    pub executed: bool,
}

impl ProposalInfo {
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut r = AbiReader::new(data);
        Ok(Self {
            nft_token_id: r.read_uint()?,
            deadline: r.read_u64()?,
            yay_votes: r.read_u64()?,
            nay_votes: r.read_u64()?,
            executed: r.read_bool()?,
        })
    }
}

fn decode_failed(method: &str, e: Error) -> Error {
    match e {
        Error::AbiDecodeError(msg) => Error::ContractCallFailed(format!("{method}: {msg}")),
        e => e,
    }
}

/// `ProfitUnityDAO` contract handle
pub struct DaoContract<H> {
    address: Address,
    handle: H,
}

impl<H: AsProvider> DaoContract<H> {
    pub fn new(address: Address, handle: H) -> Self {
        Self { address, handle }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Ether held by the DAO contract, in wei.
    pub async fn treasury_balance(&self) -> Result<BigUint> {
        self.handle.as_provider().get_balance(&self.address).await
    }

    pub async fn num_proposals(&self) -> Result<u64> {
        let data = encode_call(*NUM_PROPOSALS, &[])?;
        let rep = self.handle.as_provider().call(&self.address, &data).await?;
        AbiReader::new(&rep).read_u64().map_err(|e| decode_failed("numProposals", e))
    }

    pub async fn proposals(&self, id: u64) -> Result<ProposalInfo> {
        let data = encode_call(*PROPOSALS, &[Token::from(id)])?;
        let rep = self.handle.as_provider().call(&self.address, &data).await?;
        ProposalInfo::decode(&rep).map_err(|e| decode_failed("proposals", e))
    }
}

impl DaoContract<Signer> {
    async fn transact(&self, data: Vec<u8>) -> Result<PendingTransaction> {
        let tx = TxRequest { to: Some(self.address), data, value: None };
        self.handle.send_transaction(tx).await
    }

    pub async fn create_proposal(&self, nft_token_id: &BigUint) -> Result<PendingTransaction> {
        debug!(target: "contract::dao", "createProposal({})", nft_token_id);
        let data = encode_call(*CREATE_PROPOSAL, &[Token::Uint(nft_token_id.clone())])?;
        self.transact(data).await
    }

    pub async fn vote_on_proposal(&self, id: u64, vote: Vote) -> Result<PendingTransaction> {
        debug!(target: "contract::dao", "voteOnProposal({}, {})", id, vote);
        let data = encode_call(*VOTE_ON_PROPOSAL, &[Token::from(id), Token::from(vote.code() as u64)])?;
        self.transact(data).await
    }

    pub async fn execute_proposal(&self, id: u64) -> Result<PendingTransaction> {
        debug!(target: "contract::dao", "executeProposal({})", id);
        let data = encode_call(*EXECUTE_PROPOSAL, &[Token::from(id)])?;
        self.transact(data).await
    }
}
