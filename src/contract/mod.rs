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

//! Typed handles to the deployed contracts. Handles are plain values built
//! from an address and a provider or signer; they keep no state. Write
//! methods only exist on handles built from a [`Signer`](crate::eth::Signer).

use crate::eth::{Address, AsProvider};

/// `ProfitUnityDAO` handle
pub mod dao;
pub use dao::{DaoContract, ProposalInfo};

/// NFT collection handle
pub mod nft;
pub use nft::NftContract;

/// Builds contract handles for the configured contract addresses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractGateway {
    pub dao_address: Address,
    pub nft_address: Address,
}

impl ContractGateway {
    pub fn new(dao_address: Address, nft_address: Address) -> Self {
        Self { dao_address, nft_address }
    }

    pub fn dao<H: AsProvider>(&self, handle: H) -> DaoContract<H> {
        DaoContract::new(self.dao_address, handle)
    }

    pub fn nft<H: AsProvider>(&self, handle: H) -> NftContract<H> {
        NftContract::new(self.nft_address, handle)
    }
}
