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

use log::{debug, error};

use super::Proposal;
use crate::{contract::DaoContract, eth::AsProvider, Result};

/// Lazy sequence of proposal ids `0..count`. Can be rewound with
/// [`ProposalIds::restart`] to walk the same range again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalIds {
    next: u64,
    count: u64,
}

impl ProposalIds {
    pub fn new(count: u64) -> Self {
        Self { next: 0, count }
    }

    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for ProposalIds {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next >= self.count {
            return None
        }
        let id = self.next;
        self.next += 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.count - self.next.min(self.count)) as usize;
        (left, Some(left))
    }
}

/// Read a single proposal through the DAO's `proposals(uint256)` accessor.
pub async fn fetch_proposal_by_id<H: AsProvider>(dao: &DaoContract<H>, id: u64) -> Result<Proposal> {
    let info = dao.proposals(id).await?;
    Ok(Proposal::from_info(id, info))
}

/// Read proposals `0..num_proposals` one after the other. A proposal that
/// fails to load is logged and left out.
pub async fn fetch_all_proposals<H: AsProvider>(
    dao: &DaoContract<H>,
    num_proposals: u64,
) -> Vec<Proposal> {
    // The count is read from the contract unchecked, so nothing is reserved up front
    let mut proposals = vec![];

    for id in ProposalIds::new(num_proposals) {
        match fetch_proposal_by_id(dao, id).await {
            Ok(p) => proposals.push(p),
            Err(e) => error!(target: "dao::store", "Failed fetching proposal {}: {}", id, e),
        }
    }

    debug!(target: "dao::store", "Fetched {}/{} proposals", proposals.len(), num_proposals);
    proposals
}

/// Client-side cache of the proposals read on the last refresh
#[derive(Clone, Debug, Default)]
pub struct ProposalStore {
    proposals: Vec<Proposal>,
}

impl ProposalStore {
    /// Swap in a freshly fetched list. Whatever was there before is dropped.
    pub fn replace(&mut self, proposals: Vec<Proposal>) {
        self.proposals = proposals;
    }

    pub fn get(&self, id: u64) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == id)
    }

    pub fn all(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}
