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

use std::{fmt, str::FromStr};

use num_bigint::BigUint;

use crate::{contract::ProposalInfo, util::time::Timestamp, Error, Result};

/// A vote on a proposal, with the on-chain `uint8` codes the DAO expects
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Vote {
    Yay,
    Nay,
}

impl Vote {
    pub fn code(&self) -> u8 {
        match self {
            Self::Yay => 0,
            Self::Nay => 1,
        }
    }
}

impl FromStr for Vote {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "YAY" => Ok(Self::Yay),
            "NAY" => Ok(Self::Nay),
            _ => Err(Error::InvalidVote(s.to_string())),
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Yay => write!(f, "YAY"),
            Self::Nay => write!(f, "NAY"),
        }
    }
}

/// What a user may do with a proposal right now
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProposalAction {
    /// Voting is open
    Vote,
    /// The deadline passed; executing it would apply the given outcome
    Execute(Vote),
    /// Nothing left to do
    Executed,
}

impl ProposalAction {
    pub fn label(&self) -> String {
        match self {
            Self::Vote => "Vote YAY | Vote NAY".to_string(),
            Self::Execute(outcome) => format!("Execute Proposal ({outcome})"),
            Self::Executed => "Proposal Executed".to_string(),
        }
    }
}

/// A DAO proposal as last read from chain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub id: u64,
    pub nft_token_id: BigUint,
    pub deadline: Timestamp,
    pub yay_votes: u64,
    pub nay_votes: u64,
    pub executed: bool,
}

impl Proposal {
    pub fn from_info(id: u64, info: ProposalInfo) -> Self {
        Self {
            id,
            nft_token_id: info.nft_token_id,
            deadline: Timestamp(info.deadline),
            yay_votes: info.yay_votes,
            nay_votes: info.nay_votes,
            executed: info.executed,
        }
    }

    /// Outcome an execution would apply. Ties go to NAY.
    pub fn outcome(&self) -> Vote {
        if self.yay_votes > self.nay_votes {
            Vote::Yay
        } else {
            Vote::Nay
        }
    }

    /// The action offered at time `now`.
    pub fn action(&self, now: Timestamp) -> ProposalAction {
        if self.executed {
            return ProposalAction::Executed
        }

        if now < self.deadline {
            return ProposalAction::Vote
        }

        ProposalAction::Execute(self.outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(deadline: u64, yay: u64, nay: u64, executed: bool) -> Proposal {
        Proposal {
            id: 0,
            nft_token_id: BigUint::from(1u8),
            deadline: Timestamp(deadline),
            yay_votes: yay,
            nay_votes: nay,
            executed,
        }
    }

    #[test]
    fn vote_codes() {
        assert_eq!(Vote::from_str("YAY").unwrap().code(), 0);
        assert_eq!(Vote::from_str("NAY").unwrap().code(), 1);
        assert_eq!(Vote::from_str("yay").unwrap(), Vote::Yay);
        assert_eq!(Vote::from_str("Nay").unwrap(), Vote::Nay);

        for bad in ["", "YES", "NO", "ABSTAIN", "0", "1", " YAY", "YAYY"] {
            assert!(matches!(Vote::from_str(bad), Err(Error::InvalidVote(_))), "{bad}");
        }
    }

    #[test]
    fn execute_label_after_deadline() {
        let now = Timestamp(2_000);
        assert_eq!(proposal(1_000, 3, 5, false).action(now).label(), "Execute Proposal (NAY)");
        assert_eq!(proposal(1_000, 5, 3, false).action(now).label(), "Execute Proposal (YAY)");
        assert_eq!(proposal(1_000, 4, 4, false).action(now).label(), "Execute Proposal (NAY)");
        assert_eq!(proposal(2_000, 0, 0, false).action(now), ProposalAction::Execute(Vote::Nay));
    }

    #[test]
    fn voting_open_before_deadline() {
        assert_eq!(proposal(2_001, 9, 0, false).action(Timestamp(2_000)), ProposalAction::Vote);
    }

    #[test]
    fn executed_offers_nothing() {
        for deadline in [0, 2_000, u64::MAX] {
            let p = proposal(deadline, 5, 3, true);
            assert_eq!(p.action(Timestamp(2_000)), ProposalAction::Executed);
            assert_eq!(p.action(Timestamp(2_000)).label(), "Proposal Executed");
        }
    }
}
