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

use num_bigint::BigUint;

use profitunity::{
    contract::ContractGateway,
    dao::{fetch_all_proposals, fetch_proposal_by_id, ProposalStore},
    util::time::Timestamp,
    Error,
};

mod common;
use common::{dao_address, nft_address, session, FakeChain};

#[test]
fn fetch_all_issues_one_read_per_proposal() {
    smol::block_on(async {
        for n in [0u64, 1, 5] {
            let chain = FakeChain::new();
            for i in 0..n {
                chain.add_proposal(100 + i, 1_000 + i, i, 0, false);
            }

            let mut session = session(&chain);
            session.connect().await.unwrap();
            let dao = ContractGateway::new(dao_address(), nft_address()).dao(session.provider().await.unwrap());

            let proposals = fetch_all_proposals(&dao, n).await;
            assert_eq!(chain.calls("proposals"), n as usize);
            assert_eq!(proposals.len(), n as usize);

            // Ordered by creation
            let ids: Vec<u64> = proposals.iter().map(|p| p.id).collect();
            assert_eq!(ids, (0..n).collect::<Vec<_>>());
        }
    });
}

#[test]
fn failed_read_drops_that_index() {
    smol::block_on(async {
        let chain = FakeChain::new();
        for i in 0..4 {
            chain.add_proposal(i, 1_000, 0, 0, false);
        }
        chain.with(|s| s.broken_proposals.insert(1));

        let mut session = session(&chain);
        session.connect().await.unwrap();
        let dao = ContractGateway::new(dao_address(), nft_address()).dao(session.provider().await.unwrap());

        assert!(matches!(fetch_proposal_by_id(&dao, 1).await, Err(Error::ContractCallFailed(_))));
        chain.reset_calls();

        let proposals = fetch_all_proposals(&dao, 4).await;
        assert_eq!(chain.calls("proposals"), 4);
        assert_eq!(proposals.iter().map(|p| p.id).collect::<Vec<_>>(), vec![0, 2, 3]);
    });
}

#[test]
fn count_beyond_stored_proposals() {
    smol::block_on(async {
        let chain = FakeChain::new();
        chain.add_proposal(7, 1_000, 1, 0, false);

        let mut session = session(&chain);
        session.connect().await.unwrap();
        let dao = ContractGateway::new(dao_address(), nft_address()).dao(session.provider().await.unwrap());

        // A bogus count reads zeroed slots past the stored proposals
        let proposals = fetch_all_proposals(&dao, 5_000).await;
        assert_eq!(chain.calls("proposals"), 5_000);
        assert_eq!(proposals.len(), 5_000);
        assert_eq!(proposals[0].yay_votes, 1);
        assert!(proposals[1..].iter().all(|p| p.yay_votes == 0 && p.deadline == Timestamp(0)));
    });
}

#[test]
fn proposal_fields_are_converted() {
    smol::block_on(async {
        let chain = FakeChain::new();
        chain.add_proposal(42, 1_700_000_000, 3, 5, true);

        let mut session = session(&chain);
        session.connect().await.unwrap();
        let dao = ContractGateway::new(dao_address(), nft_address()).dao(session.provider().await.unwrap());

        let p = fetch_proposal_by_id(&dao, 0).await.unwrap();
        assert_eq!(p.id, 0);
        assert_eq!(p.nft_token_id, BigUint::from(42u8));
        assert_eq!(p.deadline, Timestamp(1_700_000_000));
        assert_eq!((p.yay_votes, p.nay_votes), (3, 5));
        assert!(p.executed);

        let mut store = ProposalStore::default();
        store.replace(vec![p.clone()]);
        assert_eq!(store.get(0), Some(&p));
        assert_eq!(store.get(1), None);
        store.replace(vec![]);
        assert!(store.is_empty());
    });
}
