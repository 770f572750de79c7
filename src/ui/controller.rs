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

use futures::join;
use log::{debug, error, info};
use num_bigint::BigUint;

use super::{ConnectionState, Tab, UiState};
use crate::{
    contract::ContractGateway,
    dao::{fetch_all_proposals, ProposalAction, Vote},
    eth::Receipt,
    session::WalletSession,
    util::time::Timestamp,
    Error, Result,
};

/// A contract write the user asked for
#[derive(Clone, Debug)]
enum WriteOp {
    Create(BigUint),
    Vote(u64, Vote),
    Execute(u64),
}

/// Owns the UI state and is the only thing that changes it. Chain reads
/// fail soft: they are logged and the previous values stay. Writes are
/// logged and returned to the caller.
pub struct ViewController {
    session: WalletSession,
    gateway: ContractGateway,
    state: UiState,
}

impl ViewController {
    pub fn new(session: WalletSession, gateway: ContractGateway) -> Self {
        Self { session, gateway, state: UiState::default() }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn dismiss_alert(&mut self) {
        self.state.alert = None;
    }

    fn note_error(&mut self, e: &Error) {
        if e.is_wrong_network() {
            self.state.alert =
                Some(format!("Please switch to the {} network!", self.session.network()));
        }
    }

    /// Connect the wallet if needed, then load the dashboard figures.
    pub async fn mount(&mut self) -> Result<()> {
        if !self.session.is_connected() {
            self.state.connection = ConnectionState::Connecting;

            if let Err(e) = self.session.connect().await {
                error!(target: "ui::controller", "Wallet connection failed: {}", e);
                self.state.connection = ConnectionState::Disconnected;
                self.note_error(&e);
                return Err(e)
            }

            self.state.connection = ConnectionState::Connected { tab: None };
        }

        self.refresh_overview().await;
        Ok(())
    }

    /// Read treasury balance, NFT balance and proposal count concurrently.
    pub async fn refresh_overview(&mut self) {
        let (provider, account) = match self.session.provider().await {
            Ok(p) => (p, self.session.state().account),
            Err(e) => {
                error!(target: "ui::controller", "Cannot read dashboard: {}", e);
                self.note_error(&e);
                return
            }
        };
        let Some(account) = account else { return };

        let dao = self.gateway.dao(provider.clone());
        let nft = self.gateway.nft(provider);

        let (treasury, nft_balance, num_proposals) =
            join!(dao.treasury_balance(), nft.balance_of(&account), dao.num_proposals());

        match treasury {
            Ok(v) => self.state.treasury_balance = v,
            Err(e) => error!(target: "ui::controller", "Failed reading treasury balance: {}", e),
        }

        match nft_balance {
            Ok(v) => self.state.nft_balance = v,
            Err(e) => error!(target: "ui::controller", "Failed reading NFT balance: {}", e),
        }

        match num_proposals {
            Ok(v) => self.state.num_proposals = v,
            Err(e) => error!(target: "ui::controller", "Failed reading proposal count: {}", e),
        }
    }

    async fn refresh_num_proposals(&mut self) {
        let provider = match self.session.provider().await {
            Ok(p) => p,
            Err(e) => {
                error!(target: "ui::controller", "Cannot read proposal count: {}", e);
                self.note_error(&e);
                return
            }
        };

        match self.gateway.dao(provider).num_proposals().await {
            Ok(v) => self.state.num_proposals = v,
            Err(e) => error!(target: "ui::controller", "Failed reading proposal count: {}", e),
        }
    }

    /// Re-read every proposal, replacing the cached list.
    pub async fn fetch_all_proposals(&mut self) {
        let provider = match self.session.provider().await {
            Ok(p) => p,
            Err(e) => {
                error!(target: "ui::controller", "Cannot read proposals: {}", e);
                self.note_error(&e);
                return
            }
        };

        let dao = self.gateway.dao(provider);
        let proposals = fetch_all_proposals(&dao, self.state.num_proposals).await;
        self.state.proposals.replace(proposals);
    }

    /// Switch tabs. Entering the proposal list always refetches it.
    pub async fn select_tab(&mut self, tab: Tab) -> Result<()> {
        if !self.state.is_connected() {
            return Err(Error::WalletNotConnected)
        }

        debug!(target: "ui::controller", "Selecting tab \"{}\"", tab);
        self.state.connection = ConnectionState::Connected { tab: Some(tab) };

        if tab == Tab::View {
            self.fetch_all_proposals().await;
        }

        Ok(())
    }

    /// Reload the dashboard and, when it is showing, the proposal list.
    pub async fn refresh(&mut self) -> Result<()> {
        self.mount().await?;
        if self.state.selected_tab() == Some(Tab::View) {
            self.fetch_all_proposals().await;
        }
        Ok(())
    }

    /// Submit a new proposal to buy `nft_token_id` from the marketplace.
    pub async fn create_proposal(&mut self, nft_token_id: BigUint) -> Result<Receipt> {
        if self.state.nft_balance == 0 {
            return Err(Error::ActionNotOffered(
                "creating proposals requires owning a ProfitUnity NFT".to_string(),
            ))
        }

        let receipt = self.transact(WriteOp::Create(nft_token_id)).await?;
        self.refresh_num_proposals().await;
        Ok(receipt)
    }

    /// Vote on an open proposal.
    pub async fn vote(&mut self, id: u64, vote: Vote) -> Result<Receipt> {
        match self.offered_action(id)? {
            ProposalAction::Vote => {}
            other => {
                return Err(Error::ActionNotOffered(format!(
                    "proposal {id} is not open for voting ({})",
                    other.label()
                )))
            }
        }

        let receipt = self.transact(WriteOp::Vote(id, vote)).await?;
        self.fetch_all_proposals().await;
        Ok(receipt)
    }

    /// Execute a proposal whose deadline has passed.
    pub async fn execute(&mut self, id: u64) -> Result<Receipt> {
        match self.offered_action(id)? {
            ProposalAction::Execute(outcome) => {
                info!(target: "ui::controller", "Executing proposal {} ({})", id, outcome)
            }
            other => {
                return Err(Error::ActionNotOffered(format!(
                    "proposal {id} cannot be executed ({})",
                    other.label()
                )))
            }
        }

        let receipt = self.transact(WriteOp::Execute(id)).await?;
        self.fetch_all_proposals().await;
        Ok(receipt)
    }

    fn offered_action(&self, id: u64) -> Result<ProposalAction> {
        match self.state.proposals.get(id) {
            Some(p) => Ok(p.action(Timestamp::current_time())),
            None => Err(Error::ProposalNotFound(id)),
        }
    }

    /// Send a write and wait for it to be mined, with `loading` held for
    /// the whole time and released whatever the outcome.
    async fn transact(&mut self, op: WriteOp) -> Result<Receipt> {
        self.state.loading = true;
        let res = self.send_and_wait(&op).await;
        self.state.loading = false;

        match &res {
            Ok(receipt) => {
                info!(target: "ui::controller", "{:?} confirmed in {}", op, receipt.transaction_hash)
            }
            Err(e) => {
                error!(target: "ui::controller", "{:?} failed: {}", op, e);
                self.note_error(e);
            }
        }

        res
    }

    async fn send_and_wait(&mut self, op: &WriteOp) -> Result<Receipt> {
        let signer = self.session.signer().await?;
        let dao = self.gateway.dao(signer);

        let pending = match op {
            WriteOp::Create(token_id) => dao.create_proposal(token_id).await?,
            WriteOp::Vote(id, vote) => dao.vote_on_proposal(*id, *vote).await?,
            WriteOp::Execute(id) => dao.execute_proposal(*id).await?,
        };

        pending.wait().await
    }
}
