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

use log::{debug, info, warn};

use crate::{
    eth::{provider::ConfirmSettings, Address, AsProvider, Provider, ProviderOrSigner, Signer},
    rpc::client::RpcPtr,
    Error, Result,
};

/// The chain the session insists on
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Network {
    pub chain_id: u64,
    pub name: String,
}

impl Network {
    pub fn new(chain_id: u64, name: &str) -> Self {
        Self { chain_id, name: name.to_string() }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new(4, "rinkeby")
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut name = self.name.clone();
        if let Some(first) = name.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        write!(f, "{}", name)
    }
}

/// What we know about the wallet connection
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletState {
    pub connected: bool,
    /// Chain id seen on the last check
    pub chain_id: Option<u64>,
    pub account: Option<Address>,
}

/// Session with a wallet endpoint. Constructed once and passed to whoever
/// needs chain access.
pub struct WalletSession {
    rpc: RpcPtr,
    network: Network,
    confirm: ConfirmSettings,
    state: WalletState,
}

impl WalletSession {
    pub fn new(rpc: RpcPtr, network: Network, confirm: ConfirmSettings) -> Self {
        Self { rpc, network, confirm, state: WalletState::default() }
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn is_connected(&self) -> bool {
        self.state.connected
    }

    /// Ask the wallet for its accounts and bind the session to the first one.
    pub async fn connect(&mut self) -> Result<Address> {
        let provider = Provider::new(self.rpc.clone());
        debug!(target: "session", "Requesting accounts from {}", self.rpc.endpoint());

        let accounts = match provider.request_accounts().await {
            Ok(v) => v,
            Err(Error::RpcTransportError(e)) => {
                warn!(target: "session", "Wallet endpoint unreachable: {}", e);
                return Err(Error::NoProviderFound(self.rpc.endpoint()))
            }
            Err(Error::UserRejected) => return Err(Error::UserRejected),
            Err(e) => return Err(Error::WalletConnectionFailed(e.to_string())),
        };

        let Some(account) = accounts.first().copied() else {
            return Err(Error::WalletConnectionFailed("Wallet returned no accounts".to_string()))
        };

        info!(target: "session", "Connected wallet account {}", account);
        self.state = WalletState { connected: true, chain_id: None, account: Some(account) };
        Ok(account)
    }

    /// Hand out a provider, or a signer for the connected account when
    /// `needs_signer` is set. The connected chain is checked on every call.
    pub async fn get_provider_or_signer(&mut self, needs_signer: bool) -> Result<ProviderOrSigner> {
        let account = match self.state.account {
            Some(a) if self.state.connected => a,
            _ => return Err(Error::WalletNotConnected),
        };

        let provider = Provider::new(self.rpc.clone());
        let chain_id = provider.chain_id().await?;
        self.state.chain_id = Some(chain_id);

        if chain_id != self.network.chain_id {
            warn!(
                target: "session",
                "Connected to chain {}, expected {} ({})", chain_id, self.network.chain_id, self.network.name,
            );
            return Err(Error::WrongNetwork { expected: self.network.chain_id, found: chain_id })
        }

        if needs_signer {
            return Ok(ProviderOrSigner::Signer(Signer::new(provider, account, self.confirm)))
        }

        Ok(ProviderOrSigner::Provider(provider))
    }

    pub async fn provider(&mut self) -> Result<Provider> {
        match self.get_provider_or_signer(false).await? {
            ProviderOrSigner::Provider(p) => Ok(p),
            ProviderOrSigner::Signer(s) => Ok(s.as_provider().clone()),
        }
    }

    pub async fn signer(&mut self) -> Result<Signer> {
        match self.get_provider_or_signer(true).await?.into_signer() {
            Some(s) => Ok(s),
            None => Err(Error::WalletNotConnected),
        }
    }
}
