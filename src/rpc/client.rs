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

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};
use url::Url;

use super::{
    jsonrpc::{JsonRequest, JsonResult},
    util::JsonValue,
};
use crate::{Error, Result};

/// Atomic pointer to an Ethereum JSON-RPC transport
pub type RpcPtr = Arc<dyn EthRpc>;

/// A transport able to carry JSON-RPC requests to a wallet endpoint.
#[async_trait]
pub trait EthRpc: Send + Sync {
    /// Human-readable description of where requests go.
    fn endpoint(&self) -> String;

    /// Send a request and return the raw JSON reply object.
    /// Failing to reach the endpoint must yield [`Error::RpcTransportError`].
    async fn send(&self, req: &JsonRequest) -> Result<JsonValue>;

    /// Send a request and unwrap the `result` of its reply.
    async fn request(&self, req: JsonRequest) -> Result<JsonValue> {
        let rep = self.send(&req).await?;
        JsonResult::try_from_value(&rep)?.into_result(req.id)
    }
}

/// JSON-RPC over HTTP POST, the way a node or wallet daemon serves it
pub struct HttpRpcClient {
    endpoint: Url,
    client: surf::Client,
}

impl HttpRpcClient {
    pub fn new(endpoint: Url) -> Result<Self> {
        match endpoint.scheme() {
            "http" | "https" => {}
            s => return Err(Error::ConfigInvalid(format!("Unsupported endpoint scheme: {s}"))),
        }

        Ok(Self { endpoint, client: surf::Client::new() })
    }

    pub fn into_ptr(self) -> RpcPtr {
        Arc::new(self)
    }
}

#[async_trait]
impl EthRpc for HttpRpcClient {
    fn endpoint(&self) -> String {
        self.endpoint.to_string()
    }

    async fn send(&self, req: &JsonRequest) -> Result<JsonValue> {
        let body = req.stringify()?;
        debug!(target: "rpc::client", "--> {}", body);

        let mut rep = match self
            .client
            .post(self.endpoint.as_str())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(v) => v,
            Err(e) => {
                let e = format!("Failed sending POST request to {}: {}", self.endpoint, e);
                error!(target: "rpc::client", "{}", e);
                return Err(Error::RpcTransportError(e))
            }
        };

        let body = match rep.body_string().await {
            Ok(v) => v,
            Err(e) => {
                let e = format!("Failed reading response body: {}", e);
                error!(target: "rpc::client", "{}", e);
                return Err(Error::InvalidJsonRpcReply(e))
            }
        };
        debug!(target: "rpc::client", "<-- {}", body);

        match body.parse() {
            Ok(v) => Ok(v),
            Err(e) => {
                let e = format!("Failed parsing JSON string from response: {}", e);
                error!(target: "rpc::client", "{}", e);
                Err(Error::InvalidJsonRpcReply(e))
            }
        }
    }
}
