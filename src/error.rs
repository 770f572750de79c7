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

// Hello developer. Please add your error to the according subsection
// that is commented, or make a new subsection. Keep it clean.

/// Main result type used throughout the codebase.
pub type Result<T> = std::result::Result<T, Error>;

/// General library errors used throughout the codebase.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    // ==============
    // Parsing errors
    // ==============
    #[error("Parse failed: {0}")]
    ParseFailed(&'static str),

    #[error(transparent)]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error(transparent)]
    ParseBigIntError(#[from] num_bigint::ParseBigIntError),

    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),

    #[error(transparent)]
    HexDecodeError(#[from] hex::FromHexError),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid vote \"{0}\", expected YAY or NAY")]
    InvalidVote(String),

    // ===============
    // Encoding errors
    // ===============
    #[error("ABI decode failed: {0}")]
    AbiDecodeError(&'static str),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("JSON generate error: {0}")]
    JsonGenerateError(String),

    // ======================
    // JSON-RPC related errors
    // ======================
    #[error("JSON-RPC transport error: {0}")]
    RpcTransportError(String),

    #[error("Invalid JSON-RPC reply: {0}")]
    InvalidJsonRpcReply(String),

    #[error("JSON-RPC error {0}: {1}")]
    JsonRpcError(i32, String),

    // ====================
    // Wallet session errors
    // ====================
    #[error("Wallet connection failed: {0}")]
    WalletConnectionFailed(String),

    #[error("User rejected the wallet request")]
    UserRejected,

    #[error("No wallet provider found at {0}")]
    NoProviderFound(String),

    #[error("Wallet is not connected")]
    WalletNotConnected,

    #[error("Wrong network: expected chain id {expected}, connected to {found}")]
    WrongNetwork { expected: u64, found: u64 },

    // ================
    // Contract errors
    // ================
    #[error("Contract call failed: {0}")]
    ContractCallFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Transaction {0} was not mined in time")]
    TransactionTimeout(String),

    // =================
    // Controller errors
    // =================
    #[error("Action not offered: {0}")]
    ActionNotOffered(String),

    #[error("Proposal {0} not found")]
    ProposalNotFound(u64),

    // ================
    // Deployer errors
    // ================
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("Invalid artifact: {0}")]
    ArtifactInvalid(String),

    // ===============
    // Config errors
    // ===============
    #[error("Configuration is invalid: {0}")]
    ConfigInvalid(String),

    #[error("Configuration option \"{0}\" is missing")]
    ConfigMissing(&'static str),

    // ===========
    // Misc errors
    // ===========
    #[error("IO error: {0:?}")]
    Io(std::io::ErrorKind),

    #[error("Set logger failed: {0}")]
    SetLoggerError(String),

    #[error("{0}")]
    Custom(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.kind())
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(err: log::SetLoggerError) -> Self {
        Self::SetLoggerError(err.to_string())
    }
}

impl From<tinyjson::JsonParseError> for Error {
    fn from(err: tinyjson::JsonParseError) -> Self {
        Self::JsonParseError(err.to_string())
    }
}

impl From<tinyjson::JsonGenerateError> for Error {
    fn from(err: tinyjson::JsonGenerateError) -> Self {
        Self::JsonGenerateError(err.message().to_string())
    }
}

impl Error {
    /// Whether this error stems from the connected chain not being the
    /// one we are configured for.
    pub fn is_wrong_network(&self) -> bool {
        matches!(self, Self::WrongNetwork { .. })
    }
}
