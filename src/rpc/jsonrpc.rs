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

//! JSON-RPC 2.0 object definitions, as spoken by Ethereum wallets and nodes.
use std::collections::HashMap;

use rand::{rngs::OsRng, Rng};
use tinyjson::JsonValue;

use super::util::json_field;
use crate::{Error, Result};

/// JSON-RPC error codes.
/// The error codes `[-32768, -32000]` are reserved for predefined errors,
/// the `4xxx` range is defined by EIP-1193 for wallet providers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid JSON was received by the server.
    ParseError,
    /// The JSON sent is not a valid Request object.
    InvalidRequest,
    /// The method does not exist / is not available.
    MethodNotFound,
    /// Invalid method parameter(s).
    InvalidParams,
    /// Internal JSON-RPC error.
    InternalError,
    /// The user rejected the request (EIP-1193).
    UserRejectedRequest,
    /// The requested account or method has not been authorized (EIP-1193).
    Unauthorized,
    /// The provider is disconnected from all chains (EIP-1193).
    Disconnected,
    /// Reserved for implementation-defined server-errors.
    ServerError(i32),
}

impl ErrorCode {
    pub fn code(&self) -> i32 {
        match *self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::UserRejectedRequest => 4001,
            Self::Unauthorized => 4100,
            Self::Disconnected => 4900,
            Self::ServerError(c) => c,
        }
    }

    pub fn message(&self) -> String {
        match *self {
            Self::ParseError => "parse error".to_string(),
            Self::InvalidRequest => "invalid request".to_string(),
            Self::MethodNotFound => "method not found".to_string(),
            Self::InvalidParams => "invalid params".to_string(),
            Self::InternalError => "internal error".to_string(),
            Self::UserRejectedRequest => "user rejected the request".to_string(),
            Self::Unauthorized => "unauthorized".to_string(),
            Self::Disconnected => "disconnected".to_string(),
            Self::ServerError(_) => "server error".to_string(),
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            -32700 => Self::ParseError,
            -32600 => Self::InvalidRequest,
            -32601 => Self::MethodNotFound,
            -32602 => Self::InvalidParams,
            -32603 => Self::InternalError,
            4001 => Self::UserRejectedRequest,
            4100 => Self::Unauthorized,
            4900 => Self::Disconnected,
            c => Self::ServerError(c),
        }
    }
}

/// Wrapping enum around the JSON-RPC objects a client can receive
#[derive(Clone, Debug)]
pub enum JsonResult {
    Response(JsonResponse),
    Error(JsonError),
}

impl JsonResult {
    pub fn try_from_value(value: &JsonValue) -> Result<Self> {
        if let Ok(response) = JsonResponse::try_from(value) {
            return Ok(Self::Response(response))
        }

        if let Ok(error) = JsonError::try_from(value) {
            return Ok(Self::Error(error))
        }

        Err(Error::InvalidJsonRpcReply("Invalid JSON Result".to_string()))
    }

    /// Unwrap the reply to a request into its result value, checking that it
    /// answers the given request ID. EIP-1193 rejections map to
    /// [`Error::UserRejected`], everything else to [`Error::JsonRpcError`].
    pub fn into_result(self, req_id: u16) -> Result<JsonValue> {
        match self {
            Self::Response(r) => {
                if r.id != req_id {
                    return Err(Error::InvalidJsonRpcReply(format!(
                        "id mismatch: sent {req_id}, got {}",
                        r.id
                    )))
                }
                Ok(r.result)
            }

            Self::Error(e) => match ErrorCode::from_code(e.error.code) {
                ErrorCode::UserRejectedRequest => Err(Error::UserRejected),
                _ => Err(Error::JsonRpcError(e.error.code, e.error.message)),
            },
        }
    }
}

impl From<JsonResponse> for JsonResult {
    fn from(resp: JsonResponse) -> Self {
        Self::Response(resp)
    }
}

impl From<JsonError> for JsonResult {
    fn from(err: JsonError) -> Self {
        Self::Error(err)
    }
}

/// Checks the `"jsonrpc": "2.0"` marker and the numeric `id` of an object,
/// returning the object map and the ID.
fn envelope<'a>(
    value: &'a JsonValue,
    kind: &str,
) -> Result<(&'a HashMap<String, JsonValue>, u16)> {
    let Some(map) = value.get::<HashMap<String, JsonValue>>() else {
        return Err(Error::InvalidJsonRpcReply(format!("{kind} is not an Object")))
    };

    match map.get("jsonrpc") {
        Some(JsonValue::String(v)) if v == "2.0" => {}
        _ => {
            return Err(Error::InvalidJsonRpcReply(format!(
                "{kind} does not contain valid \"jsonrpc\" field"
            )))
        }
    }

    let Some(JsonValue::Number(id)) = map.get("id") else {
        return Err(Error::InvalidJsonRpcReply(format!(
            "{kind} does not contain valid \"id\" field"
        )))
    };

    Ok((map, *id as u16))
}

/// A JSON-RPC request object
#[derive(Clone, Debug)]
pub struct JsonRequest {
    /// JSON-RPC version
    pub jsonrpc: &'static str,
    /// Request ID
    pub id: u16,
    /// Request method
    pub method: String,
    /// Request parameters
    pub params: JsonValue,
}

impl JsonRequest {
    /// Create a new [`JsonRequest`] object with the given method and parameters.
    /// The request ID is chosen randomly.
    pub fn new(method: &str, params: JsonValue) -> Self {
        assert!(params.is_object() || params.is_array());
        Self { jsonrpc: "2.0", id: OsRng.gen(), method: method.to_string(), params }
    }

    /// Convert the object into a JSON string
    pub fn stringify(&self) -> Result<String> {
        let v: JsonValue = self.into();
        Ok(v.stringify()?)
    }
}

impl From<&JsonRequest> for JsonValue {
    fn from(req: &JsonRequest) -> JsonValue {
        JsonValue::Object(HashMap::from([
            ("jsonrpc".to_string(), JsonValue::String(req.jsonrpc.to_string())),
            ("id".to_string(), JsonValue::Number(req.id.into())),
            ("method".to_string(), JsonValue::String(req.method.clone())),
            ("params".to_string(), req.params.clone()),
        ]))
    }
}

impl TryFrom<&JsonValue> for JsonRequest {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self> {
        let (map, id) = envelope(value, "Request")?;

        let Some(JsonValue::String(method)) = map.get("method") else {
            return Err(Error::InvalidJsonRpcReply(
                "Request does not contain valid \"method\" field".to_string(),
            ))
        };

        // Parameters are optional on the wire, default to an empty array
        let params = match map.get("params") {
            None => JsonValue::Array(vec![]),
            Some(p) if p.is_array() || p.is_object() => p.clone(),
            Some(_) => {
                return Err(Error::InvalidJsonRpcReply(
                    "Request does not contain valid \"params\" field".to_string(),
                ))
            }
        };

        Ok(Self { jsonrpc: "2.0", id, method: method.clone(), params })
    }
}

/// A JSON-RPC response object
#[derive(Clone, Debug)]
pub struct JsonResponse {
    /// JSON-RPC version
    pub jsonrpc: &'static str,
    /// Request ID
    pub id: u16,
    /// Response result
    pub result: JsonValue,
}

impl JsonResponse {
    /// Create a new [`JsonResponse`] object with the given ID and result value.
    /// Creating a `JsonResponse` implies that the method call was successful.
    pub fn new(result: JsonValue, id: u16) -> Self {
        Self { jsonrpc: "2.0", id, result }
    }

    /// Convert the object into a JSON string
    pub fn stringify(&self) -> Result<String> {
        let v: JsonValue = self.into();
        Ok(v.stringify()?)
    }
}

impl From<&JsonResponse> for JsonValue {
    fn from(rep: &JsonResponse) -> JsonValue {
        JsonValue::Object(HashMap::from([
            ("jsonrpc".to_string(), JsonValue::String(rep.jsonrpc.to_string())),
            ("id".to_string(), JsonValue::Number(rep.id.into())),
            ("result".to_string(), rep.result.clone()),
        ]))
    }
}

impl TryFrom<&JsonValue> for JsonResponse {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self> {
        let (map, id) = envelope(value, "Response")?;

        // A `null` result is valid, e.g. for a receipt that doesn't exist yet.
        let Some(result) = map.get("result") else {
            return Err(Error::InvalidJsonRpcReply(
                "Response does not contain valid \"result\" field".to_string(),
            ))
        };

        Ok(Self { jsonrpc: "2.0", id, result: result.clone() })
    }
}

/// A JSON-RPC error object
#[derive(Clone, Debug)]
pub struct JsonError {
    /// JSON-RPC version
    pub jsonrpc: &'static str,
    /// Request ID
    pub id: u16,
    /// JSON-RPC error (code and message)
    pub error: JsonErrorVal,
}

/// A JSON-RPC error value (code and message)
#[derive(Clone, Debug)]
pub struct JsonErrorVal {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
}

impl JsonError {
    /// Create a new [`JsonError`] object with the given error code, optional
    /// message, and a response ID.
    /// Creating a `JsonError` implies that the method call was unsuccessful.
    pub fn new(c: ErrorCode, message: Option<String>, id: u16) -> Self {
        let error = JsonErrorVal { code: c.code(), message: message.unwrap_or(c.message()) };
        Self { jsonrpc: "2.0", id, error }
    }

    /// Convert the object into a JSON string
    pub fn stringify(&self) -> Result<String> {
        let v: JsonValue = self.into();
        Ok(v.stringify()?)
    }
}

impl From<&JsonError> for JsonValue {
    fn from(err: &JsonError) -> JsonValue {
        let errmap = JsonValue::Object(HashMap::from([
            ("code".to_string(), JsonValue::Number(err.error.code.into())),
            ("message".to_string(), JsonValue::String(err.error.message.clone())),
        ]));

        JsonValue::Object(HashMap::from([
            ("jsonrpc".to_string(), JsonValue::String(err.jsonrpc.to_string())),
            ("id".to_string(), JsonValue::Number(err.id.into())),
            ("error".to_string(), errmap),
        ]))
    }
}

impl TryFrom<&JsonValue> for JsonError {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self> {
        let (map, id) = envelope(value, "Error")?;

        let Some(error) = map.get("error") else {
            return Err(Error::InvalidJsonRpcReply(
                "Error does not contain valid \"error\" field".to_string(),
            ))
        };

        let Some(JsonValue::Number(code)) = json_field(error, "code") else {
            return Err(Error::InvalidJsonRpcReply(
                "Error does not contain valid \"error.code\" field".to_string(),
            ))
        };

        let Some(JsonValue::String(message)) = json_field(error, "message") else {
            return Err(Error::InvalidJsonRpcReply(
                "Error does not contain valid \"error.message\" field".to_string(),
            ))
        };

        Ok(Self {
            jsonrpc: "2.0",
            id,
            error: JsonErrorVal { code: *code as i32, message: message.clone() },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_null_result() {
        let value: JsonValue = r#"{"jsonrpc":"2.0","id":7,"result":null}"#.parse().unwrap();
        let rep = JsonResult::try_from_value(&value).unwrap();
        assert!(rep.into_result(7).unwrap().is_null());
    }

    #[test]
    fn id_mismatch_is_rejected() {
        let value: JsonValue = r#"{"jsonrpc":"2.0","id":7,"result":"0x1"}"#.parse().unwrap();
        let rep = JsonResult::try_from_value(&value).unwrap();
        assert!(matches!(rep.into_result(8), Err(Error::InvalidJsonRpcReply(_))));
    }

    #[test]
    fn user_rejection_maps_to_error() {
        let value: JsonValue =
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"User rejected"}}"#
                .parse()
                .unwrap();
        let rep = JsonResult::try_from_value(&value).unwrap();
        assert!(matches!(rep.into_result(1), Err(Error::UserRejected)));

        let value: JsonValue =
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"insufficient funds"}}"#
                .parse()
                .unwrap();
        let rep = JsonResult::try_from_value(&value).unwrap();
        match rep.into_result(1) {
            Err(Error::JsonRpcError(code, msg)) => {
                assert_eq!(code, -32000);
                assert_eq!(msg, "insufficient funds");
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn request_roundtrips_through_json() {
        let req = JsonRequest::new("eth_chainId", JsonValue::Array(vec![]));
        let value: JsonValue = req.stringify().unwrap().parse().unwrap();
        let parsed = JsonRequest::try_from(&value).unwrap();
        assert_eq!(parsed.id, req.id);
        assert_eq!(parsed.method, "eth_chainId");
    }
}
