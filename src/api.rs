//! JSON-RPC envelopes exchanged with Odoo's `/web/...` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull};

use crate::error::{OdooError, Result};

pub const JSONRPC_VERSION: &str = "2.0";

/// Outgoing request wrapper: `{"jsonrpc":"2.0","params":{...}}`.
#[derive(Debug, Serialize)]
pub struct RpcRequest<P> {
    pub jsonrpc: &'static str,
    pub params: P,
}

impl<P: Serialize> RpcRequest<P> {
    pub fn new(params: P) -> Self {
        RpcRequest {
            jsonrpc: JSONRPC_VERSION,
            params,
        }
    }
}

/// Params of `/web/session/authenticate`.
#[derive(Serialize)]
pub struct AuthenticateParams<'a> {
    pub db: &'a str,
    pub login: &'a str,
    pub password: &'a str,
}

/// Params of `/web/dataset/call_kw`.
#[derive(Debug, Serialize)]
pub struct CallKwParams<'a> {
    pub model: &'a str,
    pub method: &'a str,
    pub args: Value,
    pub kwargs: Value,
}

/// Incoming response wrapper. Exactly one of `result` / `error` is expected,
/// but both are optional so that a malformed answer still decodes.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub message: String,
    /// Kept as raw JSON: callers match on its serialized text.
    #[serde(default)]
    pub data: Option<Value>,
}

impl RpcError {
    /// `error.data.message`. Odoo's `false` placeholder, `null` or any other
    /// non-string value gives `None`.
    pub fn data_message(&self) -> Option<&str> {
        self.data.as_ref()?.get("message")?.as_str()
    }

    /// `error.data` as indented JSON, `null` when absent.
    pub fn pretty_data(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }
}

impl RpcResponse {
    /// Split the envelope: `result` on success, [`OdooError::Remote`] when a
    /// non-null `error` is present.
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(error) => Err(OdooError::Remote(error.pretty_data()?)),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn call_kw_request_shape() {
        let request = RpcRequest::new(CallKwParams {
            model: "res.partner",
            method: "search_read",
            args: json!([]),
            kwargs: json!({"fields": ["name", "email"], "limit": 5}),
        });

        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"jsonrpc":"2.0","params":{"model":"res.partner","method":"search_read","args":[],"kwargs":{"fields":["name","email"],"limit":5}}}"#
        );
    }

    #[test]
    fn authenticate_request_shape() {
        let request = RpcRequest::new(AuthenticateParams {
            db: "MyDatabase",
            login: "john.doe@example.com",
            password: "Password!",
        });

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "params": {"db": "MyDatabase", "login": "john.doe@example.com", "password": "Password!"}
            })
        );
    }

    #[test]
    fn result_is_returned_verbatim() {
        let response: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"result":[{"id":1,"name":"Azure"}]}"#)
                .unwrap();
        assert_eq!(response.into_result().unwrap(), json!([{"id": 1, "name": "Azure"}]));

        let response: RpcResponse = serde_json::from_str(r#"{"jsonrpc":"2.0","result":null}"#).unwrap();
        assert_eq!(response.into_result().unwrap(), Value::Null);

        let response: RpcResponse = serde_json::from_str(r#"{"jsonrpc":"2.0","result":42}"#).unwrap();
        assert_eq!(response.into_result().unwrap(), json!(42));
    }

    #[test]
    fn null_error_is_not_a_failure() {
        let response: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","error":null,"result":true}"#).unwrap();
        assert_eq!(response.into_result().unwrap(), json!(true));
    }

    #[test]
    fn error_data_is_indented_in_received_order() {
        let response: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","error":{"code":200,"message":"Odoo Server Error","data":{"name":"builtins.TypeError","message":"unexpected keyword argument 'invalid'","arguments":["x"]}}}"#,
        )
        .unwrap();

        match response.into_result() {
            Err(OdooError::Remote(text)) => assert_eq!(
                text,
                "{\n  \"name\": \"builtins.TypeError\",\n  \"message\": \"unexpected keyword argument 'invalid'\",\n  \"arguments\": [\n    \"x\"\n  ]\n}"
            ),
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn error_without_data_prints_null() {
        let response: RpcResponse =
            serde_json::from_str(r#"{"error":{"code":100,"message":null}}"#).unwrap();
        let error = response.error.as_ref().unwrap();
        assert_eq!(error.message, "");
        assert_eq!(error.code, Some(100));

        match response.into_result() {
            Err(OdooError::Remote(text)) => assert_eq!(text, "null"),
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn data_message_ignores_sibling_fields() {
        let error: RpcError = serde_json::from_value(json!({
            "code": 200,
            "message": "Odoo Server Error",
            "data": {"name": "odoo.exceptions.AccessDenied", "debug": 7, "message": "Access Denied"}
        }))
        .unwrap();
        assert_eq!(error.data_message(), Some("Access Denied"));
    }

    #[test]
    fn data_message_tolerates_missing_and_false() {
        let error: RpcError = serde_json::from_value(json!({"data": {"message": false}})).unwrap();
        assert_eq!(error.data_message(), None);

        let error: RpcError = serde_json::from_value(json!({"message": "x"})).unwrap();
        assert_eq!(error.data_message(), None);

        let error: RpcError = serde_json::from_value(json!({"data": "not an object"})).unwrap();
        assert_eq!(error.data_message(), None);
    }
}
