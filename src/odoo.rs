use std::fmt;

use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, info};

use crate::api::{AuthenticateParams, CallKwParams, RpcRequest, RpcResponse};
use crate::config::Input;
use crate::error::{OdooError, Result};

const AUTHENTICATE_PATH: &str = "/web/session/authenticate";
const CALL_KW_PATH: &str = "/web/dataset/call_kw";
const SESSION_COOKIE: &str = "session_id";

/// Session token issued by `/web/session/authenticate`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: impl Into<String>) -> Self {
        SessionId(value.into())
    }

    /// Value of the `Cookie` header carrying this session.
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.0)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionId(..)")
    }
}

/// Find the `session_id` cookie among `Set-Cookie` header values.
///
/// The cookie name must match exactly; the value runs from the first `=` to
/// the first `;`.
pub fn find_session_id<'a>(set_cookies: impl IntoIterator<Item = &'a str>) -> Option<SessionId> {
    set_cookies.into_iter().find_map(|header| {
        let pair = header.split(';').next().unwrap_or_default();
        let (name, value) = pair.split_once('=')?;
        (name == SESSION_COOKIE).then(|| SessionId::new(value))
    })
}

/// A connection to one Odoo server, scoped to a single invocation.
///
/// Owns its HTTP client; dropping the `Odoo` releases the connection.
pub struct Odoo {
    http: Client,
    url: String,
}

impl Odoo {
    pub fn new(url: &str) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Odoo {
            http,
            url: url.trim_end_matches('/').to_string(),
        })
    }

    /// Open a session with the given credentials.
    pub async fn authenticate(&self, database: &str, username: &str, password: &str) -> Result<SessionId> {
        let request = RpcRequest::new(AuthenticateParams {
            db: database,
            login: username,
            password,
        });

        let url = self.endpoint(AUTHENTICATE_PATH);
        debug!(%url, database, "authenticating");
        let response = self.http.post(&url).json(&request).send().await?;
        let response = Self::check_status(response, url)?;

        if !response.headers().contains_key(SET_COOKIE) {
            let body = response.text().await?;
            let envelope: RpcResponse = serde_json::from_str(&body)?;
            let message = envelope
                .error
                .as_ref()
                .and_then(|error| error.data_message())
                .unwrap_or_default();
            return Err(OdooError::Authentication(format!(
                "Authentication failed. Odoo's response: {message}"
            )));
        }

        let session = find_session_id(
            response
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        )
        .ok_or_else(|| {
            OdooError::Authentication(
                "Authentication failed. Could not find session_id from the response.".to_string(),
            )
        })?;

        debug!("session opened");
        Ok(session)
    }

    /// Invoke `input.method` on `input.model` and return the decoded `result`.
    pub async fn call_kw(&self, session: &SessionId, input: &Input) -> Result<Value> {
        let request = RpcRequest::new(CallKwParams {
            model: &input.model,
            method: &input.method,
            args: parse_json("Args", &input.args)?,
            kwargs: parse_json("Kwargs", &input.kwargs)?,
        });
        let payload = serde_json::to_string(&request)?;
        info!(%payload, "call_kw request");

        let url = self.endpoint(CALL_KW_PATH);
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(COOKIE, session.cookie())
            .body(payload)
            .send()
            .await?;
        let response = Self::check_status(response, url)?;

        let body = response.bytes().await?;
        let envelope: RpcResponse = serde_json::from_slice(&body)?;
        envelope.into_result()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    fn check_status(response: Response, url: String) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            return Err(OdooError::Status { status, url });
        }
        Ok(response)
    }
}

fn parse_json(field: &'static str, text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|source| OdooError::MalformedInput { field, source })
}
