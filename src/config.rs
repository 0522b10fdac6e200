//! Task parameters supplied by the host: what to call, and where.
//!
//! Both records deserialize from the host's PascalCase field names, so a task
//! runner can hand them over as JSON. For local runs they can also be read
//! from `ODOO_*` environment variables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OdooError, Result};

/// The remote method to invoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Input {
    /// Odoo model, e.g. `res.partner`. The list of models can be read from
    /// `ir.model` with `search_read`.
    pub model: String,
    /// Method to execute on the model.
    pub method: String,
    /// Positional arguments as JSON array text, e.g. `[ "arg1", 1 ]`.
    pub args: String,
    /// Keyword arguments as JSON object text, e.g. `{ "limit": 5 }`.
    pub kwargs: String,
}

impl Default for Input {
    fn default() -> Self {
        Input {
            model: "res.partner".to_string(),
            method: "search_read".to_string(),
            args: "[]".to_string(),
            kwargs: "{}".to_string(),
        }
    }
}

impl Input {
    /// Defaults overlaid with `ODOO_MODEL`, `ODOO_METHOD`, `ODOO_ARGS` and
    /// `ODOO_KWARGS` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Input::default();
        Input {
            model: lookup("ODOO_MODEL").unwrap_or(defaults.model),
            method: lookup("ODOO_METHOD").unwrap_or(defaults.method),
            args: lookup("ODOO_ARGS").unwrap_or(defaults.args),
            kwargs: lookup("ODOO_KWARGS").unwrap_or(defaults.kwargs),
        }
    }
}

/// Connection settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Options {
    /// Base URL of the server, e.g. `https://example.com`. Trailing slashes
    /// are ignored.
    pub odoo_url: String,
    pub username: String,
    pub password: String,
    pub database: String,
    /// Return failures as `Err` instead of a `RequestResult` with
    /// `success == false`.
    #[serde(default, alias = "ThrowExceptionOnErrorResponse")]
    pub throw_on_error: bool,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("odoo_url", &self.odoo_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("throw_on_error", &self.throw_on_error)
            .finish()
    }
}

impl Options {
    /// Read `ODOO_URL`, `ODOO_USERNAME`, `ODOO_PASSWORD`, `ODOO_DATABASE`
    /// and the optional `ODOO_THROW_ON_ERROR`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| OdooError::Config(format!("{key} is not set")))
        };

        let throw_on_error = match lookup("ODOO_THROW_ON_ERROR") {
            None => false,
            Some(value) => value.trim().parse::<bool>().map_err(|_| {
                OdooError::Config(format!(
                    "ODOO_THROW_ON_ERROR must be true or false, got {value:?}"
                ))
            })?,
        };

        Ok(Options {
            odoo_url: required("ODOO_URL")?,
            username: required("ODOO_USERNAME")?,
            password: required("ODOO_PASSWORD")?,
            database: required("ODOO_DATABASE")?,
            throw_on_error,
        })
    }
}
