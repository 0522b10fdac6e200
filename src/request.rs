use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::{Input, Options};
use crate::error::{self, OdooError, Result};
use crate::odoo::Odoo;

/// Outcome handed back to the host. `error` is set only on failure, `data`
/// only on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestResult {
    pub success: bool,
    pub error: Option<String>,
    pub data: Option<Value>,
}

impl RequestResult {
    pub fn success(data: Value) -> Self {
        RequestResult {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn failure(err: &OdooError) -> Self {
        RequestResult {
            success: false,
            error: Some(error::report(err)),
            data: None,
        }
    }
}

/// Authenticate, then invoke `input.method` on `input.model`.
///
/// Failures of either step come back as `Ok(RequestResult { success: false, .. })`
/// unless `options.throw_on_error` is set, in which case the error itself is
/// returned. Firing `cancel` aborts the pending HTTP call and fails with
/// [`OdooError::Cancelled`].
#[tracing::instrument(
    skip_all,
    fields(url = %options.odoo_url, model = %input.model, method = %input.method)
)]
pub async fn request(
    input: &Input,
    options: &Options,
    cancel: &CancellationToken,
) -> Result<RequestResult> {
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(OdooError::Cancelled),
        outcome = execute(input, options) => outcome,
    };

    match outcome {
        Ok(data) => {
            info!("request succeeded");
            Ok(RequestResult::success(data))
        }
        Err(err) if options.throw_on_error => Err(err),
        Err(err) => {
            warn!(error = %err, "request failed");
            Ok(RequestResult::failure(&err))
        }
    }
}

async fn execute(input: &Input, options: &Options) -> Result<Value> {
    let odoo = Odoo::new(&options.odoo_url)?;
    let session = odoo
        .authenticate(&options.database, &options.username, &options.password)
        .await?;
    odoo.call_kw(&session, input).await
}
