//! Odoo JSON-RPC request task.
//!
//! Opens a session on an Odoo server through `/web/session/authenticate`,
//! then invokes one model method through `/web/dataset/call_kw`.
//!
//! ```no_run
//! use odoo_request::{request, CancellationToken, Input, Options};
//!
//! # async fn run() -> odoo_request::Result<()> {
//! let options = Options::from_env()?;
//! let input = Input {
//!     kwargs: r#"{"fields": ["name", "email"], "limit": 5}"#.to_string(),
//!     ..Input::default()
//! };
//! let result = request(&input, &options, &CancellationToken::new()).await?;
//! println!("{:?}", result.data);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod odoo;
pub mod request;

pub use config::{Input, Options};
pub use error::{OdooError, Result};
pub use odoo::{Odoo, SessionId};
pub use request::{request, RequestResult};
pub use tokio_util::sync::CancellationToken;
