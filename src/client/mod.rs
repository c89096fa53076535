//! Client-side state layer: session token lifecycle, a typed API client, and
//! the per-slice loading/error state the view shell renders from.
//!
//! The shell owns a [`Session`] inside the [`ApiClient`] plus an [`AuthState`]
//! and a [`TodoState`]. Every remote call moves its slice through
//! pending → (fulfilled | rejected); a 403 from any call clears the session
//! and the shell routes back to the login screen.

pub mod api;
pub mod session;
pub mod state;

pub use api::{ApiClient, ClientError};
pub use session::Session;
pub use state::{AuthState, TodoState};
