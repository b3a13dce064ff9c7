//! Configuration Module
//!
//! Process-level settings loaded once at startup from the environment (and an optional
//! `.env` file), plus the [`Profile`] of behavioral switches the search pipeline consults.
//!
//! ## Submodules
//! - **`settings`**: Addresses, credentials and timeouts read from environment variables.
//! - **`profile`**: The named behavior switches that changed across releases of the
//!   discovery service (index visibility, value labels, fallback field count, id key).

pub mod profile;
pub mod settings;

pub use profile::{AnonymousIndex, IdentifierKey, Profile, ValueLabels};
pub use settings::Config;
