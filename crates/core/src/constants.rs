//! Constants used throughout the EMR mock crates.
//!
//! This module contains the default configuration values so they stay
//! consistent between the runner binary, the startup banner, and the tests.

/// Default shared secret expected from clients when `EMRMOCK_API_KEY` is unset.
pub const DEFAULT_API_KEY: &str = "your-super-secret-api-key";

/// Default listen address when `EMRMOCK_ADDR` is unset.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3001";

/// Default public base URL used to build absolute endpoint links when
/// `EMRMOCK_BASE_URL` is unset.
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3001";
