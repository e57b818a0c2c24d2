//! Gateway api key
//!
//! The key is zeroed when dropped and never printed. `Debug` shows a
//! placeholder, and the `apikey` header built from it is flagged sensitive
//! so `reqwest` keeps it out of its own debug output as well.
//!
//! ```
//! use evolution_api::ApiKey;
//!
//! let api_key = ApiKey::new("B6D711FCDE4D4FD5936544120E713976");
//!
//! assert_eq!(format!("{:?}", api_key), "ApiKey([REDACTED])");
//! assert!(api_key.header_value().unwrap().is_sensitive());
//! ```

use reqwest::header::{HeaderValue, InvalidHeaderValue};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Token sent to the gateway in the `apikey` header
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key text
    ///
    /// Never log the returned value or put it in error text.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Header value carrying the key, marked sensitive
    ///
    /// # Errors
    ///
    /// Fails when the key holds characters an HTTP header cannot carry,
    /// such as a trailing newline pasted along with it.
    pub fn header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&self.0)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}
