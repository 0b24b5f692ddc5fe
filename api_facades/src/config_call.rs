//! Config Call Module
//!
//! Assembles the positional and keyword arguments of a runtime `config(...)`
//! call into a [`ConfigRequest`].

use adapters_network_interface::{ConfigRequest, ConfigValue};
use entities_network::NetError;

/// Arguments of one `config(...)` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigCall {
    positional: Vec<String>,
    keywords: Vec<(String, ConfigValue)>,
}

impl ConfigCall {
    /// Start an empty call
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a positional (query) key
    pub fn positional(mut self, key: impl Into<String>) -> Self {
        self.positional.push(key.into());
        self
    }

    /// Add a keyword assignment
    pub fn keyword(mut self, key: impl Into<String>, value: ConfigValue) -> Self {
        self.keywords.push((key.into(), value));
        self
    }

    /// Build the request
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigRequest::Query)` - Exactly one positional key
    /// * `Ok(ConfigRequest::Assign)` - One or more keywords
    /// * `Err(NetError::ConflictingArguments)` - Both forms supplied
    /// * `Err(NetError::InvalidArgument)` - No arguments, or several positional keys
    pub fn build(self) -> Result<ConfigRequest, NetError> {
        match (self.positional.len(), self.keywords.is_empty()) {
            (0, true) => Err(NetError::InvalidArgument(
                "config() needs a key or keyword arguments".to_string(),
            )),
            (0, false) => Ok(ConfigRequest::Assign(self.keywords)),
            (_, false) => Err(NetError::ConflictingArguments),
            (1, true) => {
                let mut positional = self.positional;
                Ok(ConfigRequest::Query(positional.remove(0)))
            }
            (n, true) => Err(NetError::InvalidArgument(format!(
                "config() takes one positional key, got {}",
                n
            ))),
        }
    }
}
