use serde::Serialize;

use crate::config::EpgConfig;
use crate::constants::REQUEST_KIND;

/// Ordered query parameters for a single gateway call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFields {
    pairs: Vec<(&'static str, String)>,
}

impl RequestFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// `None` leaves the key out of the query entirely.
    pub fn push_opt(&mut self, key: &'static str, value: Option<impl ToString>) -> &mut Self {
        if let Some(v) = value {
            self.push(key, v);
        }
        self
    }

    pub fn extend(&mut self, fields: impl IntoIterator<Item = (&'static str, String)>) -> &mut Self {
        self.pairs.extend(fields);
        self
    }

    /// Merchant credentials, appended after the operation's own fields.
    /// The login goes out under three keys; different gateway endpoints read different ones.
    pub fn push_credentials(&mut self, config: &EpgConfig) -> &mut Self {
        self.push("userName", &config.username)
            .push("username", &config.username)
            .push("user", &config.username)
            .push("password", &config.password)
            .push("sid", &config.sid)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Nested blob sent as the `jsonParams` field on register and refund calls.
/// Field order is part of the wire format.
#[derive(Debug, Serialize)]
pub struct JsonParams<'a> {
    pub request: &'a str,
    pub bank: &'a str,
    pub description: &'a str,
    pub sid: &'a str,
}

impl<'a> JsonParams<'a> {
    pub fn for_config(config: &'a EpgConfig) -> Self {
        Self {
            request: REQUEST_KIND,
            bank: &config.bank,
            description: REQUEST_KIND,
            sid: &config.sid,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
