//! Relying party configuration

use crate::request::ProtocolVersion;

/// How the signature counter must move between authentications
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPolicy {
    /// Counter must increase, except that a stored and presented counter of
    /// zero are both accepted (devices without a counter)
    #[default]
    AllowZeroZero,
    /// Counter must always increase
    StrictlyIncreasing,
}

impl CounterPolicy {
    /// Whether a presented counter is acceptable after the stored one
    pub fn accepts(&self, stored: u32, presented: u32) -> bool {
        match self {
            CounterPolicy::AllowZeroZero => presented > stored || (stored == 0 && presented == 0),
            CounterPolicy::StrictlyIncreasing => presented > stored,
        }
    }
}

/// Relying party configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct U2fConfig {
    pub app_id: String,
    pub versions: Vec<ProtocolVersion>,
    pub counter_policy: CounterPolicy,
}

impl U2fConfig {
    /// Default configuration for `app_id`
    pub fn new(app_id: impl Into<String>) -> Self {
        Self::builder(app_id).build()
    }

    pub fn builder(app_id: impl Into<String>) -> U2fConfigBuilder {
        U2fConfigBuilder::new(app_id)
    }
}

/// Builder for U2fConfig
#[derive(Debug, Clone)]
pub struct U2fConfigBuilder {
    app_id: String,
    versions: Vec<ProtocolVersion>,
    counter_policy: CounterPolicy,
}

impl U2fConfigBuilder {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            versions: vec![],
            counter_policy: CounterPolicy::default(),
        }
    }

    pub fn versions(mut self, versions: Vec<ProtocolVersion>) -> Self {
        self.versions = versions;
        self
    }

    pub fn counter_policy(mut self, policy: CounterPolicy) -> Self {
        self.counter_policy = policy;
        self
    }

    pub fn build(self) -> U2fConfig {
        U2fConfig {
            app_id: self.app_id,
            versions: if self.versions.is_empty() {
                vec![ProtocolVersion::default()]
            } else {
                self.versions
            },
            counter_policy: self.counter_policy,
        }
    }
}
