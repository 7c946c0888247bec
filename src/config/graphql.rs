//! GraphQL endpoint configuration.

use serde::Deserialize;

use super::merge::{Merge, overlay};

/// Paths reserved for the GraphQL surface.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphqlConfig {
    /// Query endpoint path, e.g. "/graphql".
    pub endpoint: String,
    /// Playground page path, e.g. "/playground".
    pub playground: String,
    /// Whether the playground route is registered at all.
    pub playground_enabled: bool,
}

impl Merge for GraphqlConfig {
    fn merge(&mut self, other: Self) {
        overlay(&mut self.endpoint, other.endpoint);
        overlay(&mut self.playground, other.playground);
        overlay(&mut self.playground_enabled, other.playground_enabled);
    }
}
