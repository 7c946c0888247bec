//! Feature toggles.

use serde::Deserialize;

use super::merge::{Merge, overlay};

/// Feature switches for the optional API surfaces.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Marks the GraphQL surface as wanted; only logged at startup for now.
    pub enable_graphql: bool,
    /// Serves the REST `/users` endpoint.
    pub enable_rest: bool,
}

impl Merge for FeaturesConfig {
    fn merge(&mut self, other: Self) {
        overlay(&mut self.enable_graphql, other.enable_graphql);
        overlay(&mut self.enable_rest, other.enable_rest);
    }
}
