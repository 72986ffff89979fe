use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

fn default_introspection() -> bool {
    true
}

/// Configuration for GraphQL execution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, default)]
pub struct GraphQL {
    /// Answer introspection queries.
    #[serde(default = "default_introspection")]
    pub introspection: bool,

    /// Reject operations nested deeper than this.
    pub max_depth: Option<usize>,
}

#[buildstructor::buildstructor]
impl GraphQL {
    #[builder]
    pub fn new(introspection: Option<bool>, max_depth: Option<usize>) -> Self {
        Self {
            introspection: introspection.unwrap_or_else(default_introspection),
            max_depth,
        }
    }
}

impl Default for GraphQL {
    fn default() -> Self {
        Self::builder().build()
    }
}
