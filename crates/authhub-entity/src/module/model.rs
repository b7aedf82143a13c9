//! Module entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A feature-area grant with a navigation route tree.
///
/// Modules gate what the UI renders; the decision engine never consults
/// them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Module {
    /// Unique module identifier.
    pub id: Uuid,
    /// Unique module name.
    pub name: String,
    /// What the module covers.
    pub description: String,
    /// Inactive modules are hidden from navigation.
    pub is_active: bool,
    /// Built-in modules cannot be removed by administrators.
    pub is_system_module: bool,
    /// Navigation route tree.
    #[sqlx(json)]
    pub routes: Vec<Route>,
    /// When the module was created.
    pub created_at: DateTime<Utc>,
    /// When the module was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A navigation route node. Routes nest arbitrarily through `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Display name.
    pub name: String,
    /// Route path.
    pub path: String,
    /// Landing path when the node is a section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_path: Option<String>,
    /// Icon identifier.
    pub icon: String,
    /// Hidden when inactive.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Child routes.
    #[serde(default)]
    pub children: Vec<Route>,
}

fn default_true() -> bool {
    true
}

/// Data required to create a new module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateModule {
    /// Unique module name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Built-in flag.
    #[serde(default)]
    pub is_system_module: bool,
    /// Navigation route tree.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// Data for updating an existing module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateModule {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// Replacement route tree.
    pub routes: Option<Vec<Route>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_tree_round_trips_with_defaults() {
        let json = serde_json::json!({
            "name": "Pages",
            "path": "/pages",
            "icon": "dashboard",
            "children": [
                { "name": "Users", "path": "/users", "icon": "users" }
            ]
        });
        let route: Route = serde_json::from_value(json).unwrap();
        assert!(route.is_active);
        assert_eq!(route.children.len(), 1);
        assert!(route.children[0].children.is_empty());
        assert!(route.init_path.is_none());
    }
}
