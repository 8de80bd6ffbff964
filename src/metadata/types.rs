//! Typed schema for a Hasura metadata export.
//!
//! Only the fields that drive policy derivation are decoded: table and
//! action names plus their per-role permission lists. Everything else the
//! export carries (column grants, row filters, relationships, event
//! triggers) is ignored by the decoder. Permission lists and collections
//! default to empty when absent, so a minimal export decodes without
//! special-casing.

use serde::Deserialize;

/// A Hasura metadata export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    /// Data sources in document order.
    #[serde(default)]
    pub sources: Vec<Source>,
    /// Custom actions in document order.
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One data source and its tracked tables.
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    /// Source name.
    pub name: String,
    /// Tracked tables in document order.
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// A tracked table and its permission lists.
#[derive(Debug, Clone, Deserialize)]
pub struct Table {
    /// Qualified table identifier.
    pub table: TableName,
    /// Roles granted `select` on this table.
    #[serde(default)]
    pub select_permissions: Vec<PermissionEntry>,
    /// Roles granted `insert` on this table.
    #[serde(default)]
    pub insert_permissions: Vec<PermissionEntry>,
    /// Roles granted `update` on this table.
    #[serde(default)]
    pub update_permissions: Vec<PermissionEntry>,
    /// Roles granted `delete` on this table.
    #[serde(default)]
    pub delete_permissions: Vec<PermissionEntry>,
}

impl Table {
    /// Bare table name, used as the policy resource name.
    pub fn name(&self) -> &str {
        &self.table.name
    }
}

/// Qualified table identifier as Hasura exports it.
#[derive(Debug, Clone, Deserialize)]
pub struct TableName {
    /// Table name.
    pub name: String,
    /// Database schema, when the export qualifies it.
    #[serde(default)]
    pub schema: Option<String>,
}

/// A custom action and the roles allowed to invoke it.
#[derive(Debug, Clone, Deserialize)]
pub struct Action {
    /// Action name, used as the policy resource name.
    pub name: String,
    /// Roles granted this action.
    #[serde(default)]
    pub permissions: Vec<PermissionEntry>,
}

/// One role's presence in a permission list.
///
/// Presence is the grant; the rule payload Hasura stores next to the role
/// (filters, column sets) does not affect derivation and is not decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionEntry {
    /// Granted role.
    pub role: String,
}
