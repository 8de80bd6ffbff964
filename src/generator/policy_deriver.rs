//! Policy derivation from metadata permission grants.
//!
//! For every (role, resource) pair the deriver computes two grant groups:
//! *generic* actions apply to the resource collection as a whole (`(list)`,
//! `(create)`) and match the bare resource name; *specific* actions apply to
//! a single item (`(edit)`, `(show)`, `(delete)`) and match the resource
//! name suffixed with `/*`. Each non-empty group becomes exactly one policy
//! statement whose action pattern is the `|`-joined alternation of its
//! tokens, so a request's action is matched by `regexMatch` against literal
//! parenthesized markers.
//!
//! Output order is fixed: roles in caller order, then within each role all
//! tables in document order (sources before their tables), then all actions
//! in document order. Derivation is a pure function of its inputs; running
//! it twice yields byte-identical statements.

use crate::metadata::types::{Action, Metadata, PermissionEntry, Table};

/// Role treated as holding every permission on every resource, regardless of
/// the document's explicit grants.
pub const ADMIN_ROLE: &str = "admin";

/// One grantable action category.
///
/// The string forms are literal markers, chosen so that `regexMatch` treats
/// the parentheses as part of the token rather than grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionToken {
    /// List the resource collection (generic).
    List,
    /// Create a new item in the collection (generic).
    Create,
    /// Edit a single item (specific).
    Edit,
    /// View a single item (specific).
    Show,
    /// Delete a single item (specific).
    Delete,
}

impl ActionToken {
    /// Literal marker as it appears in the rendered policy line.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionToken::List => "(list)",
            ActionToken::Create => "(create)",
            ActionToken::Edit => "(edit)",
            ActionToken::Show => "(show)",
            ActionToken::Delete => "(delete)",
        }
    }
}

/// One row of the generated policy block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyStatement {
    /// Role the row applies to.
    pub role: String,
    /// Bare resource name (generic group) or `<name>/*` (specific group).
    pub resource_pattern: String,
    /// `|`-joined alternation of granted action markers.
    pub action_pattern: String,
}

/// Granted actions for one (role, resource) pair, split by group.
#[derive(Debug, Clone, Default)]
struct GrantSet {
    generic: Vec<ActionToken>,
    specific: Vec<ActionToken>,
}

/// Derive the ordered policy statements for `roles` over `metadata`.
pub fn derive_policies(metadata: &Metadata, roles: &[String]) -> Vec<PolicyStatement> {
    let mut statements = Vec::new();

    for role in roles {
        for source in &metadata.sources {
            for table in &source.tables {
                push_statements(&mut statements, role, table.name(), &table_grants(table, role));
            }
        }
        for action in &metadata.actions {
            push_statements(&mut statements, role, &action.name, &action_grants(action, role));
        }
    }

    statements
}

/// Whether `role` appears in `permissions`, or is the implicit-all admin.
pub fn is_granted(permissions: &[PermissionEntry], role: &str) -> bool {
    role == ADMIN_ROLE || permissions.iter().any(|entry| entry.role == role)
}

/// Grants a role holds on a table, in fixed intra-group order.
///
/// Select permission grants both `(list)` and `(show)`: listing the
/// collection implies viewing its items.
fn table_grants(table: &Table, role: &str) -> GrantSet {
    let mut grants = GrantSet::default();

    if is_granted(&table.select_permissions, role) {
        grants.generic.push(ActionToken::List);
    }
    if is_granted(&table.insert_permissions, role) {
        grants.generic.push(ActionToken::Create);
    }
    if is_granted(&table.update_permissions, role) {
        grants.specific.push(ActionToken::Edit);
    }
    if is_granted(&table.select_permissions, role) {
        grants.specific.push(ActionToken::Show);
    }
    if is_granted(&table.delete_permissions, role) {
        grants.specific.push(ActionToken::Delete);
    }

    grants
}

/// Grants a role holds on a custom action. Actions are invocations, not item
/// collections, so they only ever produce a generic `(list)` grant.
fn action_grants(action: &Action, role: &str) -> GrantSet {
    let mut grants = GrantSet::default();
    if is_granted(&action.permissions, role) {
        grants.generic.push(ActionToken::List);
    }
    grants
}

/// Emit at most two statements for a (role, resource) pair: one per
/// non-empty group. An empty group emits nothing.
fn push_statements(
    statements: &mut Vec<PolicyStatement>,
    role: &str,
    resource: &str,
    grants: &GrantSet,
) {
    if !grants.generic.is_empty() {
        statements.push(PolicyStatement {
            role: role.to_string(),
            resource_pattern: resource.to_string(),
            action_pattern: join_tokens(&grants.generic),
        });
    }
    if !grants.specific.is_empty() {
        statements.push(PolicyStatement {
            role: role.to_string(),
            resource_pattern: format!("{resource}/*"),
            action_pattern: join_tokens(&grants.specific),
        });
    }
}

fn join_tokens(tokens: &[ActionToken]) -> String {
    tokens
        .iter()
        .map(|token| token.as_str())
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(role: &str) -> PermissionEntry {
        PermissionEntry {
            role: role.to_string(),
        }
    }

    #[test]
    fn is_granted_matches_listed_roles() {
        let permissions = vec![entry("editor"), entry("viewer")];
        assert!(is_granted(&permissions, "editor"));
        assert!(is_granted(&permissions, "viewer"));
        assert!(!is_granted(&permissions, "guest"));
    }

    #[test]
    fn is_granted_treats_admin_as_implicit_all() {
        assert!(is_granted(&[], ADMIN_ROLE));
        assert!(is_granted(&[entry("editor")], ADMIN_ROLE));
    }

    #[test]
    fn action_tokens_render_as_literal_markers() {
        assert_eq!(ActionToken::List.as_str(), "(list)");
        assert_eq!(ActionToken::Create.as_str(), "(create)");
        assert_eq!(ActionToken::Edit.as_str(), "(edit)");
        assert_eq!(ActionToken::Show.as_str(), "(show)");
        assert_eq!(ActionToken::Delete.as_str(), "(delete)");
    }

    #[test]
    fn join_tokens_builds_the_alternation() {
        assert_eq!(
            join_tokens(&[ActionToken::Edit, ActionToken::Show, ActionToken::Delete]),
            "(edit)|(show)|(delete)"
        );
        assert_eq!(join_tokens(&[ActionToken::List]), "(list)");
    }
}
