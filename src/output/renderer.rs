//! Renders the generated policy module.
//!
//! The artifact is a TypeScript/JavaScript source file in three parts: a
//! fixed header that declares the `Casbin` model and opens the string
//! adapter, the derived policy block, and a fixed footer that closes the
//! adapter and exports the enforcer factory. Header and footer are named
//! constants so the artifact grammar can be tested without touching disk.

use std::fmt::Write;

use crate::generator::policy_deriver::PolicyStatement;

/// Module header: casbin imports, the RBAC model, and the opening of the
/// policy string adapter.
///
/// The matcher resolves role inheritance on the subject, key-matches the
/// object so `posts/*` patterns cover item paths, and regex-matches the
/// action against the literal parenthesized markers.
pub const MODULE_HEADER: &str = r"import {newEnforcer, newModel, StringAdapter} from 'casbin';

export const casbinModel = newModel(`
[request_definition]
r = sub, obj, act

[policy_definition]
p = sub, obj, act, eft

[role_definition]
g = _, _

[policy_effect]
e = some(where (p.eft == allow)) && !some(where (p.eft == deny))

[matchers]
m = g(r.sub, p.sub) && keyMatch(r.obj, p.obj) && regexMatch(r.act, p.act)
`);

export const casbinAdapter = new StringAdapter(`
";

/// Module footer: closes the string adapter and exports the enforcer factory.
pub const MODULE_FOOTER: &str =
    "`);\n\nexport const getCasbinEnforcer = async () => {\n\treturn await newEnforcer(casbinModel, casbinAdapter);\n};";

/// Render the complete policy module for the given statements.
///
/// Statements appear one per line, in deriver order, between header and
/// footer. An empty statement list still renders both fixed blocks.
pub fn render_module(statements: &[PolicyStatement]) -> String {
    let mut module = String::with_capacity(
        MODULE_HEADER.len() + MODULE_FOOTER.len() + statements.len() * 48,
    );

    module.push_str(MODULE_HEADER);
    for statement in statements {
        writeln!(
            module,
            "p, {}, {}, {}",
            statement.role, statement.resource_pattern, statement.action_pattern
        )
        .unwrap();
    }
    module.push_str(MODULE_FOOTER);

    module
}
