use hasura2casbin::generator::policy_deriver;
use hasura2casbin::metadata::types::Metadata;
use hasura2casbin::output::renderer::{self, MODULE_FOOTER, MODULE_HEADER};

fn load_blog() -> Metadata {
    let raw = std::fs::read_to_string("tests/fixtures/blog/metadata.json")
        .expect("fixture metadata should be readable");
    serde_json::from_str(&raw).expect("fixture metadata should decode")
}

fn blog_roles() -> Vec<String> {
    ["admin", "editor", "viewer", "moderator"]
        .iter()
        .map(|role| role.to_string())
        .collect()
}

/// Full pipeline acceptance test: fixture metadata in, exact module out.
#[test]
fn end_to_end_blog_module() {
    let metadata = load_blog();

    // Stage 1: derive
    let statements = policy_deriver::derive_policies(&metadata, &blog_roles());

    // Stage 2: render
    let module = renderer::render_module(&statements);

    let expected_block = "\
p, admin, posts, (list)|(create)
p, admin, posts/*, (edit)|(show)|(delete)
p, admin, comments, (list)|(create)
p, admin, comments/*, (edit)|(show)|(delete)
p, admin, sendEmail, (list)
p, admin, exportReport, (list)
p, editor, posts, (list)|(create)
p, editor, posts/*, (edit)|(show)
p, editor, sendEmail, (list)
p, viewer, posts, (list)
p, viewer, posts/*, (show)
p, viewer, comments, (list)
p, viewer, comments/*, (show)
p, moderator, comments/*, (delete)
";

    assert_eq!(module, format!("{MODULE_HEADER}{expected_block}{MODULE_FOOTER}"));
}

/// The same document rendered twice is byte-identical.
#[test]
fn end_to_end_blog_is_reproducible() {
    let metadata = load_blog();
    let roles = blog_roles();

    let first = renderer::render_module(&policy_deriver::derive_policies(&metadata, &roles));
    let second = renderer::render_module(&policy_deriver::derive_policies(&metadata, &roles));

    assert_eq!(first, second);
}

/// An empty role list still renders a well-formed module: header and footer
/// with no policy lines between them.
#[test]
fn end_to_end_empty_roles_renders_fixed_blocks_only() {
    let metadata = load_blog();

    let statements = policy_deriver::derive_policies(&metadata, &[]);
    let module = renderer::render_module(&statements);

    assert_eq!(module, format!("{MODULE_HEADER}{MODULE_FOOTER}"));
    assert!(
        !module.contains("\np, "),
        "no policy rows should be rendered for an empty role list"
    );
}
