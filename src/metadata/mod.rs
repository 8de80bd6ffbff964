/// HTTP retrieval of the metadata export from a running Hasura instance.
pub mod fetch;
/// Typed schema for the parts of a metadata export that drive policy derivation.
pub mod types;
