use reqwest::blocking::Client;
use serde_json::json;

use crate::error::Error;
use crate::metadata::types::Metadata;

/// Header carrying the Hasura admin secret.
const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// Retrieve and decode the metadata export from a running Hasura instance.
///
/// Posts an `export_metadata` request to `<endpoint>/v1/metadata`. The
/// response body is the metadata document itself; it is decoded into the
/// typed schema at this boundary so the deriver never sees malformed input.
pub fn fetch_metadata(endpoint: &str, admin_secret: Option<&str>) -> Result<Metadata, Error> {
    let url = metadata_url(endpoint);
    let client = Client::new();

    let mut request = client
        .post(&url)
        .json(&json!({"type": "export_metadata", "args": {}}));
    if let Some(secret) = admin_secret {
        request = request.header(ADMIN_SECRET_HEADER, secret);
    }

    let response = request.send().map_err(|source| Error::MetadataRequest {
        url: url.clone(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::MetadataStatus { url, status });
    }

    response
        .json::<Metadata>()
        .map_err(|source| Error::MetadataDecode { url, source })
}

/// Metadata endpoint URL for a configured Hasura base endpoint.
pub fn metadata_url(endpoint: &str) -> String {
    format!("{}/v1/metadata", endpoint.trim_end_matches('/'))
}
