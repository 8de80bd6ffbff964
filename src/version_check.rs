use std::time::Duration;

use semver::Version;
use serde::Deserialize;

/// Registry endpoint describing the published crate.
const REGISTRY_URL: &str = "https://crates.io/api/v1/crates/hasura2casbin";

#[derive(Debug, Deserialize)]
struct RegistryResponse {
    #[serde(rename = "crate")]
    krate: RegistryCrate,
}

#[derive(Debug, Deserialize)]
struct RegistryCrate {
    max_version: String,
}

/// Latest published version, when strictly newer than the running binary.
///
/// Best-effort: registry, transport, and parse failures all degrade to
/// `None` so the check never blocks a generation run.
pub fn check_latest_version() -> Option<Version> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .ok()?;

    let response: RegistryResponse = client
        .get(REGISTRY_URL)
        // crates.io rejects requests without a user agent.
        .header(
            reqwest::header::USER_AGENT,
            concat!("hasura2casbin/", env!("CARGO_PKG_VERSION")),
        )
        .send()
        .ok()?
        .json()
        .ok()?;

    newer_release(env!("CARGO_PKG_VERSION"), &response.krate.max_version)
}

/// `Some(latest)` when both versions parse and `latest` is strictly newer.
pub fn newer_release(current: &str, latest: &str) -> Option<Version> {
    let current = Version::parse(current).ok()?;
    let latest = Version::parse(latest).ok()?;
    (latest > current).then_some(latest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_release_detects_a_later_version() {
        assert_eq!(
            newer_release("0.1.0", "0.2.1"),
            Some(Version::new(0, 2, 1))
        );
        assert_eq!(newer_release("1.4.0", "2.0.0"), Some(Version::new(2, 0, 0)));
    }

    #[test]
    fn newer_release_ignores_equal_or_older_versions() {
        assert_eq!(newer_release("0.1.0", "0.1.0"), None);
        assert_eq!(newer_release("0.2.0", "0.1.9"), None);
    }

    #[test]
    fn newer_release_ignores_unparseable_versions() {
        assert_eq!(newer_release("0.1.0", "latest"), None);
        assert_eq!(newer_release("not-a-version", "0.2.0"), None);
    }

    #[test]
    fn registry_response_decodes_the_max_version() {
        let response: RegistryResponse =
            serde_json::from_str(r#"{"crate": {"max_version": "0.3.2", "name": "hasura2casbin"}}"#)
                .expect("registry payload should decode");
        assert_eq!(response.krate.max_version, "0.3.2");
    }
}
