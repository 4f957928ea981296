use std::time::Duration;

use m2_mirror::client::{Credentials, NexusClient, NexusClientConfig};

fn base_config() -> NexusClientConfig {
    NexusClientConfig {
        repo_url: "https://nexus.internal:8443/".to_string(),
        repo_id: "releases".to_string(),
        auth: Some(Credentials {
            username: "deploy".to_string(),
            password: "secret".to_string(),
        }),
        insecure: false,
        timeout: Duration::from_secs(20),
    }
}

#[test]
fn client_builds_with_default_tls_verification() {
    let client = NexusClient::new(base_config());
    assert!(client.is_ok(), "client construction should succeed");
}

#[test]
fn client_builds_with_insecure_opt_in() {
    let config = NexusClientConfig {
        insecure: true,
        ..base_config()
    };
    let client = NexusClient::new(config);
    assert!(
        client.is_ok(),
        "client construction with --insecure should succeed"
    );
}

#[test]
fn client_builds_without_credentials() {
    let config = NexusClientConfig {
        auth: None,
        ..base_config()
    };
    assert!(NexusClient::new(config).is_ok());
}
