use super::*;
use crate::Operation;

fn base_cli(operation: Operation) -> Cli {
    Cli {
        username: Some("my-app".to_string()),
        app_id: Some("12345".to_string()),
        private_key_file: Some(PathBuf::from("key.pem")),
        installation_id: None,
        repository: None,
        owner: None,
        repo: None,
        organization: None,
        user: None,
        domain: None,
        operation,
    }
}

#[test]
fn test_from_cli_success_absolutizes_key_path() {
    let cli = base_cli(Operation::Get);

    let config = HelperConfig::from_cli(&cli).unwrap();

    assert_eq!(config.username, "my-app");
    assert_eq!(config.app_id, "12345");
    assert!(config.private_key_file.is_absolute());
    assert!(config.private_key_file.ends_with("key.pem"));
}

#[test]
fn test_from_cli_missing_username() {
    let mut cli = base_cli(Operation::Get);
    cli.username = None;

    let result = HelperConfig::from_cli(&cli);

    assert!(matches!(result, Err(Error::InvalidArguments(msg)) if msg.contains("--username")));
}

#[test]
fn test_from_cli_missing_app_id() {
    let mut cli = base_cli(Operation::Get);
    cli.app_id = None;

    let result = HelperConfig::from_cli(&cli);

    assert!(matches!(result, Err(Error::InvalidArguments(msg)) if msg.contains("--app-id")));
}

#[test]
fn test_from_cli_missing_private_key_file() {
    let mut cli = base_cli(Operation::Get);
    cli.private_key_file = None;

    let result = HelperConfig::from_cli(&cli);

    assert!(
        matches!(result, Err(Error::InvalidArguments(msg)) if msg.contains("--private-key-file"))
    );
}

#[test]
fn test_from_cli_empty_username_is_missing() {
    let mut cli = base_cli(Operation::Get);
    cli.username = Some(String::new());

    let result = HelperConfig::from_cli(&cli);

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
}

#[test]
fn test_api_base_defaults_to_public() {
    let cli = base_cli(Operation::Get);

    let config = HelperConfig::from_cli(&cli).unwrap();

    assert_eq!(config.api_base(), ApiBase::Public);
}

#[test]
fn test_api_base_with_domain_is_enterprise() {
    let mut cli = base_cli(Operation::Get);
    cli.domain = Some("ghe.example.com".to_string());

    let config = HelperConfig::from_cli(&cli).unwrap();

    assert_eq!(
        config.api_base(),
        ApiBase::Enterprise("ghe.example.com".to_string())
    );
}

#[test]
fn test_selector_explicit_id_wins_over_other_fragments() {
    let mut cli = base_cli(Operation::Get);
    cli.installation_id = Some(42);
    cli.organization = Some("octo-org".to_string());
    cli.user = Some("octocat".to_string());

    let selector = selector_from_cli(&cli).unwrap();

    assert_eq!(selector, InstallationSelector::Id(42));
}

#[test]
fn test_selector_repository_slug() {
    let mut cli = base_cli(Operation::Get);
    cli.repository = Some("Octo-Org/Widgets".to_string());

    let selector = selector_from_cli(&cli).unwrap();

    // Case is preserved here; the resolver lower-cases at lookup time.
    assert_eq!(
        selector,
        InstallationSelector::Repository {
            owner: "Octo-Org".to_string(),
            repo: "Widgets".to_string(),
        }
    );
}

#[test]
fn test_selector_owner_and_repo_pair() {
    let mut cli = base_cli(Operation::Get);
    cli.owner = Some("octo-org".to_string());
    cli.repo = Some("widgets".to_string());

    let selector = selector_from_cli(&cli).unwrap();

    assert_eq!(
        selector,
        InstallationSelector::Repository {
            owner: "octo-org".to_string(),
            repo: "widgets".to_string(),
        }
    );
}

#[test]
fn test_selector_owner_without_repo_is_invalid() {
    let mut cli = base_cli(Operation::Get);
    cli.owner = Some("octo-org".to_string());

    let result = selector_from_cli(&cli);

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
}

#[test]
fn test_selector_malformed_slug_is_invalid() {
    for slug in ["widgets", "octo-org/", "/widgets", "a/b/c"] {
        let mut cli = base_cli(Operation::Get);
        cli.repository = Some(slug.to_string());

        let result = selector_from_cli(&cli);

        assert!(
            matches!(result, Err(Error::InvalidArguments(_))),
            "slug `{slug}` should be rejected"
        );
    }
}

#[test]
fn test_selector_no_fragments_is_ambiguous() {
    let cli = base_cli(Operation::Get);

    let result = selector_from_cli(&cli);

    assert!(matches!(
        result,
        Err(Error::Client(github_app_client::Error::AmbiguousSelector))
    ));
}
