use super::*;
use github_app_client::models::Account;

fn installation(id: u64, login: &str, account_type: &str) -> Installation {
    Installation {
        id,
        account: Account {
            login: login.to_string(),
            html_url: format!("https://github.com/{login}"),
            account_type: account_type.to_string(),
        },
    }
}

fn settings(domain: Option<&str>) -> GeneratorSettings {
    GeneratorSettings {
        username: "my-app".to_string(),
        app_id: "12345".to_string(),
        private_key_file: PathBuf::from("/keys/app.pem"),
        domain: domain.map(str::to_string),
    }
}

#[test]
fn test_render_one_stanza_per_installation_in_order() {
    let installations = vec![
        installation(7, "octo-org", "Organization"),
        installation(9, "octocat", "User"),
    ];
    let mut out = Vec::new();

    render(&mut out, &installations, &settings(None)).unwrap();

    let rendered = String::from_utf8(out).unwrap();
    assert_eq!(
        rendered,
        "[credential \"https://github.com/octo-org\"]\n\
         \tuseHttpPath = true\n\
         \thelper = \"github-app --username my-app --app-id 12345 --private-key-file /keys/app.pem --installation-id 7\"\n\
         [credential \"https://github.com/octocat\"]\n\
         \tuseHttpPath = true\n\
         \thelper = \"github-app --username my-app --app-id 12345 --private-key-file /keys/app.pem --installation-id 9\"\n\
         [credential \"https://github.com\"]\n\
         \thelper = \"cache --timeout=43200\"\n\
         [url \"https://github.com\"]\n\
         \tinsteadOf = ssh://git@github.com\n"
    );
}

#[test]
fn test_render_no_installations_still_emits_shared_stanzas() {
    let mut out = Vec::new();

    render(&mut out, &[], &settings(None)).unwrap();

    let rendered = String::from_utf8(out).unwrap();
    assert_eq!(
        rendered,
        "[credential \"https://github.com\"]\n\
         \thelper = \"cache --timeout=43200\"\n\
         [url \"https://github.com\"]\n\
         \tinsteadOf = ssh://git@github.com\n"
    );
}

#[test]
fn test_render_enterprise_domain_used_for_cache_and_rewrite() {
    let mut out = Vec::new();

    render(&mut out, &[], &settings(Some("ghe.example.com"))).unwrap();

    let rendered = String::from_utf8(out).unwrap();
    assert!(rendered.contains("[credential \"https://ghe.example.com\"]"));
    assert!(rendered.contains("[url \"https://ghe.example.com\"]"));
    assert!(rendered.contains("insteadOf = ssh://git@ghe.example.com"));
}
