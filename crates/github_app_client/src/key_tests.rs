use super::*;
use rand::thread_rng;
use rsa::{pkcs8::EncodePrivateKey, RsaPrivateKey};
use std::io::Write;

fn create_test_pem() -> String {
    let mut rng = thread_rng();
    let bits = 2048;
    let private_key = RsaPrivateKey::new(&mut rng, bits).expect("Failed to generate key");
    private_key
        .to_pkcs8_pem(Default::default())
        .unwrap()
        .to_string()
}

#[test]
fn test_load_private_key_success() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(create_test_pem().as_bytes())
        .expect("Failed to write key");

    let result = load_private_key(file.path());

    assert!(result.is_ok());
}

#[test]
fn test_load_private_key_missing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("does-not-exist.pem");

    let result = load_private_key(&path);

    assert!(matches!(result, Err(Error::KeyUnreadable(p, _)) if p == path));
}

#[test]
fn test_load_private_key_malformed_contents() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"this is not a PEM private key")
        .expect("Failed to write file");

    let result = load_private_key(file.path());

    assert!(matches!(result, Err(Error::KeyMalformed(_, _))));
}
