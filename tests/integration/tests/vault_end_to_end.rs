//! End-to-end vault tests against the file-backed store.
//!
//! These tests go through the service layer and then inspect the file on
//! disk, checking what an attacker with a copy of the vault file would see.

use passvault_integration_tests::{gmail_record, open_service, vault_path};
use passvault_vault::{
    Envelope, OpenedField, RecordUpdate, SecretKey, DECRYPTION_FAILED_SENTINEL,
};
use tempfile::TempDir;

fn read_documents(path: &std::path::Path) -> Vec<serde_json::Value> {
    let data = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&data).unwrap()
}

#[tokio::test]
async fn test_create_reopen_and_read() {
    let dir = TempDir::new().unwrap();
    let path = vault_path(dir.path());
    let key = SecretKey::generate();

    let id = {
        let service = open_service(&path, &key).await;
        service.create("alice", &gmail_record()).await.unwrap()
    };

    let service = open_service(&path, &key).await;
    let entry = service.get(&id, "alice").await.unwrap();
    assert_eq!(entry.record.title.value(), Some("Gmail"));
    assert_eq!(entry.record.username.value(), Some("a@b.com"));
    assert_eq!(entry.record.password.value(), Some("p@ss"));
    assert_eq!(
        entry.record.url.as_ref().and_then(OpenedField::value),
        Some("https://gmail.com")
    );
    assert!(entry.record.notes.is_none(), "notes must stay absent");
}

#[tokio::test]
async fn test_vault_file_holds_no_plaintext() {
    let dir = TempDir::new().unwrap();
    let path = vault_path(dir.path());
    let service = open_service(&path, &SecretKey::generate()).await;
    service.create("alice", &gmail_record()).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    for secret in ["Gmail", "a@b.com", "p@ss", "gmail.com"] {
        assert!(!raw.contains(secret), "{secret} found in vault file");
    }

    let docs = read_documents(&path);
    assert_eq!(docs.len(), 1);
    let doc = &docs[0];
    assert_eq!(doc["userId"], "alice");
    assert!(doc["notes"].is_null());

    // Every sealed field is a JSON string holding a hex envelope.
    let envelope = Envelope::from_storage(doc["password"].as_str().unwrap()).unwrap();
    assert_eq!(envelope.nonce.len(), 24);
    assert!(envelope.ciphertext.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_wrong_key_shows_sentinels() {
    let dir = TempDir::new().unwrap();
    let path = vault_path(dir.path());

    let id = open_service(&path, &SecretKey::generate())
        .await
        .create("alice", &gmail_record())
        .await
        .unwrap();

    let service = open_service(&path, &SecretKey::generate()).await;
    let entries = service.list("alice").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, id);
    assert_eq!(entries[0].record.password.display_value(), DECRYPTION_FAILED_SENTINEL);
    assert_eq!(
        entries[0].record.failed_fields(),
        vec!["title", "username", "password", "url"]
    );
}

#[tokio::test]
async fn test_tampered_field_is_isolated() {
    let dir = TempDir::new().unwrap();
    let path = vault_path(dir.path());
    let key = SecretKey::generate();

    let id = open_service(&path, &key)
        .await
        .create("alice", &gmail_record())
        .await
        .unwrap();

    // Flip one hex digit of the stored username ciphertext.
    let mut docs = read_documents(&path);
    let mut envelope = Envelope::from_storage(docs[0]["username"].as_str().unwrap()).unwrap();
    let first = envelope.ciphertext.remove(0);
    envelope
        .ciphertext
        .insert(0, if first == '0' { '1' } else { '0' });
    docs[0]["username"] = serde_json::Value::String(envelope.to_storage().unwrap());
    std::fs::write(&path, serde_json::to_string(&docs).unwrap()).unwrap();

    let service = open_service(&path, &key).await;
    let entry = service.get(&id, "alice").await.unwrap();
    assert_eq!(entry.record.username, OpenedField::Failed);
    assert_eq!(entry.record.title.value(), Some("Gmail"));
    assert_eq!(entry.record.password.value(), Some("p@ss"));
}

#[tokio::test]
async fn test_update_rewrites_only_named_fields_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = vault_path(dir.path());
    let key = SecretKey::generate();
    let service = open_service(&path, &key).await;

    let id = service.create("alice", &gmail_record()).await.unwrap();
    let before = read_documents(&path).remove(0);

    service
        .update(&id, "alice", &RecordUpdate::new().password("n3w-p@ss"))
        .await
        .unwrap();
    let after = read_documents(&path).remove(0);

    assert_ne!(after["password"], before["password"]);
    for field in ["title", "username", "url", "notes", "createdAt"] {
        assert_eq!(after[field], before[field], "{field} changed");
    }

    let reopened = open_service(&path, &key).await;
    let entry = reopened.get(&id, "alice").await.unwrap();
    assert_eq!(entry.record.password.value(), Some("n3w-p@ss"));
}

#[tokio::test]
async fn test_owners_are_isolated() {
    let dir = TempDir::new().unwrap();
    let path = vault_path(dir.path());
    let service = open_service(&path, &SecretKey::generate()).await;

    let id = service.create("alice", &gmail_record()).await.unwrap();
    service.create("bob", &gmail_record()).await.unwrap();

    assert_eq!(service.list("alice").await.unwrap().len(), 1);
    assert_eq!(service.list("bob").await.unwrap().len(), 1);
    assert!(service.get(&id, "bob").await.is_err());
    assert!(service.delete(&id, "bob").await.is_err());

    service.delete(&id, "alice").await.unwrap();
    assert!(service.list("alice").await.unwrap().is_empty());
    assert_eq!(read_documents(&path).len(), 1);
}
