use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;

use super::{CredentialStorage, StorageError, DEFAULT_TOKEN_KEY};

/// Owns the single bearer credential held by the client.
///
/// The stored form is the token's bytes reversed and then base64 encoded.
/// This is obfuscation only: anyone with access to the storage slot can
/// recover the token. It is not a security control.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn CredentialStorage>,
    key: String,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn CredentialStorage>) -> Self {
        Self::with_key(storage, DEFAULT_TOKEN_KEY)
    }

    pub fn with_key(storage: Arc<dyn CredentialStorage>, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    /// Decoded credential, or `None` when nothing usable is stored.
    ///
    /// An undecodable value is purged before returning `None`. Errors are
    /// reserved for the storage slot itself failing.
    pub fn get(&self) -> Result<Option<String>, StorageError> {
        let Some(encoded) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };

        match decode_token(&encoded) {
            Some(token) => Ok(Some(token)),
            None => {
                tracing::warn!("Stored credential could not be decoded, purging it");
                self.storage.remove_item(&self.key)?;
                Ok(None)
            }
        }
    }

    pub fn set(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(&self.key, &encode_token(token))
    }

    pub fn remove(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)
    }
}

pub fn encode_token(token: &str) -> String {
    let reversed: Vec<u8> = token.bytes().rev().collect();
    BASE64.encode(reversed)
}

pub fn decode_token(encoded: &str) -> Option<String> {
    let mut bytes = BASE64.decode(encoded.trim()).ok()?;
    bytes.reverse();
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, MockCredentialStorage};

    fn store() -> (TokenStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (TokenStore::new(storage.clone()), storage)
    }

    #[test]
    fn test_set_then_get_returns_original() {
        let (tokens, _) = store();
        for token in [
            "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxIn0.sig",
            "",
            "contraseña-ñandú-✓",
            "a b\tc",
        ] {
            tokens.set(token).unwrap();
            assert_eq!(tokens.get().unwrap().as_deref(), Some(token));
        }
    }

    #[test]
    fn test_stored_value_is_not_plain_text() {
        let (tokens, storage) = store();
        tokens.set("secret-token").unwrap();
        let raw = storage.get_item(DEFAULT_TOKEN_KEY).unwrap().unwrap();
        assert_ne!(raw, "secret-token");
        assert_eq!(decode_token(&raw).as_deref(), Some("secret-token"));
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let (tokens, _) = store();
        tokens.set("first").unwrap();
        tokens.set("second").unwrap();
        assert_eq!(tokens.get().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_invalid_encoding_is_purged() {
        let (tokens, storage) = store();
        storage.set_item(DEFAULT_TOKEN_KEY, "%%% not base64 %%%").unwrap();

        assert_eq!(tokens.get().unwrap(), None);
        assert_eq!(storage.get_item(DEFAULT_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_non_utf8_payload_is_purged() {
        let (tokens, storage) = store();
        storage
            .set_item(DEFAULT_TOKEN_KEY, &BASE64.encode([0xff, 0xfe, 0xfd]))
            .unwrap();

        assert_eq!(tokens.get().unwrap(), None);
        assert_eq!(storage.get_item(DEFAULT_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_remove_is_unconditional() {
        let (tokens, _) = store();
        tokens.remove().unwrap();
        tokens.set("token").unwrap();
        tokens.remove().unwrap();
        assert_eq!(tokens.get().unwrap(), None);
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let storage = Arc::new(MemoryStorage::new());
        let admin = TokenStore::with_key(storage.clone(), "admin_token");
        let default = TokenStore::new(storage);

        admin.set("admin").unwrap();
        assert_eq!(default.get().unwrap(), None);
        assert_eq!(admin.get().unwrap().as_deref(), Some("admin"));
    }

    #[test]
    fn test_storage_failure_is_an_error_not_absent() {
        let mut storage = MockCredentialStorage::new();
        storage.expect_get_item().returning(|_| {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        });
        storage.expect_remove_item().never();

        let tokens = TokenStore::new(Arc::new(storage));
        assert!(matches!(tokens.get(), Err(StorageError::Io(_))));
    }

    #[test]
    fn test_logout_and_login_recover_from_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"auth_token": "abc"#).unwrap();
        let tokens = TokenStore::new(Arc::new(crate::storage::FileStorage::new(&path)));

        assert!(matches!(tokens.get(), Err(StorageError::Corrupt(_))));
        assert!(tokens.remove().is_ok());
        assert_eq!(tokens.get().unwrap(), None);

        tokens.set("new-session").unwrap();
        assert_eq!(tokens.get().unwrap().as_deref(), Some("new-session"));
    }
}
