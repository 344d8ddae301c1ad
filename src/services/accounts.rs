use std::sync::Arc;
use validator::Validate;

use crate::auth::{Credential, PasswordHasher, TokenService};
use crate::error::AppError;
use crate::store::{Store, StoreError};

/// Registration and login.
///
/// Registration: validate, hash, persist, report the new id.
/// Login: look up by email, verify the password, issue a token for the account.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Store>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>, hasher: PasswordHasher, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Creates an account and returns its id.
    ///
    /// Invalid input is rejected before the store is touched. Email uniqueness is
    /// left to the store, so two concurrent registrations cannot both succeed.
    pub async fn register(&self, credential: &Credential) -> Result<i32, AppError> {
        credential.validate().map_err(|e| {
            log::info!("Sign-up rejected for {:?}: {}", credential.email, e);
            AppError::ValidationError("Failed to sign up: wrong email or password".into())
        })?;

        let hasher = self.hasher;
        let password = credential.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {}", e)))??;

        let id = self
            .store
            .create_account(&credential.email, &password_hash)
            .await
            .map_err(|e| {
                if e == StoreError::DuplicateEmail {
                    log::info!("Sign-up rejected: {:?} is already registered", credential.email);
                }
                AppError::from(e)
            })?;

        log::info!("New account has been created successfully, user_id={}", id);
        Ok(id)
    }

    /// Verifies the credential and returns a bearer token for the account.
    pub async fn login(&self, credential: &Credential) -> Result<String, AppError> {
        let account = match self.store.find_account_by_email(&credential.email).await {
            Ok(account) => account,
            Err(StoreError::NotFound) => {
                log::warn!("Sign-in failed: no account for {:?}", credential.email);
                return Err(AppError::IncorrectEmail);
            }
            Err(e) => return Err(e.into()),
        };

        let hasher = self.hasher;
        let password = credential.password.clone();
        let stored_hash = account.password_hash;
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&stored_hash, &password))
            .await
            .map_err(|e| {
                AppError::InternalError(format!("Password verification task failed: {}", e))
            })?;

        if !matches {
            log::warn!("Sign-in failed: wrong password for user_id={}", account.id);
            return Err(AppError::IncorrectPassword);
        }

        let token = self.tokens.issue(account.id)?;
        log::info!("Signed in user_id={}", account.id);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::MIN_COST;
    use crate::services::test_support::RecordingStore;
    use crate::store::MemoryStore;

    const SECRET: &[u8] = b"account_service_secret";

    fn service_with(store: Arc<dyn Store>) -> AccountService {
        AccountService::new(
            store,
            PasswordHasher::new(MIN_COST),
            Arc::new(TokenService::new(SECRET)),
        )
    }

    #[actix_rt::test]
    async fn test_register_returns_new_id_and_stores_hash() {
        let store = Arc::new(MemoryStore::new());
        let service = service_with(store.clone());

        let id = service
            .register(&Credential::new("sergeev2004@mailbox.ru", "@valeriy"))
            .await
            .unwrap();
        assert_eq!(id, 1);

        let account = store
            .find_account_by_email("sergeev2004@mailbox.ru")
            .await
            .unwrap();
        assert_ne!(account.password_hash, "@valeriy");
        assert!(!account.password_hash.contains("@valeriy"));
        assert!(PasswordHasher::new(MIN_COST).verify(&account.password_hash, "@valeriy"));
    }

    #[actix_rt::test]
    async fn test_invalid_registration_never_reaches_store() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(store.clone());

        for credential in [
            Credential::new("", "@valeriy"),
            Credential::new("no-domain", "@valeriy"),
            Credential::new("a@b.c", "12345"),
        ] {
            let result = service.register(&credential).await;
            assert!(
                matches!(result, Err(AppError::ValidationError(_))),
                "{:?} -> {:?}",
                credential,
                result
            );
        }
        assert_eq!(store.calls(), 0);
    }

    #[actix_rt::test]
    async fn test_duplicate_registration() {
        let service = service_with(Arc::new(MemoryStore::new()));
        let credential = Credential::new("twice@example.com", "secret1");

        assert!(service.register(&credential).await.is_ok());
        assert_eq!(
            service.register(&credential).await,
            Err(AppError::DuplicateEmail)
        );
    }

    #[actix_rt::test]
    async fn test_register_storage_failure() {
        let store = Arc::new(RecordingStore::failing(StoreError::Storage(
            "connection refused".into(),
        )));
        let service = service_with(store);

        let result = service
            .register(&Credential::new("a@b.c", "secret1"))
            .await;
        assert!(matches!(result, Err(AppError::StorageError(_))));
    }

    #[actix_rt::test]
    async fn test_register_hashing_failure_creates_nothing() {
        let store = Arc::new(RecordingStore::default());
        // bcrypt rejects costs above 31.
        let service = AccountService::new(
            store.clone(),
            PasswordHasher::new(40),
            Arc::new(TokenService::new(SECRET)),
        );

        let result = service
            .register(&Credential::new("a@b.c", "secret1"))
            .await;
        assert!(matches!(result, Err(AppError::InternalError(_))), "{:?}", result);
        assert_eq!(result.unwrap_err().client_message(), "Internal server error");
        assert_eq!(store.calls(), 0);
    }

    #[actix_rt::test]
    async fn test_login_scenarios() {
        let service = service_with(Arc::new(MemoryStore::new()));
        let id = service
            .register(&Credential::new("sergeev2004@mailbox.ru", "@valeriy"))
            .await
            .unwrap();

        let token = service
            .login(&Credential::new("sergeev2004@mailbox.ru", "@valeriy"))
            .await
            .unwrap();
        assert!(!token.is_empty());
        assert_eq!(TokenService::new(SECRET).validate(&token), Ok(id));

        assert_eq!(
            service
                .login(&Credential::new("sergeev2004@mailbox.ru", "short"))
                .await,
            Err(AppError::IncorrectPassword)
        );
        assert_eq!(
            service
                .login(&Credential::new("error", "@valeriy"))
                .await,
            Err(AppError::IncorrectEmail)
        );
    }

    #[actix_rt::test]
    async fn test_login_with_corrupt_stored_hash() {
        let store = Arc::new(MemoryStore::new());
        store.create_account("a@b.c", "not-a-bcrypt-hash").await.unwrap();
        let service = service_with(store);

        assert_eq!(
            service.login(&Credential::new("a@b.c", "secret1")).await,
            Err(AppError::IncorrectPassword)
        );
    }

    #[actix_rt::test]
    async fn test_login_storage_failure() {
        let store = Arc::new(RecordingStore::failing(StoreError::Storage("timeout".into())));
        let service = service_with(store);

        let result = service.login(&Credential::new("a@b.c", "secret1")).await;
        assert!(matches!(result, Err(AppError::StorageError(_))));
    }
}
