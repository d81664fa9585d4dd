use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, User};

use super::blocking;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn is_registered(&self, privy_id: &str) -> Result<bool, DomainError> {
        Ok(self.find(privy_id).await?.is_some())
    }

    /// Fails with `InvalidInput` when the privy id is already registered.
    pub async fn register(&self, user: NewUser) -> Result<User, DomainError> {
        if user.privy_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("privy_id must not be empty".to_string()));
        }

        let repo = Arc::clone(&self.repo);
        let privy_id = user.privy_id.clone();
        match blocking(move || repo.create(user)).await? {
            Some(created) => {
                log::info!("Registered user {}", created.privy_id);
                Ok(created)
            }
            None => {
                log::warn!("User {} is already registered", privy_id);
                Err(DomainError::InvalidInput("Failed to register user".to_string()))
            }
        }
    }

    /// `None` when the user is unknown or has not set an email yet.
    pub async fn get_email(&self, privy_id: &str) -> Result<Option<String>, DomainError> {
        Ok(self.find(privy_id).await?.and_then(|u| u.email))
    }

    pub async fn update_email(&self, privy_id: &str, email: &str) -> Result<(), DomainError> {
        let email = email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(DomainError::InvalidInput(format!("invalid email address '{email}'")));
        }

        let repo = Arc::clone(&self.repo);
        let privy_id = privy_id.to_string();
        if blocking(move || repo.update_email(&privy_id, &email)).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound("User"))
        }
    }

    async fn find(&self, privy_id: &str) -> Result<Option<User>, DomainError> {
        let repo = Arc::clone(&self.repo);
        let privy_id = privy_id.to_string();
        blocking(move || repo.find_by_privy_id(&privy_id)).await
    }
}

/// A single `@` with something on both sides and a dot in the domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}


#[cfg(test)]
mod tests {
    use super::fakes::InMemoryUsers;
    use super::*;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUsers::default()))
    }

    fn new_user(privy_id: &str) -> NewUser {
        NewUser {
            privy_id: privy_id.to_string(),
            wallet_address: None,
        }
    }

    #[tokio::test]
    async fn register_then_check() {
        let users = service();
        assert!(!users.is_registered("did:privy:1").await.unwrap());

        users.register(new_user("did:privy:1")).await.unwrap();
        assert!(users.is_registered("did:privy:1").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_registration_fails() {
        let users = service();
        users.register(new_user("did:privy:1")).await.unwrap();

        let err = users.register(new_user("did:privy:1")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Failed to register user");
    }

    #[tokio::test]
    async fn email_is_none_until_set() {
        let users = service();
        users.register(new_user("did:privy:1")).await.unwrap();
        assert_eq!(users.get_email("did:privy:1").await.unwrap(), None);
        assert_eq!(users.get_email("did:privy:404").await.unwrap(), None);

        users.update_email("did:privy:1", "ana@example.mx").await.unwrap();
        assert_eq!(
            users.get_email("did:privy:1").await.unwrap().as_deref(),
            Some("ana@example.mx")
        );
    }

    #[tokio::test]
    async fn update_email_for_unknown_user_is_not_found() {
        let err = service()
            .update_email("did:privy:404", "ana@example.mx")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("User")));
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let users = service();
        users.register(new_user("did:privy:1")).await.unwrap();

        for bad in ["", "ana", "@example.mx", "ana@", "ana@@example.mx", "ana@example", "a na@x.mx"] {
            let err = users.update_email("did:privy:1", bad).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)), "{bad} accepted");
        }
    }
}
