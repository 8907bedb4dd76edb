//! Account signup and login.
//!
//! Accounts are keyed by email. Signup validates the email shape and a
//! minimum password length, hashes the password, and seeds an empty data
//! aggregate so every later operation can assume the aggregate exists.

pub mod handlers;
pub mod password;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::db::{StoreError, UserStore};
use crate::errors::AppError;
use crate::models::user::{UserData, UserRecord};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

const MIN_PASSWORD_LEN: usize = 6;

fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if !EMAIL_RE.is_match(email) {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Display name defaults to the email's local part.
fn name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

pub fn signup(store: &UserStore, email: &str, password: &str) -> Result<UserRecord, AppError> {
    validate_credentials(email, password)?;

    let record = UserRecord {
        email: email.to_string(),
        password_hash: password::hash_password(password)?,
        name: name_from_email(email),
        created_at: Utc::now(),
    };
    store.create_user(&record)?;
    store.save_user_data(email, &UserData::empty(&record.name))?;

    info!(email, "New account created");
    Ok(record)
}

pub fn login(store: &UserStore, email: &str, password: &str) -> Result<UserRecord, AppError> {
    let user = store
        .get_user(email)?
        .ok_or_else(|| AppError::NotFound("No account found for this email".to_string()))?;

    if !password::verify_password(password, &user.password_hash)? {
        return Err(AppError::IncorrectPassword);
    }
    Ok(user)
}

/// Convenience for handlers: the aggregate for a known user, or 404.
pub fn load_user_data(store: &UserStore, email: &str) -> Result<UserData, AppError> {
    match store.get_user_data(email) {
        Ok(Some(data)) => Ok(data),
        Ok(None) => Err(StoreError::UserNotFound.into()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_then_login() {
        let store = UserStore::in_memory().unwrap();
        let created = signup(&store, "ada@example.com", "secret1").unwrap();
        assert_eq!(created.name, "ada");

        let user = login(&store, "ada@example.com", "secret1").unwrap();
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_signup_seeds_empty_aggregate() {
        let store = UserStore::in_memory().unwrap();
        signup(&store, "ada@example.com", "secret1").unwrap();

        let data = load_user_data(&store, "ada@example.com").unwrap();
        assert_eq!(data.user_profile.name, "ada");
        assert!(data.analysis.is_none());
        assert!(data.plan.is_none());
    }

    #[test]
    fn test_signup_rejects_bad_email_and_short_password() {
        let store = UserStore::in_memory().unwrap();
        assert!(matches!(
            signup(&store, "not-an-email", "secret1"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            signup(&store, "ada@example.com", "short"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_signup_conflicts() {
        let store = UserStore::in_memory().unwrap();
        signup(&store, "ada@example.com", "secret1").unwrap();
        assert!(matches!(
            signup(&store, "ada@example.com", "secret2"),
            Err(AppError::UserExists)
        ));
    }

    #[test]
    fn test_login_wrong_password() {
        let store = UserStore::in_memory().unwrap();
        signup(&store, "ada@example.com", "secret1").unwrap();
        assert!(matches!(
            login(&store, "ada@example.com", "wrong-pass"),
            Err(AppError::IncorrectPassword)
        ));
    }

    #[test]
    fn test_login_unknown_user() {
        let store = UserStore::in_memory().unwrap();
        assert!(matches!(
            login(&store, "ghost@example.com", "secret1"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_stored_hash_is_not_plaintext() {
        let store = UserStore::in_memory().unwrap();
        signup(&store, "ada@example.com", "secret1").unwrap();
        let user = store.get_user("ada@example.com").unwrap().unwrap();
        assert_ne!(user.password_hash, "secret1");
        assert!(user.password_hash.starts_with("$argon2"));
    }
}
