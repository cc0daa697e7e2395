//! Login stub
//!
//! Credentials are checked against the configured fixture accounts first,
//! then against a public user directory. A user's password is their first
//! name (case-insensitive). No session is kept after a successful check.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Public directory used when no fixture account matches
pub const DEFAULT_DIRECTORY_URL: &str = "https://reqres.in/api/users";

/// A fixture account from the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub first_name: String,
}

impl Account {
    fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.first_name.to_lowercase() == password.to_lowercase()
    }
}

/// Where the matching account was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginSource {
    Local,
    Directory,
}

/// Successful credential check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSuccess {
    pub first_name: String,
    pub source: LoginSource,
}

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Wrong email or password")]
    InvalidCredentials,

    #[error("Could not reach user directory: {0}")]
    Directory(#[from] reqwest::Error),

    #[error("User directory returned {0}")]
    DirectoryStatus(u16),
}

/// Credential checker backed by fixtures and a remote directory
pub struct LoginService {
    accounts: Vec<Account>,
    directory_url: Option<String>,
    client: reqwest::Client,
}

impl LoginService {
    pub fn new(accounts: Vec<Account>, directory_url: Option<String>) -> Self {
        Self {
            accounts,
            directory_url,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fixture accounts only, no network fallback
    pub fn local(accounts: Vec<Account>) -> Self {
        Self::new(accounts, None)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, LoginError> {
        let email = email.trim();

        if let Some(account) = self.accounts.iter().find(|a| a.matches(email, password)) {
            debug!(email, "matched fixture account");
            return Ok(LoginSuccess {
                first_name: account.first_name.clone(),
                source: LoginSource::Local,
            });
        }

        let Some(url) = self.directory_url.as_deref() else {
            return Err(LoginError::InvalidCredentials);
        };

        let users = self.fetch_directory(url).await?;
        users
            .into_iter()
            .find(|a| a.matches(email, password))
            .map(|a| LoginSuccess {
                first_name: a.first_name,
                source: LoginSource::Directory,
            })
            .ok_or(LoginError::InvalidCredentials)
    }

    async fn fetch_directory(&self, url: &str) -> Result<Vec<Account>, LoginError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "user directory request failed");
            return Err(LoginError::DirectoryStatus(status.as_u16()));
        }

        let page: DirectoryResponse = response.json().await?;
        Ok(page.data)
    }
}

#[derive(Debug, Deserialize)]
struct DirectoryResponse {
    #[serde(default)]
    data: Vec<Account>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> Vec<Account> {
        vec![Account {
            email: "ana@example.com".to_string(),
            first_name: "Ana".to_string(),
        }]
    }

    #[test]
    fn test_password_is_case_insensitive_first_name() {
        let account = &accounts()[0];
        assert!(account.matches("ana@example.com", "ANA"));
        assert!(account.matches("ana@example.com", "ana"));
        assert!(!account.matches("ana@example.com", "anna"));
        assert!(!account.matches("ANA@example.com", "ana"));
    }

    #[tokio::test]
    async fn test_local_login() {
        let service = LoginService::local(accounts());
        let ok = service.login(" ana@example.com ", "ana").await.unwrap();
        assert_eq!(ok.first_name, "Ana");
        assert_eq!(ok.source, LoginSource::Local);

        let err = service.login("ana@example.com", "bob").await.unwrap_err();
        assert!(matches!(err, LoginError::InvalidCredentials));
    }
}
