//! Remote user listing: wire types, the `UserSource` seam, and the one-shot loader.
//!
//! The endpoint returns `{ "users": [ { "firstName", "lastName", "email", ... } ] }`.
//! Only those three fields are read; everything else in the payload is ignored.
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::error::{Context, Result};

/// Endpoint used when no `--endpoint` is given.
pub const DEFAULT_ENDPOINT: &str = "https://dummyjson.com/users";

/// A user as shown by the picker. `email` is the identity key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub is_selected: bool,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            is_selected: false,
        }
    }

    /// Copy of this record flagged as picked.
    pub fn selected(&self) -> Self {
        Self {
            is_selected: true,
            ..self.clone()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserObject {
    first_name: String,
    last_name: String,
    email: String,
}

#[derive(Debug, Default, Deserialize)]
struct UsersResponse {
    #[serde(default)]
    users: Option<Vec<UserObject>>,
}

impl From<UserObject> for UserRecord {
    fn from(u: UserObject) -> Self {
        UserRecord::new(u.first_name + &u.last_name, u.email)
    }
}

/// Decode a listing body into picker records. A missing or null `users` array yields an empty list.
pub fn parse_users(body: &str) -> Result<Vec<UserRecord>> {
    let resp: UsersResponse =
        serde_json::from_str(body).with_ctx(|| "decode user listing".to_string())?;
    Ok(resp
        .users
        .unwrap_or_default()
        .into_iter()
        .map(UserRecord::from)
        .collect())
}

/// Anything that can produce the full user list once.
pub trait UserSource {
    fn load(&self) -> Result<Vec<UserRecord>>;
}

/// Fetches the listing over HTTP with a blocking GET.
pub struct HttpUserSource {
    pub endpoint: String,
}

impl HttpUserSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HttpUserSource {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl UserSource for HttpUserSource {
    fn load(&self) -> Result<Vec<UserRecord>> {
        let resp = reqwest::blocking::get(&self.endpoint)
            .with_ctx(|| format!("GET {}", self.endpoint))?;
        if !resp.status().is_success() {
            return Err(crate::error::simple_error(format!(
                "HTTP {} for {}",
                resp.status(),
                self.endpoint
            )));
        }
        let body = resp
            .text()
            .with_ctx(|| format!("read body from {}", self.endpoint))?;
        parse_users(&body)
    }
}

/// In-memory source, handy for demos and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticUserSource(pub Vec<UserRecord>);

impl UserSource for StaticUserSource {
    fn load(&self) -> Result<Vec<UserRecord>> {
        Ok(self.0.clone())
    }
}

/// Run `source.load()` once on a background thread.
///
/// The receiver yields exactly one list. Load failures are logged and reported
/// as an empty list; nothing is retried.
pub fn spawn_load<S>(source: S) -> Receiver<Vec<UserRecord>>
where
    S: UserSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let users = match source.load() {
            Ok(users) => {
                tracing::info!(count = users.len(), "user list loaded");
                users
            }
            Err(err) => {
                tracing::warn!(error = %err, "user list load failed; continuing with an empty list");
                Vec::new()
            }
        };
        // The loop may already be gone if the operator quit early.
        let _ = tx.send(users);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FailingSource;

    impl UserSource for FailingSource {
        fn load(&self) -> Result<Vec<UserRecord>> {
            Err(crate::error::simple_error("connection refused"))
        }
    }

    #[test]
    fn parse_concatenates_first_and_last_name() {
        let body = r#"{"users":[{"id":1,"firstName":"Ann","lastName":"Lee","email":"a@x.com","age":30}],"total":1}"#;
        let users = parse_users(body).unwrap();
        assert_eq!(
            users,
            vec![UserRecord {
                name: "AnnLee".into(),
                email: "a@x.com".into(),
                is_selected: false
            }]
        );
    }

    #[test]
    fn parse_empty_or_missing_users_is_empty() {
        assert!(parse_users(r#"{"users":[]}"#).unwrap().is_empty());
        assert!(parse_users(r#"{}"#).unwrap().is_empty());
        assert!(parse_users(r#"{"users":null}"#).unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_users("<html>").unwrap_err();
        assert!(err.to_string().starts_with("decode user listing"));
    }

    #[test]
    fn spawn_load_delivers_empty_list_on_failure() {
        let rx = spawn_load(FailingSource);
        let users = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn spawn_load_delivers_source_records() {
        let rx = spawn_load(StaticUserSource(vec![UserRecord::new("AnnLee", "a@x.com")]));
        let users = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "a@x.com");
    }
}
