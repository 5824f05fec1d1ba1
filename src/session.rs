//! Locally persisted proof of authentication, and the startup gate that uses it
//!
//! At process start the app checks once whether a well-formed session was
//! persisted by a previous run: if so it goes straight to the task list and
//! attaches the token to outgoing requests, otherwise it routes to the
//! authentication screen. A corrupt blob counts as "no session".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A signed-in session: the bearer token, plus whatever profile fields the
/// server returned at sign-in.
///
/// The profile is deliberately opaque: it is persisted and restored as-is,
/// without this crate interpreting it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

impl Session {
    /// A well-formed session carries a non-empty token
    pub fn is_well_formed(&self) -> bool {
        self.token.trim().is_empty() == false
    }
}

/// Where the session blob is persisted between process starts
#[derive(Debug, Clone)]
pub struct SessionStore {
    backing_file: PathBuf,
}

impl SessionStore {
    /// A store persisted in the default storage folder
    pub fn at_default_location() -> Self {
        Self::new(&crate::config::default_storage_dir().join("session.json"))
    }

    pub fn new(path: &Path) -> Self {
        Self { backing_file: PathBuf::from(path) }
    }

    /// The one-shot startup gate: the previously persisted session, if any.
    ///
    /// A missing, unparseable or token-less blob means "no session"; parse
    /// failures are logged and absorbed, never propagated
    pub fn load(&self) -> Option<Session> {
        let file = std::fs::File::open(&self.backing_file).ok()?;

        match serde_json::from_reader::<_, Session>(file) {
            Err(err) => {
                log::warn!("Unparseable session file {:?}: {}. Treating it as signed out.", self.backing_file, err);
                None
            },
            Ok(session) => {
                if session.is_well_formed() {
                    Some(session)
                } else {
                    log::warn!("The persisted session has no token. Treating it as signed out.");
                    None
                }
            },
        }
    }

    /// Persist a session. Best-effort: failures are logged and absorbed
    pub fn save(&self, session: &Session) {
        if let Some(parent) = self.backing_file.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let file = match std::fs::File::create(&self.backing_file) {
            Err(err) => {
                log::warn!("Unable to save the session to {:?}: {}", self.backing_file, err);
                return;
            },
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, session) {
            log::warn!("Unable to serialize the session: {}", err);
        }
    }

    /// Forget the persisted session (sign-out)
    pub fn clear(&self) {
        let _ = std::fs::remove_file(&self.backing_file);
    }
}

/// The payload of an account-creation request
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpRequest {
    /// Local validation, mirroring what the sign-up form enforces.
    /// A rejected request never reaches the network
    pub fn validate(&self) -> Result<(), Error> {
        if self.email.contains('@') == false {
            return Err(Error::InvalidSignUp("the e-mail address is not valid".to_string()));
        }
        if self.password.chars().count() < 6 {
            return Err(Error::InvalidSignUp("the password must be at least 6 characters long".to_string()));
        }
        if self.name.trim().chars().count() < 2 {
            return Err(Error::InvalidSignUp("the name must be at least 2 characters long".to_string()));
        }
        if self.password != self.confirm_password {
            return Err(Error::InvalidSignUp("the password confirmation does not match".to_string()));
        }
        Ok(())
    }
}
