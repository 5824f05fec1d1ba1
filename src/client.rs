//! This module provides a client to connect to the remote task server
//!
//! Authentication is explicit: the bearer token lives in the client instance
//! (set at construction or through [`Client::refresh_session`]) and is
//! attached to every request. There is no process-global default header.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Method;
use url::Url;

use crate::error::{Error, RemoteError};
use crate::session::{Session, SignUpRequest};
use crate::task::{NewTask, Task, TaskId};
use crate::traits::RemoteSource;
use crate::window;

/// A task source that fetches its data from the remote HTTP API
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    token: Option<String>,
}

impl Client {
    /// Create a client. This does not start a connection.
    ///
    /// `token` is the bearer token of a previously persisted session, if any
    pub fn new<S: AsRef<str>>(base_url: S, token: Option<String>) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(base_url.as_ref())?;

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            token,
        })
    }

    /// Use this token for every request from now on
    pub fn refresh_session(&mut self, token: String) {
        self.token = Some(token);
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Turn a non-success response into an [`RemoteError::Api`], keeping the
    /// response body as the user-facing message when the server sent one
    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() { None } else { Some(body) };
        Err(RemoteError::Api { status: status.as_u16(), message })
    }

    /// Exchange credentials for a session.
    ///
    /// On success the returned token is attached to every later request from
    /// this client; the caller usually persists the whole session blob too
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, RemoteError> {
        let response = self.http
            .post(self.endpoint("/signin"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let response = Self::checked(response).await?;

        let session: Session = response.json().await?;
        log::debug!("Signed in, got a session token");
        self.refresh_session(session.token.clone());
        Ok(session)
    }

    /// Create an account.
    ///
    /// The request is validated locally first: an invalid one is rejected
    /// before any network access
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<(), Error> {
        request.validate()?;

        let response = self.http
            .post(self.endpoint("/signup"))
            .json(request)
            .send()
            .await
            .map_err(RemoteError::from)?;
        Self::checked(response).await?;

        log::debug!("Account created for {}", request.email);
        Ok(())
    }
}

#[async_trait]
impl RemoteSource for Client {
    async fn fetch_tasks(&self, upper_bound: NaiveDateTime) -> Result<Vec<Task>, RemoteError> {
        let response = self.request(Method::GET, self.endpoint("/tasks"))
            .query(&[("date", window::format_query_date(&upper_bound))])
            .send()
            .await?;
        let response = Self::checked(response).await?;

        let tasks: Vec<Task> = response.json().await?;
        log::debug!("Fetched {} tasks up to {}", tasks.len(), upper_bound);
        Ok(tasks)
    }

    async fn add_task(&self, new_task: &NewTask) -> Result<Task, RemoteError> {
        let response = self.request(Method::POST, self.endpoint("/tasks"))
            .json(new_task)
            .send()
            .await?;
        let response = Self::checked(response).await?;

        Ok(response.json().await?)
    }

    async fn toggle_task(&self, id: &TaskId) -> Result<Task, RemoteError> {
        let response = self.request(Method::PUT, self.endpoint(&format!("/tasks/{}/toggle", id)))
            .send()
            .await?;
        let response = Self::checked(response).await?;

        Ok(response.json().await?)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RemoteError> {
        let response = self.request(Method::DELETE, self.endpoint(&format!("/tasks/{}", id)))
            .send()
            .await?;
        Self::checked(response).await?;

        Ok(())
    }
}
