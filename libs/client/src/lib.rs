//! Typed HTTP client with a cached system snapshot.
//!
//! One [`IfsClient`] is constructed per session and passed by reference to
//! consuming views. It owns a single cached [`SystemSnapshot`] behind an
//! [`arc_swap::ArcSwapOption`]: reads are lock-free, every mutation runs
//! request-then-`refresh()` so the cache never drifts for longer than one
//! round trip.

pub mod error;
pub mod model;

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;
use uuid::Uuid;

pub use error::ClientError;
pub use model::{
    CreateJournal, CreatePart, CreateRelationship, JournalView, PartView, RelationshipView,
    Session, SystemSnapshot, UpdateJournal, UpdatePart, UpdateRelationship, UserView,
};

pub struct IfsClient {
    http: reqwest::Client,
    base: Url,
    token: String,
    cache: ArcSwapOption<SystemSnapshot>,
}

impl IfsClient {
    /// Build a client for an already-issued access token.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base: Url::parse(base_url)?,
            token: token.into(),
            cache: ArcSwapOption::empty(),
        })
    }

    /// Log in and build a client around the returned token.
    pub async fn login(
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)?;
        let http = reqwest::Client::new();
        let response = http
            .post(base.join("/api/auth/login")?)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;
        let session: Session = decode(response).await?;
        Ok(Self {
            http,
            base,
            token: session.access_token,
            cache: ArcSwapOption::empty(),
        })
    }

    /// The last snapshot fetched by [`refresh`](Self::refresh), if any.
    pub fn snapshot(&self) -> Option<Arc<SystemSnapshot>> {
        self.cache.load_full()
    }

    /// Fetch the system from the server and replace the cached snapshot.
    pub async fn refresh(&self) -> Result<Arc<SystemSnapshot>, ClientError> {
        let snapshot: SystemSnapshot = self.get("/api/system").await?;
        let snapshot = Arc::new(snapshot);
        self.cache.store(Some(snapshot.clone()));
        debug!(
            parts = snapshot.part_count,
            relationships = snapshot.relationship_count,
            "refreshed system snapshot"
        );
        Ok(snapshot)
    }

    /// Reset the system server-side; the response body is the new
    /// snapshot, so it replaces the cache directly.
    pub async fn reset_system(&self) -> Result<Arc<SystemSnapshot>, ClientError> {
        let snapshot: SystemSnapshot =
            self.send_json(Method::POST, "/api/system/reset", &()).await?;
        let snapshot = Arc::new(snapshot);
        self.cache.store(Some(snapshot.clone()));
        Ok(snapshot)
    }

    pub async fn create_part(&self, req: &CreatePart) -> Result<PartView, ClientError> {
        let part = self.send_json(Method::POST, "/api/parts", req).await?;
        self.refresh().await?;
        Ok(part)
    }

    pub async fn update_part(&self, id: Uuid, req: &UpdatePart) -> Result<PartView, ClientError> {
        let part = self
            .send_json(Method::PUT, &format!("/api/parts/{id}"), req)
            .await?;
        self.refresh().await?;
        Ok(part)
    }

    pub async fn delete_part(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete(&format!("/api/parts/{id}")).await?;
        self.refresh().await?;
        Ok(())
    }

    pub async fn create_relationship(
        &self,
        req: &CreateRelationship,
    ) -> Result<RelationshipView, ClientError> {
        let rel = self.send_json(Method::POST, "/api/relationships", req).await?;
        self.refresh().await?;
        Ok(rel)
    }

    pub async fn update_relationship(
        &self,
        id: Uuid,
        req: &UpdateRelationship,
    ) -> Result<RelationshipView, ClientError> {
        let rel = self
            .send_json(Method::PUT, &format!("/api/relationships/{id}"), req)
            .await?;
        self.refresh().await?;
        Ok(rel)
    }

    pub async fn delete_relationship(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete(&format!("/api/relationships/{id}")).await?;
        self.refresh().await?;
        Ok(())
    }

    /// Journal reads skip the snapshot cache; entries are not part of it.
    pub async fn list_journals(&self) -> Result<Vec<JournalView>, ClientError> {
        self.get("/api/journals").await
    }

    pub async fn create_journal(&self, req: &CreateJournal) -> Result<JournalView, ClientError> {
        let entry = self.send_json(Method::POST, "/api/journals", req).await?;
        self.refresh().await?;
        Ok(entry)
    }

    pub async fn update_journal(
        &self,
        id: Uuid,
        req: &UpdateJournal,
    ) -> Result<JournalView, ClientError> {
        self.send_json(Method::PUT, &format!("/api/journals/{id}"), req)
            .await
    }

    pub async fn delete_journal(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete(&format!("/api/journals/{id}")).await?;
        self.refresh().await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request(Method::GET, path)?.send().await?;
        decode(response).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.request(method, path)?.json(body).send().await?;
        decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.request(Method::DELETE, path)?.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        Ok(self
            .http
            .request(method, self.base.join(path)?)
            .bearer_auth(&self.token))
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(api_error(response).await)
    }
}

async fn api_error(response: reqwest::Response) -> ClientError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    let status: StatusCode = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    ClientError::Api { status, message }
}
