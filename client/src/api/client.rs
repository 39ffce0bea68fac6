//! HTTP client for the Blend Vinos collaborator API

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use shared::{
    movements_from_value, parties_from_value, wines_from_value, CreateMovementRequest,
    LoginRequest, LoginResponse, MovementDetails, MovementRecord, MovementType, Party,
    RegisterUserRequest, TopSoldEntry, UpdateUserRequest, UserProfile, Wine, WinePageQuery,
    WinePayload,
};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::session::SessionStore;

/// Collaborator API client
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client from the loaded configuration
    pub fn new(config: &Config, session: SessionStore) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: &str, session: SessionStore) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Token for a protected call; absent means the user must log in first
    fn bearer(&self) -> AppResult<String> {
        self.session.token().ok_or(AppError::MissingToken)
    }

    /// Turn a non-success response into the verbatim error the screens show
    async fn check(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::RequestFailed {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let token = self.bearer()?;
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let token = self.bearer()?;
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&token)
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let token = self.bearer()?;
        let response = self
            .http
            .put(self.url(path))
            .bearer_auth(&token)
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let token = self.bearer()?;
        let response = self
            .http
            .delete(self.url(path))
            .bearer_auth(&token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Auth & users
    // ------------------------------------------------------------------

    /// Authenticate; a token in the response is adopted into the session
    pub async fn login(&self, credentials: &LoginRequest) -> AppResult<LoginResponse> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(credentials)
            .send()
            .await?;
        let data: LoginResponse = Self::check(response).await?.json().await?;

        if let Some(token) = &data.token {
            self.session.set_token(token.clone());
        }
        Ok(data)
    }

    /// Profile of the logged-in account. A 401/403 here means the session
    /// is no longer honored; it is cleared so the shell redirects to login.
    pub async fn fetch_current_user(&self) -> AppResult<UserProfile> {
        let token = self.bearer()?;
        let response = self
            .http
            .get(self.url("/api/users/me"))
            .bearer_auth(&token)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            self.session.clear();
            return Err(AppError::SessionExpired);
        }
        Ok(Self::check(response).await?.json().await?)
    }

    /// List parties for client attribution; tolerates both observed
    /// response shapes
    pub async fn list_users(&self) -> AppResult<Vec<Party>> {
        let value: Value = self.get_json("/api/users/").await?;
        Ok(parties_from_value(value))
    }

    /// Register a new account (admin screens); input is validated locally
    /// before anything is sent
    pub async fn register_user(&self, input: &RegisterUserRequest) -> AppResult<UserProfile> {
        input.validate().map_err(|err| AppError::Validation {
            field: "user".to_string(),
            message: err.to_string(),
            message_es: "Datos de usuario inválidos".to_string(),
        })?;
        self.post_json("/api/auth/register", input).await
    }

    pub async fn update_user(&self, id: i64, input: &UpdateUserRequest) -> AppResult<UserProfile> {
        self.put_json(&format!("/api/users/{}", id), input).await
    }

    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("/api/users/{}", id)).await
    }

    pub async fn reset_user_password(&self, id: i64) -> AppResult<Value> {
        let token = self.bearer()?;
        let response = self
            .http
            .put(self.url(&format!("/api/users/{}/reset-password", id)))
            .bearer_auth(&token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    // ------------------------------------------------------------------
    // Wines
    // ------------------------------------------------------------------

    pub async fn list_wines(&self) -> AppResult<Vec<Wine>> {
        let value: Value = self.get_json("/api/wines").await?;
        Ok(wines_from_value(value))
    }

    /// Paginated inventory listing; blank search terms are not sent
    pub async fn fetch_paginated_wines(&self, query: &WinePageQuery) -> AppResult<Vec<Wine>> {
        let token = self.bearer()?;
        let mut request = self
            .http
            .get(self.url("/api/wines/paginated"))
            .bearer_auth(&token)
            .query(&[
                ("page", query.page.to_string()),
                ("limit", query.limit.to_string()),
                ("order", query.order.as_str().to_string()),
                ("orderBy", query.order_by.clone()),
            ]);
        if let Some(term) = query.search_term() {
            request = request.query(&[("q", term)]);
        }

        let response = request.send().await?;
        let value: Value = Self::check(response).await?.json().await?;
        Ok(wines_from_value(value))
    }

    pub async fn fetch_wine_by_id(&self, id: i64) -> AppResult<Wine> {
        self.get_json(&format!("/api/wines/{}", id)).await
    }

    /// Look a wine up by its human-entered code. The code lands in the URL
    /// path, so it gets percent-encoded segment by segment.
    pub async fn fetch_wine_by_code(&self, code: &str) -> AppResult<Wine> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::Validation {
                field: "code".to_string(),
                message: "code is required".to_string(),
                message_es: "El código es requerido".to_string(),
            });
        }

        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|err| AppError::Internal(format!("invalid base URL: {}", err)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("base URL cannot carry a path".to_string()))?
            .extend(["api", "wines", "find", code]);

        let token = self.bearer()?;
        let response = self.http.get(url).bearer_auth(&token).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_wine(&self, payload: &WinePayload) -> AppResult<Wine> {
        self.post_json("/api/wines/", payload).await
    }

    pub async fn update_wine(&self, id: i64, payload: &WinePayload) -> AppResult<Wine> {
        self.put_json(&format!("/api/wines/{}", id), payload).await
    }

    pub async fn delete_wine(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("/api/wines/{}", id)).await
    }

    // ------------------------------------------------------------------
    // Movements
    // ------------------------------------------------------------------

    /// Record a purchase or sale movement
    pub async fn create_movement(&self, payload: &CreateMovementRequest) -> AppResult<Value> {
        self.post_json("/api/movements/", payload).await
    }

    /// Movement history for a month, optionally filtered by type
    pub async fn movements_by_month(
        &self,
        year: i32,
        month: u32,
        movement_type: Option<MovementType>,
    ) -> AppResult<Vec<MovementRecord>> {
        let token = self.bearer()?;
        let mut request = self
            .http
            .get(self.url("/api/movements/by-month"))
            .bearer_auth(&token)
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        if let Some(kind) = movement_type {
            request = request.query(&[("accion", kind.as_str())]);
        }

        let response = request.send().await?;
        let value: Value = Self::check(response).await?.json().await?;
        Ok(movements_from_value(value))
    }

    /// Header and line detail of a stored movement
    pub async fn movement_details(&self, id: i64) -> AppResult<MovementDetails> {
        self.get_json(&format!("/api/movements/{}", id)).await
    }

    pub async fn top_sold_wines(&self) -> AppResult<Vec<TopSoldEntry>> {
        self.get_json("/api/movements/top-sold").await
    }
}
