//! reqwest-backed client for the running room REST API.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::json;

use super::error::{ApiError, ErrorBody};
use super::{CatalogApi, MenuApi};
use crate::calendar::wire_date;
use crate::models::{EnumCatalog, Menu, MenuItem};

/// Client for the running room API.
///
/// All paths are resolved against `base_url` (for example
/// `https://rr.example.org/api`). When a token is set it is sent as a
/// bearer token on every request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client. `timeout` of `None` keeps reqwest's defaults.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            base_url,
            token,
            http,
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and turns non-2xx answers into `ApiError::Server`.
    pub(super) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        tracing::debug!("{} {}", method, path);

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, path, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        tracing::warn!(
            "{} {} returned {}: {}",
            method,
            path,
            status,
            body.message.as_deref().unwrap_or("-")
        );
        Err(ApiError::Server {
            status: status.as_u16(),
            message: body.message,
        })
    }
}

pub(super) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

impl MenuApi for ApiClient {
    async fn list_menus(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Menu>, ApiError> {
        let builder = self
            .request(Method::GET, "/menus")
            .query(&[("startDate", wire_date(start)), ("endDate", wire_date(end))]);
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    async fn menu_by_date(&self, date: NaiveDate) -> Result<Option<Menu>, ApiError> {
        let builder = self
            .request(Method::GET, "/menus/menu-by-date")
            .query(&[("date", wire_date(date))]);

        let response = match self.send(builder).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str::<Option<Menu>>(&text)?)
    }

    async fn create_menu(&self, menu_date: NaiveDate) -> Result<Menu, ApiError> {
        let builder = self
            .request(Method::POST, "/menus")
            .json(&json!({ "menuDate": wire_date(menu_date), "items": [] }));
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    async fn update_menu(&self, id: &str, menu_date: NaiveDate) -> Result<Menu, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/menus/{}", segment(id)))
            .json(&json!({ "menuDate": wire_date(menu_date) }));
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    async fn delete_menu(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/menus/{}", segment(id)));
        self.send(builder).await?;
        Ok(())
    }

    async fn add_item(&self, menu_id: &str, item: &MenuItem) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, &format!("/menus/{}/items", segment(menu_id)))
            .json(item);
        self.send(builder).await?;
        Ok(())
    }

    async fn update_item(
        &self,
        menu_id: &str,
        item_id: &str,
        item: &MenuItem,
    ) -> Result<(), ApiError> {
        let path = format!("/menus/{}/items/{}", segment(menu_id), segment(item_id));
        let builder = self.request(Method::PUT, &path).json(item);
        self.send(builder).await?;
        Ok(())
    }

    async fn delete_item(&self, menu_id: &str, item_id: &str) -> Result<(), ApiError> {
        let path = format!("/menus/{}/items/{}", segment(menu_id), segment(item_id));
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn copy_week(
        &self,
        source_week_start: NaiveDate,
        target_week_start: NaiveDate,
    ) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/menus/copy-week").query(&[
            ("sourceWeekStart", wire_date(source_week_start)),
            ("targetWeekStart", wire_date(target_week_start)),
        ]);
        self.send(builder).await?;
        Ok(())
    }

    async fn copy_day(
        &self,
        source_date: NaiveDate,
        target_date: NaiveDate,
    ) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/menus/copy-day").query(&[
            ("sourceDate", wire_date(source_date)),
            ("targetDate", wire_date(target_date)),
        ]);
        self.send(builder).await?;
        Ok(())
    }
}

impl CatalogApi for ApiClient {
    async fn fetch_enums(&self) -> Result<EnumCatalog, ApiError> {
        let response = self.send(self.request(Method::GET, "/enums/all")).await?;
        Ok(response.json().await?)
    }
}
