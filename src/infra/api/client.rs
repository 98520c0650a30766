use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::fetch::{BasicClient, HttpClient};
use crate::records::LalinRecord;
use crate::services::gerbang::{GerbangApi, GerbangForm, GerbangPage, GerbangQuery, GerbangRecord};
use crate::services::lalin::{LalinApi, LalinPage, LalinQuery};

/// Fallback when `LALIN_API_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api";

/// Body every backend endpoint wraps its payload in. `data` carries the
/// listing payload, `id` the key assigned on create; both are absent on
/// plain acknowledgements.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiBody<T> {
    status: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    id: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PageData<T> {
    rows: RowsEnvelope<T>,
    #[serde(default)]
    current_page: u32,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    count: u64,
}

/// The backend double-wraps the row list.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct RowsEnvelope<T> {
    #[serde(default)]
    rows: Vec<T>,
}

/// Decodes a response body, turning a `status: false` envelope into an
/// error carrying the server's message.
fn decode_body<T: DeserializeOwned>(body: &str, what: &str) -> Result<ApiBody<T>> {
    let body: ApiBody<T> =
        serde_json::from_str(body).map_err(|e| anyhow!("Failed to parse {what} response: {e}"))?;

    if !body.status {
        let message = body
            .message
            .unwrap_or_else(|| format!("{what} rejected by server"));
        return Err(anyhow!(message));
    }

    Ok(body)
}

/// REST client for the lalin/gerbang backend.
pub struct ApiClient<C: HttpClient = BasicClient> {
    base_url: String,
    builder: reqwest::Client,
    http: C,
}

impl ApiClient<BasicClient> {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url: normalize(base_url),
            builder: client.clone(),
            http: BasicClient::with_client(client),
        })
    }

    /// Builds a client from `LALIN_API_BASE_URL`, falling back to the
    /// local development backend.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("LALIN_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// Routes requests through a caller-supplied transport.
    pub fn with_http(base_url: impl Into<String>, http: C) -> Self {
        Self {
            base_url: normalize(base_url),
            builder: reqwest::Client::new(),
            http,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<ApiBody<T>> {
        let request = request
            .build()
            .map_err(|e| anyhow!("Failed to build {what} request: {e}"))?;

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| anyhow!("Failed to send {what} request: {e}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("{what} failed with status {status}: {body}"));
        }

        let text = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read {what} response: {e}"))?;

        decode_body(&text, what)
    }
}

fn normalize(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}

#[async_trait]
impl<C: HttpClient> LalinApi for ApiClient<C> {
    async fn fetch_lalins(&self, query: &LalinQuery) -> Result<LalinPage> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(tanggal) = query.tanggal {
            params.push(("tanggal", tanggal.format("%Y-%m-%d").to_string()));
        }
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }

        debug!(tanggal = ?query.tanggal, page = ?query.page, limit = ?query.limit, "Fetching lalin page");

        let request = self.builder.get(self.endpoint("/lalins")).query(&params);
        let body: ApiBody<PageData<LalinRecord>> = self.execute(request, "lalin fetch").await?;
        let data = body
            .data
            .ok_or_else(|| anyhow!("lalin fetch response missing data"))?;

        Ok(LalinPage {
            rows: data.rows.rows,
            current_page: data.current_page,
            total_pages: data.total_pages,
            count: data.count,
        })
    }
}

#[async_trait]
impl<C: HttpClient> GerbangApi for ApiClient<C> {
    async fn list_gerbangs(&self, query: &GerbangQuery) -> Result<GerbangPage> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }

        let request = self.builder.get(self.endpoint("/gerbangs")).query(&params);
        let body: ApiBody<PageData<GerbangRecord>> = self.execute(request, "gerbang list").await?;
        let data = body
            .data
            .ok_or_else(|| anyhow!("gerbang list response missing data"))?;

        Ok(GerbangPage {
            rows: data.rows.rows,
            current_page: data.current_page,
            total_pages: data.total_pages,
            count: data.count,
        })
    }

    async fn create_gerbang(&self, form: &GerbangForm) -> Result<u32> {
        let request = self.builder.post(self.endpoint("/gerbangs")).json(form);
        let body: ApiBody<serde_json::Value> = self.execute(request, "gerbang create").await?;

        body.id
            .ok_or_else(|| anyhow!("gerbang create response missing id"))
    }

    async fn update_gerbang(&self, id: u32, form: &GerbangForm) -> Result<()> {
        #[derive(Serialize)]
        struct UpdatePayload<'a> {
            id: u32,
            #[serde(flatten)]
            form: &'a GerbangForm,
        }

        let request = self
            .builder
            .put(self.endpoint("/gerbangs/"))
            .json(&UpdatePayload { id, form });
        let _: ApiBody<serde_json::Value> = self.execute(request, "gerbang update").await?;

        Ok(())
    }

    async fn delete_gerbang(&self, id: u32, id_cabang: u32) -> Result<()> {
        #[derive(Serialize)]
        struct DeletePayload {
            id: u32,
            #[serde(rename = "IdCabang")]
            id_cabang: u32,
        }

        let request = self
            .builder
            .delete(self.endpoint("/gerbangs/"))
            .json(&DeletePayload { id, id_cabang });
        let _: ApiBody<serde_json::Value> = self.execute(request, "gerbang delete").await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_page_envelope() {
        let body = r#"{
            "status": true,
            "message": "ok",
            "data": {
                "rows": { "rows": [
                    {"id": 1, "IdCabang": 2, "IdGerbang": 3, "Tanggal": "2024-01-01",
                     "Shift": 1, "Golongan": 1, "Tunai": 100}
                ]},
                "current_page": 1,
                "total_pages": 4,
                "count": 37
            }
        }"#;

        let decoded: ApiBody<PageData<LalinRecord>> = decode_body(body, "lalin fetch").unwrap();
        let data = decoded.data.unwrap();

        assert_eq!(data.rows.rows.len(), 1);
        assert_eq!(data.rows.rows[0].tunai, 100);
        assert_eq!(data.total_pages, 4);
        assert_eq!(data.count, 37);
    }

    #[test]
    fn test_decode_rejection_surfaces_server_message() {
        let body = r#"{"status": false, "message": "Data tidak ditemukan."}"#;

        let error = decode_body::<serde_json::Value>(body, "lalin fetch").unwrap_err();
        assert_eq!(error.to_string(), "Data tidak ditemukan.");
    }

    #[test]
    fn test_decode_rejection_without_message() {
        let body = r#"{"status": false}"#;

        let error = decode_body::<serde_json::Value>(body, "gerbang create").unwrap_err();
        assert_eq!(error.to_string(), "gerbang create rejected by server");
    }

    #[test]
    fn test_decode_create_body_carries_id() {
        let body = r#"{"status": true, "message": "created", "id": 12}"#;

        let decoded: ApiBody<serde_json::Value> = decode_body(body, "gerbang create").unwrap();
        assert_eq!(decoded.id, Some(12));
    }

    #[test]
    fn test_decode_garbage_is_an_error() {
        let error = decode_body::<serde_json::Value>("not json", "lalin fetch").unwrap_err();
        assert!(error.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:8081/api/").unwrap();
        assert_eq!(client.endpoint("/lalins"), "http://localhost:8081/api/lalins");
    }
}
