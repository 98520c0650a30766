//! Contract for the gerbang (toll gate) master-data collaborator.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::format::format_gerbang_name;

/// A gate master record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GerbangRecord {
    pub id: u32,
    #[serde(rename = "IdCabang")]
    pub id_cabang: u32,
    #[serde(rename = "NamaGerbang")]
    pub nama_gerbang: String,
    #[serde(rename = "NamaCabang")]
    pub nama_cabang: String,
}

impl GerbangRecord {
    /// Combined "gate - segment" display name.
    pub fn display_name(&self) -> String {
        format_gerbang_name(&self.nama_gerbang, &self.nama_cabang)
    }
}

/// Create/update payload. Validated by [`crate::validate`] before it is
/// sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GerbangForm {
    #[serde(rename = "NamaGerbang")]
    pub nama_gerbang: String,
    #[serde(rename = "NamaCabang")]
    pub nama_cabang: String,
    #[serde(rename = "IdCabang")]
    pub id_cabang: u32,
}

/// Query parameters for the paginated gate listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GerbangQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

/// One page of gate records plus the server's pagination metadata.
#[derive(Debug, Clone, Default)]
pub struct GerbangPage {
    pub rows: Vec<GerbangRecord>,
    pub current_page: u32,
    pub total_pages: u32,
    pub count: u64,
}

/// Abstraction over the gerbang master-data endpoints.
#[async_trait::async_trait]
pub trait GerbangApi {
    async fn list_gerbangs(&self, query: &GerbangQuery) -> Result<GerbangPage>;

    /// Creates a gate record; returns the id assigned by the backend.
    async fn create_gerbang(&self, form: &GerbangForm) -> Result<u32>;

    async fn update_gerbang(&self, id: u32, form: &GerbangForm) -> Result<()>;

    /// Deletion is keyed by gate id within its road segment.
    async fn delete_gerbang(&self, id: u32, id_cabang: u32) -> Result<()>;
}
