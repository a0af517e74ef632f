use std::path::PathBuf;
use std::sync::Arc;

use models::malaria::{MalariaPatch, MalariaView, NewMalaria};
use models::errors::ModelError;
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

use super::filter::FilterQuery;
use super::page::FilterPage;
use super::repository::MalariaRepository;
use crate::errors::ServiceError;
use crate::import;
use crate::pagination::PageMeta;

/// Application service for the malaria resource.
/// Owns projection to the external shape and the bulk source location.
pub struct MalariaService<R: MalariaRepository> {
    repo: Arc<R>,
    dataset: PathBuf,
}

impl<R: MalariaRepository> MalariaService<R> {
    pub fn new(repo: Arc<R>, dataset: impl Into<PathBuf>) -> Self {
        Self { repo, dataset: dataset.into() }
    }

    pub async fn list(&self) -> Result<Vec<MalariaView>, ServiceError> {
        let rows = self.repo.list().await?;
        Ok(rows.iter().map(MalariaView::from).collect())
    }

    #[instrument(skip(self, query), fields(page = query.pagination.page, per_page = query.pagination.per_page))]
    pub async fn filter(&self, query: &FilterQuery) -> Result<FilterPage, ServiceError> {
        let (rows, total) = self.repo.page(&query.filter, query.pagination).await?;
        let meta = PageMeta::new(query.pagination, total);
        info!(total_items = meta.total_items, total_pages = meta.total_pages, "filtered malaria data");
        let items = rows.iter().map(MalariaView::from).collect();
        Ok(FilterPage::build(&query.filter, meta, items))
    }

    pub async fn get(&self, id: i32) -> Result<MalariaView, ServiceError> {
        self.repo
            .get(id)
            .await?
            .map(MalariaView::from)
            .ok_or_else(|| ServiceError::not_found("malaria data"))
    }

    /// First record for `iso`, case-insensitive. Duplicates resolve to the lowest id.
    pub async fn get_by_iso(&self, iso: &str) -> Result<MalariaView, ServiceError> {
        self.repo
            .first_by_iso(iso)
            .await?
            .map(MalariaView::from)
            .ok_or_else(|| ServiceError::not_found("malaria data"))
    }

    pub async fn isos(&self) -> Result<Vec<String>, ServiceError> {
        self.repo.distinct_isos().await
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewMalaria) -> Result<MalariaView, ServiceError> {
        let created = self.repo.create(input).await?;
        info!(id = created.id, "created malaria data");
        Ok(MalariaView::from(created))
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: MalariaPatch) -> Result<MalariaView, ServiceError> {
        let updated = self.repo.update(id, patch).await?;
        info!(id, "updated malaria data");
        Ok(MalariaView::from(updated))
    }

    /// Create from a raw JSON body. A body that cannot be read as a record is
    /// reported like any other failed write.
    pub async fn create_json(&self, body: &[u8]) -> Result<MalariaView, ServiceError> {
        let input: NewMalaria = parse_body(body)?;
        self.create(input).await
    }

    /// Update from a raw JSON body. The id is resolved before the body is read,
    /// so a missing record is always NotFound.
    pub async fn update_json(&self, id: i32, body: &[u8]) -> Result<MalariaView, ServiceError> {
        if self.repo.get(id).await?.is_none() {
            return Err(ServiceError::not_found("malaria data"));
        }
        let patch: MalariaPatch = parse_body(body)?;
        self.update(id, patch).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(id, "deleted malaria data");
        Ok(())
    }

    /// Drop and recreate the table, then reload it from the bulk source.
    /// The source is parsed first so a bad file leaves the store untouched.
    #[instrument(skip(self), fields(dataset = %self.dataset.display()))]
    pub async fn reset(&self) -> Result<u64, ServiceError> {
        let rows = import::read_csv(&self.dataset).await?;
        let loaded = self.repo.replace_all(rows).await?;
        info!(rows = loaded, "malaria database reset");
        Ok(loaded)
    }

    /// Seed an empty table from the bulk source. Returns `None` when the
    /// table already holds data.
    pub async fn import_if_empty(&self) -> Result<Option<u64>, ServiceError> {
        if self.repo.count().await? > 0 {
            return Ok(None);
        }
        let rows = import::read_csv(&self.dataset).await?;
        let loaded = self.repo.load(rows).await?;
        info!(rows = loaded, "malaria table seeded");
        Ok(Some(loaded))
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServiceError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(err = %e, "malaria payload rejected");
        ServiceError::Model(ModelError::Payload(e.to_string()))
    })
}
