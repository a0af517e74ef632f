//! The single malaria resource: filtering, paging, lookups and mutations.

pub mod filter;
pub mod page;
pub mod repository;
pub mod service;

pub use filter::{FilterQuery, MalariaFilter, FILTER_PATH};
pub use page::FilterPage;
pub use repository::{MalariaRepository, SeaOrmMalariaRepository};
pub use service::MalariaService;
