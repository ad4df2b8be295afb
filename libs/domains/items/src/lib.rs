//! Items Domain
//!
//! CRUD over a single item resource with interchangeable storage backends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, validated JSON in, envelopes out
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Pagination, timestamps, error classification
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + MongoDB, PostgreSQL and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{handlers, mongodb::MongoItemRepository, service::ItemService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoItemRepository::new(client.database("items_api"));
//! repository.init_indexes().await?;
//!
//! let service = ItemService::new(repository).with_max_page_size(100);
//! let router = handlers::router(service, false);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod pagination;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{ItemError, ItemResult, Operation};
pub use handlers::{ApiDoc, ItemsState};
pub use memory::InMemoryItemRepository;
pub use models::{CreateItem, Item, ItemFilter, ItemId, ItemStatus, UnknownStatus, UpdateItem};
pub use mongodb::MongoItemRepository;
pub use pagination::{Page, PageRequest, Pagination};
pub use postgres::PgItemRepository;
pub use repository::{ItemQuery, ItemRepository, ItemSort, RepositoryError};
pub use service::ItemService;
pub use validation::{ValidationMode, validate};
