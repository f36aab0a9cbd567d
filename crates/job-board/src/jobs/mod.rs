//! Job postings: listing, lookup, search with pagination, and creation.

pub mod domain;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Job, JobId, NewJob, Poster};
pub use query::{CountParams, DeadlineOrder, JobFilter, JobQuery, ListingParams, QueryError};
pub use repository::JobRepository;
pub use router::job_router;
pub use service::{JobService, JobServiceError};
