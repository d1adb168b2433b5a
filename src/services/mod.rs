pub mod crawl_service;
pub mod curation_service;
pub mod scope_service;

pub use crawl_service::CrawlService;
pub use curation_service::{CurationService, FeedRequest};
pub use scope_service::ScopeService;
