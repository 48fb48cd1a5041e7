//! News items: domain entity, repository seam, and the public/admin services.

pub mod domain;
pub mod format;
pub mod repository;
pub mod repo;
pub mod public;
pub mod admin;

pub use admin::{AdminNewsService, SubmitOutcome};
pub use domain::{NewsItem, NewsItemInput};
pub use format::ResponseFormat;
pub use public::{NewsListing, NewsPage, PublicNewsService};
pub use repository::NewsItemRepository;
