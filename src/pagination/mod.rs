//! Pagination module
//!
//! # Overview
//!
//! Eventbrite list endpoints wrap every page in a `pagination` envelope:
//!
//! ```json
//! {"pagination": {"has_more_items": true, "continuation": "ABC"}}
//! ```
//!
//! The paginator answers one question per page: is there another page, and
//! which continuation token fetches it. A missing or malformed envelope ends
//! pagination quietly instead of failing the stream.

mod strategies;
mod types;

pub use strategies::HasMoreItemsPaginator;
pub use types::{NextPage, PaginationState, Paginator};
