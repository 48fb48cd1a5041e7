//! Service layer for news items on top of `models`.
//! - `news_item::public` serves the read-only listing and detail pages.
//! - `news_item::admin` drives the create/edit forms.
//! - Persistence goes through the injected `NewsItemRepository`.

pub mod errors;
pub mod news_item;
#[cfg(test)]
pub mod test_support;
