/// CRUD and ordering tests for `news_items` against an in-memory database
pub mod news_item_tests;
