pub mod errors;
pub mod db;
pub mod news_item;

#[cfg(test)]
mod tests;
