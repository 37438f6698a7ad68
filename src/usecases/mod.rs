pub mod board;
pub mod scrape;
