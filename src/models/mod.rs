pub mod board;
pub mod product;
