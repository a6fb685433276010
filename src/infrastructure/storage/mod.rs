pub mod cache;
pub mod domains;
pub mod keys;
