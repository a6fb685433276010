pub mod collections;
pub mod details;
pub mod enrich;
pub mod entities;
pub mod fallback;
pub mod fanout;
pub mod mapping;
pub mod reference_loader;
