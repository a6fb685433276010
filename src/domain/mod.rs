pub mod error;
pub mod model;
pub mod query;
pub mod reference;
pub mod traits;
