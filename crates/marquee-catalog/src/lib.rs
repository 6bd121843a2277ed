pub mod error;
pub mod request;
pub mod tmdb;
pub mod traits;

pub use error::{CatalogError, Result};
pub use request::CatalogRequest;
pub use tmdb::TmdbClient;
pub use traits::CatalogApi;
