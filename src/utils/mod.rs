pub mod url_validation;
pub use url_validation::{UrlValidationError, normalize_base_url};
