//! Data Transfer Objects for the JSON API and the HTML views.

pub mod request;
pub mod response;
pub mod validation;

pub use request::*;
pub use response::*;
pub use validation::ValidatedJson;
