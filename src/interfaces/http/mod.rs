//! HTTP interface layer

pub mod common;
pub mod modules;
pub mod router;

pub use common::{ApiResponse, EmptyData, ValidatedJson};
pub use router::{create_api_router, ApiState};
