//! Resource domain module

pub mod model;
pub mod repository;

pub use model::{Resource, ResourceStatus};
pub use repository::ResourceRepository;
