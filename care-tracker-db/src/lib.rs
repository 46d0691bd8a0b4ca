pub mod models;
pub mod registry;
pub mod repository;
pub mod views;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use models::*;
pub use registry::*;
pub use repository::*;
pub use views::*;
