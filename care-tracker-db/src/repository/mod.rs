pub mod select_rows;
pub mod insert_one;
pub mod update_one;
pub mod store;

// Re-exports
pub use select_rows::*;
pub use insert_one::*;
pub use update_one::*;
pub use store::*;
