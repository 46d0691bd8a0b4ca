pub mod identifiable;
pub mod patient;
pub mod care_event;

// Re-exports
pub use identifiable::*;
pub use patient::*;
pub use care_event::*;
