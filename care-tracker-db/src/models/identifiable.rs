use uuid::Uuid;

/// Trait for rows that can be uniquely identified by a server-assigned UUID
pub trait Identifiable {
    /// Returns the unique identifier of the row
    fn get_id(&self) -> Uuid;
}
