use async_trait::async_trait;
use uuid::Uuid;

/// Generic repository trait for a partial update of the row with a given id
///
/// # Type Parameters
/// * `C` - The change set type
/// * `T` - The stored row type returned
///
/// # Example
/// ```ignore
/// impl UpdateOne<PatientChanges, PatientModel> for PatientRepositoryImpl {
///     async fn update_one(&self, id: Uuid, changes: PatientChanges) -> Result<Option<PatientModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait UpdateOne<C: Send + 'static, T: Send>: Send + Sync {
    /// Apply the changes to the row with the given id
    ///
    /// # Arguments
    /// * `id` - The UUID of the row to update
    /// * `changes` - The fields to change
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The row after the update
    /// * `Ok(None)` - If no row has that id
    /// * `Err` - An error if the update was rejected
    async fn update_one(
        &self,
        id: Uuid,
        changes: C,
    ) -> Result<Option<T>, Box<dyn std::error::Error + Send + Sync>>;
}
