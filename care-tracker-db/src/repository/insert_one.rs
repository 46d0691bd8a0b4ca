use async_trait::async_trait;

/// Generic repository trait for inserting a single row
///
/// The store assigns the identifier and creation timestamp; the returned row
/// carries them.
///
/// # Type Parameters
/// * `N` - The input type for a new row
/// * `T` - The stored row type returned
///
/// # Example
/// ```ignore
/// impl InsertOne<NewPatientModel, PatientModel> for PatientRepositoryImpl {
///     async fn insert_one(&self, item: NewPatientModel) -> Result<PatientModel, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait InsertOne<N: Send + 'static, T: Send>: Send + Sync {
    /// Insert one row
    ///
    /// # Arguments
    /// * `item` - The row to insert
    ///
    /// # Returns
    /// * `Ok(T)` - The inserted row with server-assigned fields populated
    /// * `Err` - An error if the insert was rejected
    async fn insert_one(&self, item: N) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
