use async_trait::async_trait;

/// Generic repository trait for selecting rows from a table with a filter
///
/// This trait provides a standard interface for reading rows from the table store.
/// The filter type carries the equality predicates; the ordering is fixed per filter
/// type and documented on it.
///
/// # Type Parameters
/// * `F` - The filter type
/// * `T` - The row type returned
///
/// # Example
/// ```ignore
/// impl SelectRows<PatientFilter, PatientModel> for PatientRepositoryImpl {
///     async fn select_rows(&self, filter: PatientFilter) -> Result<Vec<PatientModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait SelectRows<F: Send + 'static, T: Send>: Send + Sync {
    /// Select all rows matching the filter
    ///
    /// # Arguments
    /// * `filter` - The predicates rows must satisfy
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The matching rows, in the filter's order
    /// * `Err` - An error if the query could not be executed
    async fn select_rows(&self, filter: F) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
