//! Result type alias for Domekeeper

use super::errors::DomekeeperError;

/// Result type alias for Domekeeper operations
///
/// # Examples
///
/// ```
/// use domekeeper::domain::result::Result;
/// use domekeeper::domain::errors::DomekeeperError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DomekeeperError::Validation("missing scientific name".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DomekeeperError>;
