/// Provides a convenient way to add context to errors
///
/// # Example
/// ```ignore
/// with_context!(db_operation, "Failed to fetch user data")
/// ```
#[macro_export]
macro_rules! with_context {
    ($result:expr, $context:expr) => {
        $result.map_err(|e| {
            tracing::error!("{}: {}", $context, e);
            $crate::AppError::DatabaseError(anyhow::anyhow!("{}: {}", $context, e))
        })
    };

    ($result:expr, $error_type:ident, $context:expr) => {
        $result.map_err(|e| {
            tracing::error!("{}: {}", $context, e);
            $crate::AppError::$error_type(anyhow::anyhow!("{}: {}", $context, e))
        })
    };
}

/// Simplifies creating validation errors
///
/// # Example
/// ```ignore
/// validation_error!("username", "Username must be at least 6 characters long")
/// ```
#[macro_export]
macro_rules! validation_error {
    ($field:expr, $message:expr) => {
        Err($crate::AppError::ValidationError(format!(
            "Validation failed for '{}': {}",
            $field, $message
        )))
    };
}

/// Simplifies creating not found errors
///
/// # Example
/// ```ignore
/// not_found_error!("Blog", blog_id)
/// ```
#[macro_export]
macro_rules! not_found_error {
    ($resource_type:expr, $identifier:expr) => {
        Err($crate::AppError::NotFoundError(format!(
            "{} with identifier '{}' was not found.",
            $resource_type, $identifier
        )))
    };
}

/// Simplifies creating authentication errors
///
/// # Example
/// ```ignore
/// auth_error!("Invalid username or password")
/// ```
#[macro_export]
macro_rules! auth_error {
    ($message:expr) => {
        Err($crate::AppError::AuthenticationError($message.to_string()))
    };
}
