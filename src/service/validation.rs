//! Request body parsing and validation for Customer writes.

use crate::error::AppError;
use crate::model::{NewCustomer, EMAIL_MAX_LEN, NAME_MAX_LEN};
use serde::Deserialize;

/// Raw create body. Absent fields decode as empty and fail validation.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCustomerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

pub struct RequestValidator;

impl RequestValidator {
    /// Decode a create body. Syntax errors and non-string fields are rejected.
    pub fn parse_create(body: &[u8]) -> Result<CreateCustomerRequest, AppError> {
        serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "rejecting create body");
            AppError::BadRequest("invalid JSON body".into())
        })
    }

    /// Trim both fields; both must be non-empty and within the column limits.
    pub fn validate_create(req: CreateCustomerRequest) -> Result<NewCustomer, AppError> {
        let name = req.name.trim().to_string();
        let email = req.email.trim().to_string();
        if name.is_empty() || email.is_empty() {
            return Err(AppError::BadRequest("name and email are required".into()));
        }
        check_max_length("name", &name, NAME_MAX_LEN)?;
        check_max_length("email", &email, EMAIL_MAX_LEN)?;
        Ok(NewCustomer { name, email })
    }
}

fn check_max_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
