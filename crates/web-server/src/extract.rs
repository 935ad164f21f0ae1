use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use core_types::Validate;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A JSON body that has already passed its validator.
///
/// Malformed JSON is rejected with a 400 `ErrorBody`; a body that decodes but
/// breaks field rules is rejected with a 400 `ValidationErrorBody`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
