//! Extractors whose rejections use the service's JSON error body.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use service_core::error::AppError;

/// JSON body extractor that rejects with [`AppError::BadRequest`].
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(error = %rejection.body_text(), "Rejected request body");
                let message = match rejection {
                    JsonRejection::JsonDataError(e) => {
                        format!("Invalid request body: {}", e.body_text())
                    }
                    JsonRejection::MissingJsonContentType(_) => {
                        "Expected a JSON body".to_string()
                    }
                    _ => "Malformed JSON body".to_string(),
                };
                AppError::BadRequest(anyhow::anyhow!(message))
            })?;

        Ok(JsonBody(value))
    }
}

/// Query string extractor that keeps the first value of a repeated key and
/// rejects with [`AppError::BadRequest`].
pub struct FirstValueQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for FirstValueQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::BadRequest(anyhow::anyhow!(
                    "Invalid query string: {}",
                    rejection.body_text()
                ))
            })?;

        let mut fields = Map::new();
        for (key, value) in pairs {
            fields.entry(key).or_insert(Value::String(value));
        }

        serde_json::from_value(Value::Object(fields))
            .map(FirstValueQuery)
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid query parameters: {}", e)))
    }
}
