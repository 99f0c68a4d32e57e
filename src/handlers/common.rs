use crate::errors::ServiceError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input.validate().map_err(ServiceError::from)
}

/// JSON body that has been deserialized and validated.
///
/// Malformed bodies, unknown enum literals and failed validation rules all
/// surface as 400 with the `ServiceError` body instead of axum's plain-text 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        validate_input(&value)?;
        Ok(ValidatedJson(value))
    }
}

/// Numeric `:id` path segment; anything else is a 400 with the standard error body.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i32);

#[axum::async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i32>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| IdPath(id))
            .map_err(|rejection| ServiceError::InvalidInput(rejection.body_text()))
    }
}

/// Query string parameters; a malformed query is a 400 with the standard error body.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| QueryParams(value))
            .map_err(|rejection| ServiceError::InvalidInput(rejection.body_text()))
    }
}

fn json_rejection(rejection: JsonRejection) -> ServiceError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ServiceError::InvalidInput("expected a JSON body with content-type application/json".to_string())
        }
        other => ServiceError::InvalidInput(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Probe {
        #[validate(range(min = 1))]
        batch_size: i32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let ValidatedJson(probe) = ValidatedJson::<Probe>::from_request(json_request(r#"{"batchSize": 5}"#), &())
            .await
            .unwrap();
        assert_eq!(probe.batch_size, 5);
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_input() {
        let result = ValidatedJson::<Probe>::from_request(json_request("{"), &()).await;
        assert_matches!(result, Err(ServiceError::InvalidInput(_)));

        let result = ValidatedJson::<Probe>::from_request(json_request(r#"{"batchSize": "x"}"#), &()).await;
        assert_matches!(result, Err(ServiceError::InvalidInput(_)));
    }

    #[derive(Debug, Deserialize)]
    struct Paging {
        limit: Option<u64>,
    }

    #[tokio::test]
    async fn malformed_query_is_invalid_input() {
        let mut parts = Request::builder()
            .uri("/recent?limit=lots")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        let result = QueryParams::<Paging>::from_request_parts(&mut parts, &()).await;
        assert_matches!(result, Err(ServiceError::InvalidInput(_)));

        let mut parts = Request::builder()
            .uri("/recent?limit=4")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        let QueryParams(paging) = QueryParams::<Paging>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(paging.limit, Some(4));
    }

    #[tokio::test]
    async fn rule_violation_lists_fields() {
        let result = ValidatedJson::<Probe>::from_request(json_request(r#"{"batchSize": 0}"#), &()).await;
        assert_matches!(result, Err(ServiceError::InvalidFields(fields)) if fields[0].field == "batchSize");
    }
}
