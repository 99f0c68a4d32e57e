//! Session context for mutating requests.
//!
//! There is no login flow. Callers identify themselves with the `x-user-id`
//! header, which must name an existing user. The resolved user authors every
//! activity log entry written during the request.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::entities::user;
use crate::errors::ServiceError;
use crate::repositories::UserRepository;
use crate::AppState;

/// Header carrying the acting user's id
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user on whose behalf the request runs.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub user::Model);

impl AuthenticatedUser {
    pub fn into_inner(self) -> user::Model {
        self.0
    }
}

fn user_id_from_parts(parts: &Parts) -> Result<i32, ServiceError> {
    let raw = parts
        .headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| ServiceError::Unauthorized(format!("missing {} header", USER_ID_HEADER)))?;

    raw.to_str()
        .ok()
        .and_then(|value| value.trim().parse::<i32>().ok())
        .ok_or_else(|| ServiceError::Unauthorized(format!("malformed {} header", USER_ID_HEADER)))
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user_id = user_id_from_parts(parts)?;
        let user = UserRepository::new(state.db.as_ref())
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id, "request names an unknown user");
                ServiceError::Unauthorized(format!("unknown user {}", user_id))
            })?;

        tracing::Span::current().record("user_id", user.id);
        Ok(AuthenticatedUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/current-user");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn reads_numeric_user_id() {
        assert_eq!(user_id_from_parts(&parts_with(Some(" 7 "))).unwrap(), 7);
    }

    #[test]
    fn missing_or_malformed_header_is_unauthorized() {
        assert_matches!(
            user_id_from_parts(&parts_with(None)),
            Err(ServiceError::Unauthorized(_))
        );
        assert_matches!(
            user_id_from_parts(&parts_with(Some("admin"))),
            Err(ServiceError::Unauthorized(_))
        );
    }
}
