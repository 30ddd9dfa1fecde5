use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;

use crate::auth::{parse_basic_header, password_matches, required_access, Access};
use crate::error::ApiError;
use crate::state::AppState;

use super::context::{AuthUser, RequestContext};

/// HTTP Basic authentication plus the static access rules.
///
/// Credentials are resolved whenever they are sent, even on open routes, so a
/// bad password is a 401 everywhere. The resolved caller travels on as a
/// [`RequestContext`] extension and as the `request` span.
pub async fn basic_auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let principal = match resolve_principal(&state, request.headers()).await {
        Ok(principal) => principal,
        Err(err) => return err.into_response(),
    };

    let access = required_access(request.method(), request.uri().path());
    if let Err(err) = authorize(access, principal.as_ref()) {
        return err.into_response();
    }

    let context = RequestContext::new(principal);
    let span = tracing::info_span!(
        "request",
        request_id = %context.request_id,
        user = %context.actor(),
    );
    request.extensions_mut().insert(context);

    next.run(request).instrument(span).await
}

/// `Ok(None)` when no credentials were sent
async fn resolve_principal(state: &AppState, headers: &HeaderMap) -> Result<Option<AuthUser>, ApiError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;
    let credentials = parse_basic_header(value).map_err(ApiError::unauthorized)?;

    let user = state
        .users
        .find_by_username(&credentials.username)
        .await?
        .filter(|user| password_matches(&user.password, &credentials.password))
        .ok_or_else(|| {
            tracing::warn!("Rejected credentials for '{}'", credentials.username);
            ApiError::unauthorized("Bad credentials")
        })?;

    tracing::debug!("Authenticated '{}' with {}", user.username, user.role);
    Ok(Some(AuthUser::from(&user)))
}

fn authorize(access: Access, principal: Option<&AuthUser>) -> Result<(), ApiError> {
    match (access, principal) {
        (Access::PermitAll, _) => Ok(()),
        (_, None) => Err(ApiError::unauthorized(
            "Full authentication is required to access this resource",
        )),
        (Access::Authenticated, Some(_)) => Ok(()),
        (Access::AnyRole(roles), Some(user)) => {
            if roles.iter().any(|role| user.has_role(role)) {
                Ok(())
            } else {
                Err(ApiError::forbidden(format!(
                    "Access Denied: '{}' lacks role {}",
                    user.username,
                    roles.join(" or ")
                )))
            }
        }
    }
}
