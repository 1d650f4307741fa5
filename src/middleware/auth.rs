use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{extract_bearer_token, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub subject: String,
    pub scopes: Vec<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            scopes: claims
                .scope
                .as_deref()
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Rejects the request with 401 unless it carries a valid bearer token, and
/// makes the caller available to handlers as `Extension<AuthUser>`.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = extract_bearer_token(request.headers())?;
        state.verifier().verify(token)?
    };

    let auth_user = AuthUser::from(claims);
    tracing::debug!(subject = %auth_user.subject, "Authenticated request");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_scopes() {
        let user = AuthUser::from(Claims {
            sub: "auth0|abc".into(),
            iss: "https://tenant/".into(),
            exp: 0,
            iat: None,
            scope: Some("read:radar  write:radar".into()),
        });
        assert_eq!(user.subject, "auth0|abc");
        assert_eq!(user.scopes, vec!["read:radar", "write:radar"]);
    }

    #[test]
    fn missing_scope_means_no_scopes() {
        let user = AuthUser::from(Claims {
            sub: "client@clients".into(),
            iss: "https://tenant/".into(),
            exp: 0,
            iat: None,
            scope: None,
        });
        assert!(user.scopes.is_empty());
    }
}
