// Authentication extractors for protected routes

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::auth::{error::AuthError, models::Role};
use crate::AppState;

/// Authenticated caller identity, resolved against the users table
///
/// Extraction fails with 401 when the bearer token is missing, malformed, or
/// expired, and when the referenced user no longer exists or is deactivated.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub role: Role,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let claims = state.token_service.validate_token(token)?;

        // The token alone is not enough: the account must still exist and be
        // active at request time.
        let user = state.auth_service.get_current_user(claims.sub).await?;

        if !user.active {
            return Err(AuthError::AccountDeactivated);
        }

        debug!("Authenticated user {} with role {}", user.id, user.role);
        Ok(AuthenticatedUser {
            user_id: user.id,
            role: user.role,
        })
    }
}

/// Authorization policy check: the caller's role must satisfy the route
/// requirement
pub fn authorize(user: &AuthenticatedUser, required: Role) -> Result<(), AuthError> {
    if user.role.satisfies(required) {
        Ok(())
    } else {
        Err(AuthError::InsufficientPermissions {
            required,
            actual: user.role,
        })
    }
}

/// Route guard extractor: admin role required
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        authorize(&user, Role::Admin)?;
        Ok(RequireAdmin(user))
    }
}

/// Route guard extractor: technician or admin role required
#[derive(Debug, Clone)]
pub struct RequireTechnician(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireTechnician {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        authorize(&user, Role::Technician)?;
        Ok(RequireTechnician(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Role) -> AuthenticatedUser {
        AuthenticatedUser { user_id: 1, role }
    }

    #[test]
    fn test_admin_passes_both_policies() {
        assert!(authorize(&caller(Role::Admin), Role::Admin).is_ok());
        assert!(authorize(&caller(Role::Admin), Role::Technician).is_ok());
    }

    #[test]
    fn test_technician_blocked_from_admin_routes() {
        let result = authorize(&caller(Role::Technician), Role::Admin);
        match result {
            Err(AuthError::InsufficientPermissions { required, actual }) => {
                assert_eq!(required, Role::Admin);
                assert_eq!(actual, Role::Technician);
            }
            other => panic!("expected InsufficientPermissions, got {:?}", other),
        }
    }

    #[test]
    fn test_technician_passes_technician_policy() {
        assert!(authorize(&caller(Role::Technician), Role::Technician).is_ok());
    }
}
