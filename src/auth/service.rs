// Authentication service - business logic layer

use crate::auth::{
    error::AuthError,
    models::{AuthResponse, RegisterRequest, Role, UpdateUserRequest, User, UserResponse},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};
use crate::query::Paginated;

/// Authentication service coordinating registration, login, and user
/// management
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    token_service: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(user_repo: UserRepository, token_service: TokenService) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// Register a new user and issue a token
    ///
    /// Role defaults to technician; the password is argon2-hashed before
    /// storage.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AuthError> {
        PasswordService::validate_password_strength(&request.password)?;

        let password_hash = PasswordService::hash_password(&request.password)?;
        let role = request.role.unwrap_or(Role::Technician);

        let user = self
            .user_repo
            .create_user(&request.name, &request.email, &password_hash, role)
            .await?;

        tracing::info!("Registered user {} with role {}", user.id, user.role);
        self.auth_response(user)
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password are indistinguishable to the caller;
    /// deactivated accounts are rejected before the password check.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.active {
            return Err(AuthError::AccountDeactivated);
        }

        if !PasswordService::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.auth_response(user)
    }

    /// Get the current user's profile
    pub async fn get_current_user(&self, user_id: i32) -> Result<UserResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserGone)?;

        Ok(user.into())
    }

    /// List all users (admin-only surface)
    pub async fn list_users(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Paginated<UserResponse>, AuthError> {
        let (total, users) = self.user_repo.list(limit, offset).await?;

        Ok(Paginated {
            total,
            items: users.into_iter().map(UserResponse::from).collect(),
            limit,
            offset,
        })
    }

    /// Get a user by id
    pub async fn get_user(&self, id: i32) -> Result<UserResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound(id))?;

        Ok(user.into())
    }

    /// Partially update a user; a supplied password is rehashed
    pub async fn update_user(
        &self,
        id: i32,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AuthError> {
        let password_hash = match &request.password {
            Some(password) => {
                PasswordService::validate_password_strength(password)?;
                Some(PasswordService::hash_password(password)?)
            }
            None => None,
        };

        let user = self
            .user_repo
            .update_user(
                id,
                request.name.as_deref(),
                request.email.as_deref(),
                password_hash.as_deref(),
                request.role,
                request.active,
            )
            .await?;

        Ok(user.into())
    }

    /// Deactivate a user account
    pub async fn deactivate_user(&self, id: i32) -> Result<UserResponse, AuthError> {
        let user = self.user_repo.deactivate(id).await?;
        tracing::info!("Deactivated user {}", user.id);
        Ok(user.into())
    }

    fn auth_response(&self, user: User) -> Result<AuthResponse, AuthError> {
        let token = self.token_service.generate_token(user.id, user.role)?;

        Ok(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            token,
        })
    }
}
