// Authentication module
// Provides JWT-based authentication with user registration, login, and
// role-based route guards

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{
    deactivate_user_handler, get_user_handler, list_users_handler, login_handler, me_handler,
    register_handler, update_user_handler,
};
pub use middleware::{AuthenticatedUser, RequireAdmin, RequireTechnician};
pub use models::{AuthResponse, LoginRequest, RegisterRequest, Role, User, UserResponse};
pub use repository::UserRepository;
pub use service::AuthService;
pub use token::TokenService;
