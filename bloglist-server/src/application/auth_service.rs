use std::sync::Arc;

use tracing::{info, warn};

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, User};
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::{DUMMY_PASSWORD_HASH, verify_password};

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: Arc<JwtService>,
}

impl<R: UserRepository> AuthService<R> {
    pub(crate) fn new(repo: R, jwt: Arc<JwtService>) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.repo.find_by_username(&req.username).await? {
            Some(user_creds) => user_creds,
            None => {
                // стремимся к одинаковому времени проверки если user не найден
                match verify_password(&req.password, DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                warn!(username = %req.username, "login rejected");
                return Err(DomainError::InvalidCredentials);
            }
        };

        if let Err(err) = verify_password(&req.password, &user_creds.password_hash) {
            warn!(username = %req.username, "login rejected");
            return Err(err);
        }

        let access_token = self
            .jwt
            .generate_token(user_creds.user.id, &user_creds.user.username)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        info!(user_id = user_creds.user.id, "user logged in");
        Ok(AuthResult {
            user: user_creds.user,
            access_token,
        })
    }
}
