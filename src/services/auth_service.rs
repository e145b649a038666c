use reqwest::Method;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, RefreshTokenResponse, RegisterRequest,
    ResetPasswordRequest, UpdateProfileRequest, User, UserRole,
};
use crate::utils::{read_session_claims, validate_new_password, validate_request, SessionClaims};

use super::ApiClient;

/// Registration answers with the created user, sometimes wrapped in a session.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegisterResponse {
    Session(LoginResponse),
    User(User),
}

/// Calls against `/auth`, plus the credential lifecycle around them.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Log in and persist the returned credential.
    pub async fn login(&self, req: LoginRequest) -> AppResult<LoginResponse> {
        validate_request(&req)?;

        let request = self.api.request(Method::POST, "/auth/login").json(&req);
        let response: LoginResponse = self.api.send_json(request).await?;

        self.api.tokens().set(&response.token)?;
        tracing::info!(user_id = response.user.id, role = %response.user.role, "Logged in");

        Ok(response)
    }

    /// Create an account for `role`. The current session is left untouched.
    pub async fn register(&self, role: UserRole, req: RegisterRequest) -> AppResult<User> {
        validate_request(&req)?;

        let request = self
            .api
            .request(Method::POST, &format!("/auth/register/{}", role.path_segment()))
            .json(&req);

        let user = match self.api.send_json::<RegisterResponse>(request).await? {
            RegisterResponse::Session(session) => session.user,
            RegisterResponse::User(user) => user,
        };
        tracing::info!(user_id = user.id, role = %role, "Registered account");

        Ok(user)
    }

    pub async fn forgot_password(&self, email: &str) -> AppResult<()> {
        let req = ForgotPasswordRequest {
            email: email.trim().to_string(),
        };
        validate_request(&req)?;

        let request = self
            .api
            .request(Method::POST, "/auth/forgot-password")
            .query(&[("email", req.email.as_str())]);
        self.api.send_empty(request).await
    }

    /// Reset a password with the token from the reset link. The new password
    /// is checked locally before anything is sent.
    pub async fn reset_password(&self, token: &str, new_password: &str, confirm: &str) -> AppResult<()> {
        validate_new_password(new_password, confirm, self.api.messages())?;

        if token.trim().is_empty() {
            return Err(AppError::ValidationError(
                self.api.messages().reset_token_missing().to_string(),
            ));
        }

        let body = ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        let request = self
            .api
            .request(Method::POST, "/auth/reset-password")
            .json(&body);
        self.api.send_empty(request).await
    }

    pub async fn get_profile(&self) -> AppResult<User> {
        let request = self.api.request(Method::GET, "/auth/profile");
        self.api.send_json(request).await
    }

    pub async fn update_profile(&self, req: UpdateProfileRequest) -> AppResult<User> {
        let request = self.api.request(Method::PUT, "/auth/profile").json(&req);
        self.api.send_json(request).await
    }

    /// Exchange the current credential for a fresh one and store it.
    pub async fn refresh_token(&self) -> AppResult<String> {
        let request = self.api.request(Method::POST, "/auth/refresh");
        let response: RefreshTokenResponse = self.api.send_json(request).await?;

        self.api.tokens().set(&response.token)?;
        tracing::info!("Session token refreshed");

        Ok(response.token)
    }

    pub fn logout(&self) -> AppResult<()> {
        self.api.tokens().remove()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Claims of the stored credential, if one is stored and readable.
    pub fn current_session(&self) -> AppResult<Option<SessionClaims>> {
        match self.api.tokens().get()? {
            Some(token) => read_session_claims(&token).map(Some),
            None => Ok(None),
        }
    }
}
