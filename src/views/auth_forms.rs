use crate::error::AppError;
use crate::models::{LoginRequest, User};
use crate::services::AuthService;
use crate::utils::{is_valid_email, validate_new_password};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl FormStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormStatus::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FormStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum FormAction {
    Submitted,
    Succeeded(String),
    Failed(String),
    Edited,
}

pub fn reduce_form(status: FormStatus, action: FormAction) -> FormStatus {
    match (status, action) {
        (_, FormAction::Submitted) => FormStatus::Submitting,
        (_, FormAction::Succeeded(msg)) => FormStatus::Succeeded(msg),
        (_, FormAction::Failed(msg)) => FormStatus::Failed(msg),
        (FormStatus::Submitting, FormAction::Edited) => FormStatus::Submitting,
        (_, FormAction::Edited) => FormStatus::Idle,
    }
}

fn apply(status: &mut FormStatus, action: FormAction) {
    *status = reduce_form(std::mem::take(status), action);
}

fn failure_message(err: &AppError) -> String {
    err.user_message().to_string()
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub status: FormStatus,
    pub user: Option<User>,
}

impl LoginForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            ..Default::default()
        }
    }

    pub async fn submit(&mut self, auth: &AuthService) -> &FormStatus {
        if self.status.is_submitting() {
            return &self.status;
        }

        let messages = auth.api().messages();
        if !is_valid_email(&self.email) {
            apply(&mut self.status, FormAction::Failed(messages.invalid_email().to_string()));
            return &self.status;
        }
        if self.password.is_empty() {
            apply(&mut self.status, FormAction::Failed(messages.password_required().to_string()));
            return &self.status;
        }

        apply(&mut self.status, FormAction::Submitted);
        let req = LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        match auth.login(req).await {
            Ok(response) => {
                let greeting = response
                    .user
                    .name
                    .clone()
                    .unwrap_or_else(|| response.user.email.clone());
                self.user = Some(response.user);
                apply(&mut self.status, FormAction::Succeeded(greeting));
            }
            Err(e) => apply(&mut self.status, FormAction::Failed(failure_message(&e))),
        }
        &self.status
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
    pub status: FormStatus,
}

impl ForgotPasswordForm {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Default::default()
        }
    }

    pub async fn submit(&mut self, auth: &AuthService) -> &FormStatus {
        if self.status.is_submitting() {
            return &self.status;
        }

        let messages = auth.api().messages();
        if !is_valid_email(&self.email) {
            apply(&mut self.status, FormAction::Failed(messages.invalid_email().to_string()));
            return &self.status;
        }

        apply(&mut self.status, FormAction::Submitted);
        match auth.forgot_password(&self.email).await {
            Ok(()) => apply(
                &mut self.status,
                FormAction::Succeeded(messages.reset_link_sent().to_string()),
            ),
            Err(e) => apply(&mut self.status, FormAction::Failed(failure_message(&e))),
        }
        &self.status
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    /// Token from the reset link.
    pub token: String,
    pub password: String,
    pub confirm_password: String,
    pub status: FormStatus,
}

impl ResetPasswordForm {
    pub fn new(token: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            token: token.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
            ..Default::default()
        }
    }

    pub async fn submit(&mut self, auth: &AuthService) -> &FormStatus {
        if self.status.is_submitting() {
            return &self.status;
        }

        let messages = auth.api().messages();
        if let Err(e) = validate_new_password(&self.password, &self.confirm_password, messages) {
            apply(&mut self.status, FormAction::Failed(failure_message(&e)));
            return &self.status;
        }
        if self.token.trim().is_empty() {
            apply(
                &mut self.status,
                FormAction::Failed(messages.reset_token_missing().to_string()),
            );
            return &self.status;
        }

        apply(&mut self.status, FormAction::Submitted);
        match auth
            .reset_password(&self.token, &self.password, &self.confirm_password)
            .await
        {
            Ok(()) => apply(
                &mut self.status,
                FormAction::Succeeded(messages.password_reset_done().to_string()),
            ),
            Err(e) => apply(&mut self.status, FormAction::Failed(failure_message(&e))),
        }
        &self.status
    }
}
