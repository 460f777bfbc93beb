use reqwest::StatusCode;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::notify::Toaster;
use crate::routes::{Navigation, Route};
use crate::session::Session;
use crate::validation::{
    validate_email, validate_min_len, validate_required, ValidationError, PASSWORD_MIN_LEN,
    USERNAME_MIN_LEN,
};

const LOGIN_FALLBACK: &str = "Login failed. Please check your credentials.";
const REGISTER_FALLBACK: &str = "Registration failed. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Returns every field error, in field order.
    pub fn validate(&self) -> Vec<ValidationError> {
        [
            validate_email("email", &self.email),
            validate_required("password", &self.password, "Password is required"),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = [
            validate_min_len(
                "username",
                &self.username,
                USERNAME_MIN_LEN,
                "Username must be at least 2 characters",
            ),
            validate_email("email", &self.email),
            validate_min_len(
                "password",
                &self.password,
                PASSWORD_MIN_LEN,
                "Password must be at least 6 characters",
            ),
            validate_min_len(
                "confirmPassword",
                &self.confirm_password,
                PASSWORD_MIN_LEN,
                "Confirm password must be at least 6 characters",
            ),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        // The mismatch check runs only once the field-level rules pass.
        if errors.is_empty() && self.password != self.confirm_password {
            errors.push(ValidationError::new("confirmPassword", "Passwords don't match"));
        }

        errors
    }
}

/// Maps a failed login to the message shown to the user.
pub fn login_error_message(err: &ClientError) -> String {
    let name = err.body().and_then(|body| body.name.as_deref());

    match name {
        Some("emailrequired") => "Email is required.".to_string(),
        Some("passwordrequired") => "Password is required.".to_string(),
        Some("unauthentication") => "Invalid email or password.".to_string(),
        _ => LOGIN_FALLBACK.to_string(),
    }
}

/// Maps a failed registration to the message shown to the user.
pub fn register_error_message(err: &ClientError) -> String {
    let Some(body) = err.body() else {
        return REGISTER_FALLBACK.to_string();
    };

    if body.message.as_deref() == Some("Validation failed") && body.errors.is_some() {
        return body.validation_messages().join(", ");
    }

    if err.status() == Some(StatusCode::CONFLICT) {
        return "This email is already registered.".to_string();
    }

    REGISTER_FALLBACK.to_string()
}

pub struct LoginPage {
    api: ApiClient,
    pub form: LoginForm,
    pub is_loading: bool,
    pub field_errors: Vec<ValidationError>,
    pub toasts: Toaster,
}

impl LoginPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            form: LoginForm::default(),
            is_loading: false,
            field_errors: Vec::new(),
            toasts: Toaster::default(),
        }
    }

    /// Validates, logs in and stores the token. Returns where to go next.
    pub async fn submit(&mut self, session: &mut Session) -> Option<Navigation> {
        self.field_errors = self.form.validate();
        if !self.field_errors.is_empty() {
            return None;
        }

        self.is_loading = true;
        let result = self.api.login(&self.form.email, &self.form.password).await;
        self.is_loading = false;

        match result {
            Ok(response) => {
                if let Err(e) = session.store_token(&response.access_token) {
                    tracing::error!("Failed to persist session token: {}", e);
                    self.toasts
                        .error("Login Error", Some("Could not save your session.".to_string()));
                    return None;
                }
                self.toasts.success(
                    "Login successful",
                    Some("You are being redirected to the dashboard.".to_string()),
                );
                Some(Navigation::to(Route::Home))
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.toasts.error("Login Error", Some(login_error_message(&e)));
                None
            }
        }
    }
}

pub struct RegisterPage {
    api: ApiClient,
    pub form: RegisterForm,
    pub is_loading: bool,
    pub field_errors: Vec<ValidationError>,
    pub toasts: Toaster,
}

impl RegisterPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            form: RegisterForm::default(),
            is_loading: false,
            field_errors: Vec::new(),
            toasts: Toaster::default(),
        }
    }

    /// Registers the account; the confirmation field is never sent.
    pub async fn submit(&mut self) -> Option<Navigation> {
        self.field_errors = self.form.validate();
        if !self.field_errors.is_empty() {
            return None;
        }

        self.is_loading = true;
        let result = self
            .api
            .register(&self.form.username, &self.form.email, &self.form.password)
            .await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                self.toasts.success(
                    "Registration successful",
                    Some("You can now log in with your new account.".to_string()),
                );
                Some(Navigation::to(Route::Login))
            }
            Err(e) => {
                tracing::warn!("Registration failed: {}", e);
                self.toasts
                    .error("Registration Error", Some(register_error_message(&e)));
                None
            }
        }
    }
}
