use reqwest::{Method, StatusCode};

use super::ApiClient;
use crate::error::{ApiErrorBody, ClientError, Result};
use crate::models::{LoginRequest, LoginResponse, RegisterRequest};

impl ApiClient {
    /// `POST /api/login`. Does not store the token; the caller owns the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = self.endpoint("/api/login")?;
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.send_json(self.request(Method::POST, url).json(&body)).await?;
        tracing::info!("Login accepted for {}", email);
        Ok(response)
    }

    /// `POST /api/register`. Only `201 Created` counts as success.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        let url = self.endpoint("/api/register")?;
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let status = self.send_empty(self.request(Method::POST, url).json(&body)).await?;
        if status != StatusCode::CREATED {
            tracing::warn!("Register returned {} instead of 201", status.as_u16());
            return Err(ClientError::Api {
                status,
                body: ApiErrorBody {
                    message: Some("Registration failed".to_string()),
                    ..ApiErrorBody::default()
                },
            });
        }

        tracing::info!("Registered account {}", email);
        Ok(())
    }
}
