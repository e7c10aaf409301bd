//! Login and signup flows
//!
//! Forms are validated locally before any request is made. The built-in
//! demo account never touches the network.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::api::{ApiError, LoginRequest, PredictionClient, RegisterRequest};
use crate::session::{Session, DEMO_EMAIL, DEMO_PASSWORD};

pub const MIN_PASSWORD_LEN: usize = 6;

pub const LOGIN_HINT: &str = "Invalid email or password. Try demo: admin@vahanai.com / password";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        source: ApiError,
    },
}

pub struct Credentials {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.email == DEMO_EMAIL && self.password.as_str() == DEMO_PASSWORD
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub confirm_password: Zeroizing<String>,
    pub vehicle_number: Option<String>,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.as_str() != self.confirm_password.as_str() {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        Ok(())
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern should compile")
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Validate the form and accept the demo account without a client.
/// `None` means the credentials have to go to the service.
pub fn demo_login(credentials: &Credentials) -> Result<Option<Session>, AuthError> {
    credentials.validate()?;

    if credentials.is_demo() {
        tracing::info!("demo credentials accepted locally");
        return Ok(Some(Session::demo()));
    }
    Ok(None)
}

/// Authenticate, returning the session to persist.
pub fn login(client: &PredictionClient, credentials: &Credentials) -> Result<Session, AuthError> {
    if let Some(session) = demo_login(credentials)? {
        return Ok(session);
    }

    let request = LoginRequest {
        email: &credentials.email,
        password: &credentials.password,
    };

    match client.login(&request) {
        Ok(response) => {
            tracing::info!(email = %credentials.email, "login succeeded");
            Ok(Session::new(response.access_token, response.user))
        }
        Err(err) => {
            tracing::warn!(error = %err, "login failed");
            let message = match &err {
                ApiError::Status { message, .. } => message.clone(),
                _ => LOGIN_HINT.to_string(),
            };
            Err(AuthError::Rejected {
                message,
                source: err,
            })
        }
    }
}

/// Create an account, returning the session to persist.
pub fn register(client: &PredictionClient, form: &SignupForm) -> Result<Session, AuthError> {
    form.validate()?;

    let request = RegisterRequest {
        username: form.username.trim(),
        email: form.email.trim(),
        password: &form.password,
        vehicle_number: form
            .vehicle_number
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty()),
    };

    match client.register(&request) {
        Ok(response) => {
            tracing::info!(email = %request.email, "registration succeeded");
            Ok(Session::new(response.access_token, response.user))
        }
        Err(err) => {
            tracing::warn!(error = %err, "registration failed");
            Err(AuthError::Rejected {
                message: err.user_message(),
                source: err,
            })
        }
    }
}
