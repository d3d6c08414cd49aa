//! Headless core of the customer directory client: the HTTP API surface and
//! the view-model state the UI renders from.
//!
//! Two cooperating pieces mirror the page structure:
//! - [`DirectoryState`] is the data fetcher's observable state (loading /
//!   error / data) with explicit transitions, driven by whoever runs the fetch.
//! - [`CustomerDraft`] owns the transient add-customer form state and its
//!   open / edit / validate / close lifecycle.
//!
//! [`CustomerApi`] is the thin typed client for the two endpoint operations.

use reqwest::{Client, StatusCode};
use shared::domain::{Customer, NewCustomer};
use shared::error::ApiError;
use thiserror::Error;
use url::Url;

/// Endpoint path, relative to the configured server base URL.
pub const CUSTOMERS_PATH: &str = "api/customers";

/// Helper text shown under the email field while its shape check fails.
pub const EMAIL_HELPER_TEXT: &str = "Please enter a valid email address";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered non-2xx with a parseable [`ApiError`] body.
    #[error("{0}")]
    Api(ApiError),
    /// Non-2xx status whose body was not a structured error payload.
    #[error("unexpected response status {0}")]
    UnexpectedStatus(StatusCode),
    /// Connection, DNS, or body-decoding failure below the API layer.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid server url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Message for the "Error: {message}" surface: API failures show the
    /// server-provided message, everything else its own description.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api(err) => err.message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Typed client for `GET`/`POST {base}/api/customers`.
pub struct CustomerApi {
    http: Client,
    endpoint: Url,
}

impl CustomerApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        let endpoint = base.join(CUSTOMERS_PATH)?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the full customer list. Server ordering is preserved as
    /// received; the caller never re-sorts.
    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        let response = self.http.get(self.endpoint.clone()).send().await?;
        let response = check_status(response).await?;
        let customers = response.json::<Vec<Customer>>().await?;
        tracing::debug!(count = customers.len(), "fetched customer list");
        Ok(customers)
    }

    /// Creates a customer. Any 2xx is success; the response body is ignored
    /// beyond existence.
    pub async fn create_customer(&self, payload: &NewCustomer) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        check_status(response).await?;
        tracing::debug!(email = %payload.email, "created customer");
        Ok(())
    }
}

/// Throw-on-not-ok: non-2xx responses become [`ClientError::Api`] when the
/// body carries the structured payload, [`ClientError::UnexpectedStatus`]
/// otherwise.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match response.json::<ApiError>().await {
        Ok(body) => Err(ClientError::Api(body)),
        Err(_) => Err(ClientError::UnexpectedStatus(status)),
    }
}

/// Observable fetch state for the customer list.
///
/// `customers` always holds the last successful result; a failed revalidation
/// records the error without touching it. The renderer gives the error view
/// precedence, so stale data reappears only after the next successful fetch.
#[derive(Debug, Clone, Default)]
pub struct DirectoryState {
    loading: bool,
    error: Option<String>,
    customers: Option<Vec<Customer>>,
}

impl DirectoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fetch or revalidation request went out.
    pub fn fetch_started(&mut self) {
        self.loading = true;
    }

    /// Replaces the displayed list and clears any prior error.
    pub fn fetch_succeeded(&mut self, customers: Vec<Customer>) {
        self.loading = false;
        self.error = None;
        self.customers = Some(customers);
    }

    /// Surfaces a fetch failure. Previously fetched data stays in place until
    /// the next successful revalidation.
    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn customers(&self) -> Option<&[Customer]> {
        self.customers.as_deref()
    }

    /// Count heading for the table, e.g. "1 Customer" / "3 Customers".
    pub fn count_label(&self) -> String {
        shared::domain::count_label(self.customers.as_ref().map_or(0, Vec::len))
    }
}

/// Transient state of the add-customer dialog.
///
/// Everything here is ephemeral: closing the dialog, whether by cancel or by
/// a successful submit, resets every field and the email error.
#[derive(Debug, Clone, Default)]
pub struct CustomerDraft {
    open: bool,
    pub first_name: String,
    pub last_name: String,
    pub business_name: String,
    pub email: String,
    email_error: Option<String>,
}

impl CustomerDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog with blank fields.
    pub fn open(&mut self) {
        *self = Self {
            open: true,
            ..Self::default()
        };
    }

    /// Closes the dialog and clears all draft state.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn email_error(&self) -> Option<&str> {
        self.email_error.as_deref()
    }

    /// On-change handling for the email field: an emptied field shows no
    /// error yet, a malformed one shows the helper text immediately.
    pub fn email_edited(&mut self) {
        if self.email.trim().is_empty() {
            self.email_error = None;
        } else {
            self.validate_email();
        }
    }

    /// Re-runs the email shape check, recording the field-level error.
    pub fn validate_email(&mut self) -> bool {
        if is_valid_email(self.email.trim()) {
            self.email_error = None;
            true
        } else {
            self.email_error = Some(EMAIL_HELPER_TEXT.to_string());
            false
        }
    }

    /// Submit gating: both names non-empty and the email well-formed.
    pub fn can_submit(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && is_valid_email(self.email.trim())
    }

    /// Builds the POST payload, re-validating the email first. `businessName`
    /// is included only when the field was filled in.
    pub fn submit_payload(&mut self) -> Option<NewCustomer> {
        if !self.validate_email() || !self.can_submit() {
            return None;
        }
        let business_name = match self.business_name.trim() {
            "" => None,
            trimmed => Some(trimmed.to_string()),
        };
        Some(NewCustomer {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            business_name,
        })
    }
}

/// Shape check for `local@domain.tld`: no whitespace, exactly one `@` with a
/// non-empty local part, and at least one `.` after the `@` with non-empty
/// labels on both sides of the last one.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
