use crate::busy::Control;
use crate::errors::ClientError;
use crate::models::Severity;
use crate::notify::Notifier;
use crate::validation::{Validity, validate_email, validate_number, validate_phone};
use reqwest::{Client, Method, Url};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, warn};

pub const INVALID_FORM_MESSAGE: &str = "Please fill in all required fields correctly.";
pub const SUCCESS_MESSAGE: &str = "Operation completed successfully!";
pub const FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Number { min: Option<f64>, max: Option<f64> },
    Email,
    Phone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub default_value: String,
    pub required: bool,
    pub kind: FieldKind,
    pub validity: Validity,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            default_value: String::new(),
            required: false,
            kind,
            validity: Validity::Unchecked,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn number(name: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(name, FieldKind::Number { min, max })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self.value = self.default_value.clone();
        self
    }

    pub fn check(&self) -> bool {
        if self.value.is_empty() {
            return !self.required;
        }
        match self.kind {
            FieldKind::Text => true,
            FieldKind::Number { min, max } => validate_number(&self.value, min, max),
            FieldKind::Email => validate_email(&self.value),
            FieldKind::Phone => validate_phone(&self.value),
        }
    }
}

/// A submittable form: action target, method, fields and optional submit button.
///
/// Clones share only the in-flight flag, so a clone counts as the same form
/// for duplicate-submission purposes. Field values, validity and the submit
/// button are copied: busy state and the post-success reset apply to the
/// instance that was submitted, never to its clones.
#[derive(Debug, Clone)]
pub struct Form {
    pub action: String,
    pub method: Option<Method>,
    pub fields: Vec<FormField>,
    pub submit_button: Option<Control>,
    was_validated: bool,
    in_flight: Arc<AtomicBool>,
}

impl Form {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: None,
            fields: Vec::new(),
            submit_button: None,
            was_validated: false,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_submit_button(mut self, label: impl Into<String>) -> Self {
        self.submit_button = Some(Control::new(label));
        self
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    pub fn method(&self) -> Method {
        self.method.clone().unwrap_or(Method::POST)
    }

    pub fn was_validated(&self) -> bool {
        self.was_validated
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn check_validity(&self) -> bool {
        self.fields.iter().all(FormField::check)
    }

    /// Marks every field valid or invalid and returns the names of invalid ones.
    pub fn report_validity(&mut self) -> Vec<String> {
        let mut invalid = Vec::new();
        for field in &mut self.fields {
            if field.check() {
                field.validity = Validity::Valid;
            } else {
                field.validity = Validity::Invalid;
                invalid.push(field.name.clone());
            }
        }
        invalid
    }

    /// Pre-submit check for forms that opt into validation. Warns through the
    /// notifier when the form is invalid.
    pub fn validate_before_submit(&mut self, notifier: &dyn Notifier) -> bool {
        let valid = self.report_validity().is_empty();
        if !valid {
            notifier.notify(INVALID_FORM_MESSAGE, Severity::Warning);
        }
        self.was_validated = true;
        valid
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default_value.clone();
            field.validity = Validity::Unchecked;
        }
        self.was_validated = false;
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.value.clone()))
            .collect()
    }

    fn try_begin(&self) -> Option<InFlight> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlight(Arc::clone(&self.in_flight)))
    }
}

struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: String,
}

pub type SuccessHook = Box<dyn FnOnce(&SubmitResponse) + Send>;
pub type ErrorHook = Box<dyn FnOnce(&ClientError) + Send>;

/// Optional overrides for the default success and failure behaviour.
#[derive(Default)]
pub struct SubmitHooks {
    pub on_success: Option<SuccessHook>,
    pub on_error: Option<ErrorHook>,
}

impl SubmitHooks {
    pub fn on_success(mut self, hook: impl FnOnce(&SubmitResponse) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl FnOnce(&ClientError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded(u16),
    Failed,
    Invalid(Vec<String>),
    AlreadyInFlight,
}

/// Takes over form submission: busy button, validation, async send, feedback.
#[derive(Clone)]
pub struct FormSubmitter {
    http: Client,
    base_url: Url,
    notifier: Arc<dyn Notifier>,
}

impl FormSubmitter {
    pub fn new(http: Client, base_url: Url, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            http,
            base_url,
            notifier,
        }
    }

    pub async fn submit(&self, form: &mut Form, hooks: SubmitHooks) -> SubmitOutcome {
        let Some(_in_flight) = form.try_begin() else {
            warn!(action = %form.action, "submission already in flight, ignoring");
            return SubmitOutcome::AlreadyInFlight;
        };

        set_button_busy(form, true);

        let invalid = form.report_validity();
        if !invalid.is_empty() {
            debug!(action = %form.action, ?invalid, "form failed validation");
            set_button_busy(form, false);
            return SubmitOutcome::Invalid(invalid);
        }

        let outcome = match self.send(form).await {
            Ok(response) => {
                match hooks.on_success {
                    Some(hook) => hook(&response),
                    None => {
                        self.notifier.notify(SUCCESS_MESSAGE, Severity::Success);
                        form.reset();
                    }
                }
                SubmitOutcome::Succeeded(response.status)
            }
            Err(err) => {
                error!(action = %form.action, "form submission failed: {err}");
                match hooks.on_error {
                    Some(hook) => hook(&err),
                    None => self.notifier.notify(FAILURE_MESSAGE, Severity::Danger),
                }
                SubmitOutcome::Failed
            }
        };

        set_button_busy(form, false);
        outcome
    }

    async fn send(&self, form: &Form) -> Result<SubmitResponse, ClientError> {
        let url = self
            .base_url
            .join(&form.action)
            .map_err(|err| ClientError::invalid_url(&form.action, err))?;
        let method = form.method();
        let pairs = form.pairs();

        let request = self.http.request(method.clone(), url);
        let request = if method == Method::GET {
            request.query(&pairs)
        } else {
            request.form(&pairs)
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(status.as_u16()));
        }
        let body = response.text().await?;
        Ok(SubmitResponse {
            status: status.as_u16(),
            body,
        })
    }
}

fn set_button_busy(form: &mut Form, busy: bool) {
    if let Some(button) = form.submit_button.as_mut() {
        button.set_busy(busy);
    }
}
