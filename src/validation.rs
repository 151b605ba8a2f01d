use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap());

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Range check for a numeric input. A missing `min` means 0, a missing `max`
/// means unbounded, and anything that does not parse is invalid.
pub fn validate_number(raw: &str, min: Option<f64>, max: Option<f64>) -> bool {
    let Ok(value) = raw.trim().parse::<f64>() else {
        return false;
    };
    if value.is_nan() {
        return false;
    }
    let min = min.unwrap_or(0.0);
    let max = max.unwrap_or(f64::INFINITY);
    value >= min && value <= max
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Unchecked,
    Valid,
    Invalid,
}

impl Validity {
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Validity::Unchecked => None,
            Validity::Valid => Some("is-valid"),
            Validity::Invalid => Some("is-invalid"),
        }
    }
}

/// A number input that re-validates on every edit.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberInput {
    pub value: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub validity: Validity,
}

impl NumberInput {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            value: String::new(),
            min,
            max,
            validity: Validity::Unchecked,
        }
    }

    pub fn input(&mut self, value: impl Into<String>) -> bool {
        self.value = value.into();
        self.validate()
    }

    pub fn validate(&mut self) -> bool {
        let valid = validate_number(&self.value, self.min, self.max);
        self.validity = if valid { Validity::Valid } else { Validity::Invalid };
        valid
    }
}
