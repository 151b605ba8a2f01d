use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Status(u16),
    Decode,
    InvalidUrl,
    AlreadyRunning,
    InvalidPeriod,
    Storage,
}

#[derive(Debug)]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClientError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            kind: ErrorKind::Status(code),
            message: format!("request failed with HTTP {code}"),
        }
    }

    pub fn decode(err: impl std::error::Error) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: err.to_string(),
        }
    }

    pub fn invalid_url(url: &str, err: impl std::error::Error) -> Self {
        Self {
            kind: ErrorKind::InvalidUrl,
            message: format!("invalid url '{url}': {err}"),
        }
    }

    pub fn already_running() -> Self {
        Self {
            kind: ErrorKind::AlreadyRunning,
            message: "dashboard refresh is already running".to_string(),
        }
    }

    pub fn invalid_period() -> Self {
        Self {
            kind: ErrorKind::InvalidPeriod,
            message: "refresh period must be greater than zero".to_string(),
        }
    }

    pub fn storage(err: impl std::error::Error) -> Self {
        Self {
            kind: ErrorKind::Storage,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err)
        } else if let Some(status) = err.status() {
            Self::status(status.as_u16())
        } else {
            Self::transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err)
    }
}
