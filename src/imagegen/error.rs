use thiserror::Error;

const PERMISSION_MESSAGE: &str = "API key is invalid or has insufficient permissions.";
const GENERIC_MESSAGE: &str = "Failed to generate image. Please try again later.";
const HTTP_FORBIDDEN: u16 = 403;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("{env_var} environment variable not set")]
    MissingCredential { env_var: String },
    #[error("upstream rejected the request with status {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("image generation returned no images")]
    NoImages,
    #[error("image generation transport failure: {0}")]
    Transport(String),
    #[error("image generation response was malformed: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "IMAGEGEN_MISSING_CREDENTIAL",
            Self::Upstream { .. } => "IMAGEGEN_UPSTREAM_REJECTED",
            Self::NoImages => "IMAGEGEN_NO_IMAGES",
            Self::Transport(_) => "IMAGEGEN_TRANSPORT",
            Self::MalformedResponse(_) => "IMAGEGEN_MALFORMED_RESPONSE",
        }
    }

    pub fn is_permission_error(&self) -> bool {
        match self {
            Self::Upstream { status, message } => {
                *status == HTTP_FORBIDDEN || message.to_ascii_lowercase().contains("permission")
            }
            Self::Transport(message) => message.to_ascii_lowercase().contains("permission"),
            _ => false,
        }
    }

    /// Text shown in the image modal. Upstream details stay in the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential { .. } => self.to_string(),
            _ if self.is_permission_error() => PERMISSION_MESSAGE.to_owned(),
            _ => GENERIC_MESSAGE.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_text_maps_to_fixed_message() {
        let error = GenerationError::Upstream {
            status: 400,
            message: "The caller does not have permission".to_owned(),
        };

        assert_eq!(error.user_message(), PERMISSION_MESSAGE);
    }

    #[test]
    fn forbidden_status_maps_to_fixed_message() {
        let error = GenerationError::Upstream {
            status: 403,
            message: "denied".to_owned(),
        };

        assert_eq!(error.user_message(), PERMISSION_MESSAGE);
    }

    #[test]
    fn other_failures_use_generic_message() {
        assert_eq!(GenerationError::NoImages.user_message(), GENERIC_MESSAGE);
        assert_eq!(
            GenerationError::Transport("connection reset".to_owned()).user_message(),
            GENERIC_MESSAGE
        );
    }

    #[test]
    fn missing_credential_names_the_variable() {
        let error = GenerationError::MissingCredential {
            env_var: "API_KEY".to_owned(),
        };

        assert_eq!(error.user_message(), "API_KEY environment variable not set");
        assert_eq!(error.code(), "IMAGEGEN_MISSING_CREDENTIAL");
    }
}
