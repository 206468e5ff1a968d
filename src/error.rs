use thiserror::Error;

/// Wizard-level errors using thiserror for structured error handling.
///
/// These errors represent failures while talking to the setup endpoint. They
/// carry the endpoint URL for context and can be chained with anyhow.

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Failed to fetch step descriptor from {url}")]
    DescriptorFetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to decode step descriptor from {url}")]
    DescriptorDecode {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Setup endpoint {url} returned status {status}")]
    EndpointStatus { url: String, status: u16 },

    #[error("Failed to submit handled steps to {url}")]
    FinishSubmit {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Type alias for wizard Results
pub type WizardResult<T> = Result<T, WizardError>;
