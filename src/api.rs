use std::collections::BTreeSet;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{WizardError, WizardResult};
use crate::wizard::descriptor::StepDescriptor;

/// Seam between the wizard core and the setup endpoint.
///
/// The wizard needs exactly two calls: fetch the step descriptor when a
/// session starts, and report the handled steps when it finishes. Production
/// uses [`SetupApi`]; tests substitute fakes.
pub trait SetupBackend: Send + Sync {
    /// Fetch the step descriptor.
    fn fetch_descriptor(&self) -> WizardResult<StepDescriptor>;

    /// Report the steps the finished session handled.
    fn submit_handled(&self, handled: &BTreeSet<String>) -> WizardResult<()>;
}

/// Payload posted when the wizard finishes.
#[derive(Debug, Serialize)]
struct FinishSubmission<'a> {
    handled: Vec<&'a str>,
}

/// Default per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP client for the `setup/wizard` endpoint.
pub struct SetupApi {
    endpoint: String,
    timeout: Duration,
}

impl SetupApi {
    /// Create a client for the given API base URL.
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            endpoint: format!("{}/setup/wizard", base_url.trim_end_matches('/')),
            timeout,
        }
    }

    /// Resolved endpoint URL, mainly for logs and error context.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn user_agent() -> String {
        format!("setup-wizard/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl SetupBackend for SetupApi {
    fn fetch_descriptor(&self) -> WizardResult<StepDescriptor> {
        debug!("Fetching step descriptor from {}", self.endpoint);

        let response = match ureq::get(&self.endpoint)
            .set("User-Agent", &Self::user_agent())
            .set("Accept", "application/json")
            .timeout(self.timeout)
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(WizardError::EndpointStatus {
                    url: self.endpoint.clone(),
                    status,
                });
            }
            Err(err) => {
                return Err(WizardError::DescriptorFetch {
                    url: self.endpoint.clone(),
                    source: Box::new(err),
                });
            }
        };

        response
            .into_json()
            .map_err(|err| WizardError::DescriptorDecode {
                url: self.endpoint.clone(),
                source: err,
            })
    }

    fn submit_handled(&self, handled: &BTreeSet<String>) -> WizardResult<()> {
        let submission = FinishSubmission {
            handled: handled.iter().map(String::as_str).collect(),
        };
        info!(
            "Reporting {} handled wizard steps to {}",
            submission.handled.len(),
            self.endpoint
        );

        match ureq::post(&self.endpoint)
            .set("User-Agent", &Self::user_agent())
            .set("Accept", "application/json")
            .timeout(self.timeout)
            .send_json(&submission)
        {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, _)) => Err(WizardError::EndpointStatus {
                url: self.endpoint.clone(),
                status,
            }),
            Err(err) => Err(WizardError::FinishSubmit {
                url: self.endpoint.clone(),
                source: Box::new(err),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        let api = SetupApi::new("http://localhost:5000");
        assert_eq!(api.endpoint(), "http://localhost:5000/setup/wizard");

        // A trailing slash on the base must not double up.
        let api = SetupApi::new("http://localhost:5000/");
        assert_eq!(api.endpoint(), "http://localhost:5000/setup/wizard");
    }

    #[test]
    fn test_submission_wire_shape() {
        let submission = FinishSubmission {
            handled: vec!["a", "b"],
        };
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value, serde_json::json!({"handled": ["a", "b"]}));
    }

    #[test]
    fn test_user_agent_carries_version() {
        let ua = SetupApi::user_agent();
        assert!(ua.starts_with("setup-wizard/"));
        assert!(ua.len() > "setup-wizard/".len());
    }
}
