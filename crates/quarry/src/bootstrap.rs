//! Service startup.

use http::Uri;
use quarry_config::{ConfigError, QuarryConfig};
use quarry_extract::{AsyncReader, ParamLimits, Params, SourceError};
use quarry_telemetry::{fields, init_logging, TelemetryError};
use thiserror::Error;

use crate::Rejection;

/// Errors raised while starting a service.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging could not be installed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// Validates `config`, installs logging and returns the running [`Service`].
///
/// # Errors
///
/// Returns [`BootstrapError`] if validation fails or a global logger is
/// already installed.
pub fn bootstrap(config: &QuarryConfig) -> Result<Service, BootstrapError> {
    config.validate()?;
    init_logging(&config.log_config())?;

    tracing::info!(
        { fields::SERVICE_NAME } = config.service.name.as_str(),
        environment = %config.service.environment,
        max_pairs = config.params.max_pairs,
        "service started"
    );

    Ok(Service {
        name: config.service.name.clone(),
        limits: config.param_limits(),
    })
}

/// A started service: decodes parameters under the configured limits and
/// runs readers over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    name: String,
    limits: ParamLimits,
}

impl Service {
    /// Creates a service without touching global logging state.
    #[must_use]
    pub fn new(name: impl Into<String>, limits: ParamLimits) -> Self {
        Self {
            name: name.into(),
            limits,
        }
    }

    /// Service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoding limits.
    #[must_use]
    pub fn limits(&self) -> ParamLimits {
        self.limits
    }

    /// Decodes a query string.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the query exceeds the limits or is malformed.
    pub fn query_params(&self, query: &str) -> Result<Params, SourceError> {
        Params::from_query_with_limits(query, &self.limits)
    }

    /// Decodes the query component of a URI.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the query exceeds the limits or is malformed.
    pub fn uri_params(&self, uri: &Uri) -> Result<Params, SourceError> {
        uri.query()
            .map_or_else(|| Ok(Params::new()), |query| self.query_params(query))
    }

    /// Decodes a form body.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the body exceeds the limits or is malformed.
    pub fn form_params(&self, body: &[u8]) -> Result<Params, SourceError> {
        Params::from_form_with_limits(body, &self.limits)
    }

    /// Decodes `uri`'s query and runs `reader` over it.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::Source`] if decoding fails and
    /// [`Rejection::Read`] if the reader fails.
    pub async fn read_uri<R: AsyncReader>(
        &self,
        reader: &R,
        uri: &Uri,
    ) -> Result<R::Output, Rejection> {
        let params = self.uri_params(uri).map_err(|error| {
            tracing::debug!(
                { fields::SERVICE_NAME } = self.name.as_str(),
                %error,
                "query rejected"
            );
            Rejection::Source(error)
        })?;

        reader.read(&params).await.map_err(|failure| {
            quarry_telemetry::log_read_failure!(failure);
            Rejection::Read(failure)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_extract::{required_int, required_string};

    fn service(max_pairs: usize) -> Service {
        Service::new(
            "test",
            ParamLimits {
                max_pairs,
                ..ParamLimits::default()
            },
        )
    }

    #[test]
    fn test_bootstrap_rejects_invalid_config() {
        let mut config = QuarryConfig::default();
        config.params.max_pairs = 0;

        let err = bootstrap(&config).unwrap_err();
        assert!(matches!(err, BootstrapError::Config(_)));
    }

    #[test]
    fn test_bootstrap_without_logging() {
        let mut config = QuarryConfig::default();
        config.logging.enabled = false;
        config.service.name = "orders".to_string();
        config.params.max_pairs = 3;

        let service = bootstrap(&config).unwrap();
        assert_eq!(service.name(), "orders");
        assert_eq!(service.limits().max_pairs, 3);
    }

    #[test]
    fn test_limits_apply_to_queries() {
        let service = service(2);

        assert_eq!(service.query_params("a=1&b=2").unwrap().len(), 2);
        assert!(matches!(
            service.query_params("a=1&b=2&c=3"),
            Err(SourceError::TooManyPairs { max: 2, actual: 3 })
        ));
        assert!(service.form_params(b"a=1&b=2&c=3").is_err());
    }

    #[test]
    fn test_uri_without_query() {
        let uri: Uri = "/users".parse().unwrap();
        assert!(service(2).uri_params(&uri).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_uri() {
        let service = service(8);
        let reader = required_string("name").and(required_int("age"));

        let uri: Uri = "/users?name=Ann&age=41".parse().unwrap();
        let value = service.read_uri(&reader, &uri).await.unwrap();
        assert_eq!(value, ("Ann".to_string(), 41));

        let uri: Uri = "/users?name=Ann".parse().unwrap();
        let rejection = service.read_uri(&reader, &uri).await.unwrap_err();
        assert_eq!(rejection.error_code(), "PARAM_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_read_uri_source_rejection() {
        let service = service(1);
        let reader = required_string("name");

        let uri: Uri = "/users?name=Ann&age=41".parse().unwrap();
        let rejection = service.read_uri(&reader, &uri).await.unwrap_err();
        assert!(matches!(rejection, Rejection::Source(_)));
    }
}
