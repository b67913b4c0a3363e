use crate::error::FlagdError;
use tonic::transport::{ClientTlsConfig, Endpoint};
use tracing::debug;

/// Turns a target string into a connectable [`Endpoint`].
///
/// Targets that already carry a scheme (`http://`, `https://`) pass
/// through untouched; bare `host:port` targets get a scheme picked by the
/// TLS flag. `https` endpoints are configured with webpki roots.
pub struct UpstreamConfig {
    endpoint: Endpoint,
}

impl UpstreamConfig {
    pub fn new(target: &str, tls: bool) -> Result<Self, FlagdError> {
        debug!("creating upstream config for target: {}", target);

        let endpoint_str = if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            let scheme = if tls { "https" } else { "http" };
            format!("{}://{}", scheme, target)
        };

        let mut endpoint = Endpoint::from_shared(endpoint_str.clone())
            .map_err(|e| FlagdError::Config(format!("invalid target '{}': {}", target, e)))?;

        if endpoint_str.starts_with("https://") {
            endpoint = endpoint
                .tls_config(ClientTlsConfig::new().with_webpki_roots())
                .map_err(|e| FlagdError::Config(format!("invalid TLS configuration: {}", e)))?;
        }

        Ok(Self { endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_target_gets_http_scheme() {
        let config = UpstreamConfig::new("localhost:8013", false).unwrap();
        assert_eq!(config.endpoint().uri().scheme_str(), Some("http"));
        assert_eq!(config.endpoint().uri().host(), Some("localhost"));
        assert_eq!(config.endpoint().uri().port_u16(), Some(8013));
    }

    #[test]
    fn tls_flag_selects_https() {
        let config = UpstreamConfig::new("flagd.example.com:8013", true).unwrap();
        assert_eq!(config.endpoint().uri().scheme_str(), Some("https"));
    }

    #[test]
    fn schemed_target_passes_through() {
        let config = UpstreamConfig::new("http://localhost:8013", true).unwrap();
        assert_eq!(config.endpoint().uri().scheme_str(), Some("http"));
    }

    #[test]
    fn invalid_target_is_rejected() {
        let result = UpstreamConfig::new("not a target", false);
        assert!(matches!(result, Err(FlagdError::Config(_))));
    }
}
