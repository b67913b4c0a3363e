use async_trait::async_trait;
use hyper_util::rt::TokioIo;
use tokio::net::UnixStream;
use tonic::transport::{Endpoint, Uri};
use tower::service_fn;
use tracing::debug;

use super::upstream::UpstreamConfig;
use crate::error::FlagdError;
use crate::proto::evaluation::v1::service_client::ServiceClient;
use crate::proto::evaluation::v1::{
    ResolveBooleanRequest, ResolveBooleanResponse, ResolveFloatRequest, ResolveFloatResponse,
    ResolveObjectRequest, ResolveObjectResponse, ResolveStringRequest, ResolveStringResponse,
};

/// The four unary calls the providers issue against flagd.
///
/// Numeric flags of every sub-kind go through `resolve_float`; the int RPC
/// in the service definition is not part of this surface. A failed call
/// surfaces the [`tonic::Status`] unmodified, with no retry.
#[async_trait]
pub trait FlagService: Send + Sync + std::fmt::Debug + 'static {
    async fn resolve_boolean(
        &self,
        request: ResolveBooleanRequest,
    ) -> Result<ResolveBooleanResponse, tonic::Status>;

    async fn resolve_string(
        &self,
        request: ResolveStringRequest,
    ) -> Result<ResolveStringResponse, tonic::Status>;

    async fn resolve_float(
        &self,
        request: ResolveFloatRequest,
    ) -> Result<ResolveFloatResponse, tonic::Status>;

    async fn resolve_object(
        &self,
        request: ResolveObjectRequest,
    ) -> Result<ResolveObjectResponse, tonic::Status>;
}

/// [`FlagService`] backed by a gRPC channel to flagd.
#[derive(Debug, Clone)]
pub struct GrpcFlagService {
    client: ServiceClient,
}

impl GrpcFlagService {
    /// Connects to `target`: `unix://<path>` for a Unix domain socket,
    /// otherwise `host:port` or a full URL handled by [`UpstreamConfig`].
    ///
    /// The connection is established eagerly and exactly once; connection
    /// failures surface as [`FlagdError::Connection`].
    pub async fn connect(target: &str, tls: bool) -> Result<Self, FlagdError> {
        if let Some(path) = target.strip_prefix("unix://") {
            debug!("connecting to flagd over unix socket: {}", path);
            let path = path.to_string();
            // The endpoint URI is a placeholder; the connector ignores it.
            let channel = Endpoint::try_from("http://[::]:50051")
                .map_err(|e| FlagdError::Config(e.to_string()))?
                .connect_with_connector(service_fn(move |_: Uri| {
                    let path = path.clone();
                    async move {
                        let stream = UnixStream::connect(path).await?;
                        Ok::<_, std::io::Error>(TokioIo::new(stream))
                    }
                }))
                .await?;

            return Ok(Self {
                client: ServiceClient::new(channel),
            });
        }

        debug!("connecting to flagd at {}", target);
        let config = UpstreamConfig::new(target, tls)?;
        let channel = config.endpoint().clone().connect().await?;

        Ok(Self {
            client: ServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl FlagService for GrpcFlagService {
    async fn resolve_boolean(
        &self,
        request: ResolveBooleanRequest,
    ) -> Result<ResolveBooleanResponse, tonic::Status> {
        let response = self.client.clone().resolve_boolean(request).await?;
        Ok(response.into_inner())
    }

    async fn resolve_string(
        &self,
        request: ResolveStringRequest,
    ) -> Result<ResolveStringResponse, tonic::Status> {
        let response = self.client.clone().resolve_string(request).await?;
        Ok(response.into_inner())
    }

    async fn resolve_float(
        &self,
        request: ResolveFloatRequest,
    ) -> Result<ResolveFloatResponse, tonic::Status> {
        let response = self.client.clone().resolve_float(request).await?;
        Ok(response.into_inner())
    }

    async fn resolve_object(
        &self,
        request: ResolveObjectRequest,
    ) -> Result<ResolveObjectResponse, tonic::Status> {
        let response = self.client.clone().resolve_object(request).await?;
        Ok(response.into_inner())
    }
}
