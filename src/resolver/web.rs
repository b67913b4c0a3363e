//! # Web-style flagd provider
//!
//! Mirrors the flagd web deployment: the endpoint is built from
//! `{protocol, host, port}` and successful boolean resolutions are served
//! from an in-memory response cache on repeat, without touching the
//! network. Other flag kinds always go to the daemon.
//!
//! The cache only short-circuits already-completed lookups; identical
//! calls racing in flight each issue their own RPC.
//!
//! ## Example
//!
//! ```rust,no_run
//! use flagd_openfeature::{WebOptions, WebResolver};
//! use open_feature::provider::FeatureProvider;
//! use open_feature::EvaluationContext;
//!
//! #[tokio::main]
//! async fn main() {
//!     let options = WebOptions::default();
//!     let provider = WebResolver::new(&options).await.unwrap();
//!     let context = EvaluationContext::default().with_targeting_key("user-1");
//!
//!     let details = provider.resolve_bool_value("my-flag", &context).await.unwrap();
//!     println!("Flag value: {}", details.value);
//! }
//! ```

use async_trait::async_trait;
use open_feature::provider::{FeatureProvider, ProviderMetadata, ResolutionDetails};
use open_feature::{
    EvaluationContext, EvaluationError, EvaluationErrorCode, EvaluationReason, StructValue,
};
use tracing::{debug, error, instrument};

use crate::cache::{CacheService, CacheSettings};
use crate::error::FlagdError;
use crate::proto::evaluation::v1::{
    ResolveBooleanRequest, ResolveBooleanResponse, ResolveFloatRequest, ResolveObjectRequest,
    ResolveStringRequest,
};
use crate::resolver::common::service::{FlagService, GrpcFlagService};
use crate::{WebOptions, convert_context, convert_proto_metadata, convert_proto_struct_to_struct_value};

/// Maps gRPC status codes to OpenFeature error codes.
///
/// This table deliberately differs from the server-side provider's:
/// `Unavailable` reports the flag as disabled and unmapped statuses
/// collapse into `UNKNOWN`, matching what callers of the web deployment
/// observe.
fn map_grpc_status_to_error_code(status: &tonic::Status) -> EvaluationErrorCode {
    use tonic::Code;
    match status.code() {
        Code::DataLoss => EvaluationErrorCode::ParseError,
        Code::InvalidArgument => EvaluationErrorCode::TypeMismatch,
        Code::NotFound => EvaluationErrorCode::FlagNotFound,
        Code::Unavailable => EvaluationErrorCode::General("DISABLED".to_string()),
        _ => EvaluationErrorCode::General("UNKNOWN".to_string()),
    }
}

fn evaluation_error(flag_key: &str, status: tonic::Status) -> EvaluationError {
    error!(flag_key, error = %status, "flag resolution failed");
    EvaluationError {
        code: map_grpc_status_to_error_code(&status),
        message: Some(status.message().to_string()),
    }
}

fn boolean_details(response: ResolveBooleanResponse) -> ResolutionDetails<bool> {
    ResolutionDetails {
        value: response.value,
        variant: Some(response.variant),
        reason: Some(EvaluationReason::Other(response.reason)),
        flag_metadata: response.metadata.map(convert_proto_metadata),
    }
}

/// The web-style flagd provider.
#[derive(Debug)]
pub struct WebResolver {
    service: Box<dyn FlagService>,
    cache: CacheService<ResolveBooleanResponse>,
    metadata: ProviderMetadata,
}

impl WebResolver {
    /// Connects to the flagd endpoint described by the options.
    pub async fn new(options: &WebOptions) -> Result<Self, FlagdError> {
        let service = GrpcFlagService::connect(&options.endpoint(), false).await?;
        Ok(Self::from_service(
            Box::new(service),
            options.cache.clone(),
        ))
    }

    /// Builds a provider on top of an already-constructed service.
    pub fn from_service(service: Box<dyn FlagService>, cache: CacheSettings) -> Self {
        Self {
            service,
            cache: CacheService::new(cache),
            metadata: ProviderMetadata::new("flagd-web"),
        }
    }
}

#[async_trait]
impl FeatureProvider for WebResolver {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    #[instrument(skip(self, context))]
    async fn resolve_bool_value(
        &self,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Result<ResolutionDetails<bool>, EvaluationError> {
        if let Some(cached) = self.cache.get(flag_key, context).await {
            debug!(flag_key, "boolean flag served from cache");
            return Ok(boolean_details(cached));
        }

        debug!(flag_key, "resolving boolean flag");
        let request = ResolveBooleanRequest {
            flag_key: flag_key.to_string(),
            context: convert_context(context),
        };

        let response = self
            .service
            .resolve_boolean(request)
            .await
            .map_err(|status| evaluation_error(flag_key, status))?;

        debug!(flag_key, value = response.value, reason = %response.reason, "boolean flag resolved");
        // Only boolean resolutions are cached; other kinds always hit the
        // daemon.
        self.cache.add(flag_key, context, response.clone()).await;
        Ok(boolean_details(response))
    }

    #[instrument(skip(self, context))]
    async fn resolve_int_value(
        &self,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Result<ResolutionDetails<i64>, EvaluationError> {
        debug!(flag_key, "resolving integer flag");
        // Numeric flags of every sub-kind resolve through the float RPC.
        let request = ResolveFloatRequest {
            flag_key: flag_key.to_string(),
            context: convert_context(context),
        };

        let response = self
            .service
            .resolve_float(request)
            .await
            .map_err(|status| evaluation_error(flag_key, status))?;

        debug!(flag_key, value = response.value, reason = %response.reason, "integer flag resolved");
        Ok(ResolutionDetails {
            value: response.value as i64,
            variant: Some(response.variant),
            reason: Some(EvaluationReason::Other(response.reason)),
            flag_metadata: response.metadata.map(convert_proto_metadata),
        })
    }

    #[instrument(skip(self, context))]
    async fn resolve_float_value(
        &self,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Result<ResolutionDetails<f64>, EvaluationError> {
        debug!(flag_key, "resolving float flag");
        let request = ResolveFloatRequest {
            flag_key: flag_key.to_string(),
            context: convert_context(context),
        };

        let response = self
            .service
            .resolve_float(request)
            .await
            .map_err(|status| evaluation_error(flag_key, status))?;

        debug!(flag_key, value = response.value, reason = %response.reason, "float flag resolved");
        Ok(ResolutionDetails {
            value: response.value,
            variant: Some(response.variant),
            reason: Some(EvaluationReason::Other(response.reason)),
            flag_metadata: response.metadata.map(convert_proto_metadata),
        })
    }

    #[instrument(skip(self, context))]
    async fn resolve_string_value(
        &self,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Result<ResolutionDetails<String>, EvaluationError> {
        debug!(flag_key, "resolving string flag");
        let request = ResolveStringRequest {
            flag_key: flag_key.to_string(),
            context: convert_context(context),
        };

        let response = self
            .service
            .resolve_string(request)
            .await
            .map_err(|status| evaluation_error(flag_key, status))?;

        debug!(flag_key, value = %response.value, reason = %response.reason, "string flag resolved");
        Ok(ResolutionDetails {
            value: response.value,
            variant: Some(response.variant),
            reason: Some(EvaluationReason::Other(response.reason)),
            flag_metadata: response.metadata.map(convert_proto_metadata),
        })
    }

    #[instrument(skip(self, context))]
    async fn resolve_struct_value(
        &self,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Result<ResolutionDetails<StructValue>, EvaluationError> {
        debug!(flag_key, "resolving struct flag");
        let request = ResolveObjectRequest {
            flag_key: flag_key.to_string(),
            context: convert_context(context),
        };

        let response = self
            .service
            .resolve_object(request)
            .await
            .map_err(|status| evaluation_error(flag_key, status))?;

        // A response without a value struct is an undecodable payload, not
        // a missing flag.
        let value = response.value.ok_or_else(|| {
            error!(flag_key, "struct flag response carried no value");
            EvaluationError {
                code: EvaluationErrorCode::ParseError,
                message: Some("struct flag response carried no value".to_string()),
            }
        })?;

        debug!(flag_key, reason = %response.reason, "struct flag resolved");
        Ok(ResolutionDetails {
            value: convert_proto_struct_to_struct_value(value),
            variant: Some(response.variant),
            reason: Some(EvaluationReason::Other(response.reason)),
            flag_metadata: response.metadata.map(convert_proto_metadata),
        })
    }
}
