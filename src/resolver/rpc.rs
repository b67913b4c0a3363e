//! # Server-side flagd provider
//!
//! Evaluates feature flags over gRPC against a flagd daemon reachable via
//! TCP (optionally TLS) or a Unix domain socket.
//!
//! Every resolution call is one stateless RPC. Transport failures are
//! translated into OpenFeature error codes, so the SDK substitutes the
//! caller's default value instead of propagating a failure.
//!
//! ## Example
//!
//! ```rust,no_run
//! use flagd_openfeature::{FlagdOptions, RpcResolver};
//! use open_feature::provider::FeatureProvider;
//! use open_feature::EvaluationContext;
//!
//! #[tokio::main]
//! async fn main() {
//!     let options = FlagdOptions {
//!         host: "localhost".to_string(),
//!         port: 8013,
//!         ..Default::default()
//!     };
//!     let provider = RpcResolver::new(&options).await.unwrap();
//!     let context = EvaluationContext::default();
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

use crate::error::FlagdError;
use crate::proto::evaluation::v1::{
    ResolveBooleanRequest, ResolveFloatRequest, ResolveObjectRequest, ResolveStringRequest,
};
use crate::resolver::common::service::{FlagService, GrpcFlagService};
use crate::{FlagdOptions, convert_context, convert_proto_metadata, convert_proto_struct_to_struct_value};

/// Maps gRPC status codes to OpenFeature error codes.
///
/// Statuses outside the table fall through to a `General` code carrying
/// the gRPC code name, leaving interpretation to the SDK.
fn map_grpc_status_to_error_code(status: &tonic::Status) -> EvaluationErrorCode {
    use tonic::Code;
    match status.code() {
        Code::DataLoss => EvaluationErrorCode::ParseError,
        Code::InvalidArgument => EvaluationErrorCode::TypeMismatch,
        Code::NotFound => EvaluationErrorCode::FlagNotFound,
        Code::Unavailable => EvaluationErrorCode::FlagNotFound,
        code => EvaluationErrorCode::General(format!("{:?}", code)),
    }
}

fn evaluation_error(flag_key: &str, status: tonic::Status) -> EvaluationError {
    error!(flag_key, error = %status, "flag resolution failed");
    EvaluationError {
        code: map_grpc_status_to_error_code(&status),
        message: Some(status.message().to_string()),
    }
}

/// The server-side flagd provider.
#[derive(Debug)]
pub struct RpcResolver {
    service: Box<dyn FlagService>,
    metadata: ProviderMetadata,
}

impl RpcResolver {
    /// Connects to flagd using the given options.
    pub async fn new(options: &FlagdOptions) -> Result<Self, FlagdError> {
        let service = GrpcFlagService::connect(&options.target(), options.tls).await?;
        Ok(Self::from_service(Box::new(service)))
    }

    /// Builds a provider on top of an already-constructed service, e.g. a
    /// custom transport.
    pub fn from_service(service: Box<dyn FlagService>) -> Self {
        Self {
            service,
            metadata: ProviderMetadata::new("flagd"),
        }
    }
}

#[async_trait]
impl FeatureProvider for RpcResolver {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    #[instrument(skip(self, context))]
    async fn resolve_bool_value(
        &self,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Result<ResolutionDetails<bool>, EvaluationError> {
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
        Ok(ResolutionDetails {
            value: response.value,
            variant: Some(response.variant),
            reason: Some(EvaluationReason::Other(response.reason)),
            flag_metadata: response.metadata.map(convert_proto_metadata),
        })
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::common::service::test_support::MockFlagService;
    use test_log::test;
    use tonic::Code;

    fn resolver_with(mock: MockFlagService) -> RpcResolver {
        RpcResolver::from_service(Box::new(mock))
    }

    #[test(tokio::test)]
    async fn resolves_all_flag_kinds() {
        let resolver = resolver_with(MockFlagService::healthy());
        let context = EvaluationContext::default().with_targeting_key("test-user");

        let bool_details = resolver.resolve_bool_value("bool-flag", &context).await.unwrap();
        assert!(bool_details.value);
        assert_eq!(bool_details.variant, Some("on".to_string()));
        assert_eq!(
            bool_details.reason,
            Some(EvaluationReason::Other("STATIC".to_string()))
        );

        let string_details = resolver
            .resolve_string_value("string-flag", &context)
            .await
            .unwrap();
        assert_eq!(string_details.value, "hello");

        let float_details = resolver
            .resolve_float_value("float-flag", &context)
            .await
            .unwrap();
        assert_eq!(float_details.value, 3.5);

        let struct_details = resolver
            .resolve_struct_value("struct-flag", &context)
            .await
            .unwrap();
        assert_eq!(
            struct_details.value.fields["key"],
            open_feature::Value::String("value".to_string())
        );
    }

    #[test(tokio::test)]
    async fn int_flags_use_the_float_rpc() {
        let mock = MockFlagService::healthy().with_float_value(42.0);
        let calls = mock.calls();
        let resolver = resolver_with(mock);
        let context = EvaluationContext::default();

        let details = resolver.resolve_int_value("int-flag", &context).await.unwrap();
        assert_eq!(details.value, 42);
        assert_eq!(calls.count("resolve_float"), 1);
        assert_eq!(calls.count("resolve_int"), 0);
    }

    #[test(tokio::test)]
    async fn object_response_without_value_is_a_parse_error() {
        let resolver = resolver_with(MockFlagService::healthy().with_empty_object());
        let context = EvaluationContext::default();

        let err = resolver
            .resolve_struct_value("struct-flag", &context)
            .await
            .unwrap_err();
        assert_eq!(err.code, EvaluationErrorCode::ParseError);
    }

    #[test(tokio::test)]
    async fn status_codes_map_to_error_codes() {
        let cases = [
            (Code::DataLoss, EvaluationErrorCode::ParseError),
            (Code::InvalidArgument, EvaluationErrorCode::TypeMismatch),
            (Code::NotFound, EvaluationErrorCode::FlagNotFound),
            (Code::Unavailable, EvaluationErrorCode::FlagNotFound),
            (
                Code::Internal,
                EvaluationErrorCode::General("Internal".to_string()),
            ),
        ];

        for (code, expected) in cases {
            let resolver = resolver_with(MockFlagService::failing(code, "boom"));
            let context = EvaluationContext::default();

            let err = resolver
                .resolve_bool_value("bool-flag", &context)
                .await
                .unwrap_err();
            assert_eq!(err.code, expected, "status {:?}", code);
            assert_eq!(err.message, Some("boom".to_string()));
        }
    }

    #[test(tokio::test)]
    async fn errors_cover_every_flag_kind() {
        let resolver = resolver_with(MockFlagService::failing(Code::NotFound, "missing"));
        let context = EvaluationContext::default();

        assert_eq!(
            resolver
                .resolve_bool_value("flag", &context)
                .await
                .unwrap_err()
                .code,
            EvaluationErrorCode::FlagNotFound
        );
        assert_eq!(
            resolver
                .resolve_string_value("flag", &context)
                .await
                .unwrap_err()
                .code,
            EvaluationErrorCode::FlagNotFound
        );
        assert_eq!(
            resolver
                .resolve_int_value("flag", &context)
                .await
                .unwrap_err()
                .code,
            EvaluationErrorCode::FlagNotFound
        );
        assert_eq!(
            resolver
                .resolve_float_value("flag", &context)
                .await
                .unwrap_err()
                .code,
            EvaluationErrorCode::FlagNotFound
        );
        assert_eq!(
            resolver
                .resolve_struct_value("flag", &context)
                .await
                .unwrap_err()
                .code,
            EvaluationErrorCode::FlagNotFound
        );
    }
}
