//! Vendored protobuf bindings for the flagd evaluation service.
//!
//! Message layout and method paths follow
//! `schemas/protobuf/flagd/evaluation/v1/evaluation.proto` from the flagd
//! project. The bindings are maintained by hand so building the crate does
//! not require `protoc`. Only the unary resolve RPCs are bound; the bulk
//! and streaming RPCs of the service are not consumed by the providers.

pub mod evaluation {
    pub mod v1 {
        /// Request body for boolean flag evaluation, used by the ResolveBoolean rpc.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResolveBooleanRequest {
            /// Flag key of the requested flag.
            #[prost(string, tag = "1")]
            pub flag_key: ::prost::alloc::string::String,
            /// Evaluation context used in the flag evaluation.
            #[prost(message, optional, tag = "2")]
            pub context: ::core::option::Option<::prost_types::Struct>,
        }
        /// Response body for boolean flag evaluation, used by the ResolveBoolean rpc.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResolveBooleanResponse {
            /// The response value of the boolean flag evaluation, unset in the case of error.
            #[prost(bool, tag = "1")]
            pub value: bool,
            /// The reason for the given return value.
            #[prost(string, tag = "2")]
            pub reason: ::prost::alloc::string::String,
            /// The variant name of the returned flag value.
            #[prost(string, tag = "3")]
            pub variant: ::prost::alloc::string::String,
            /// Arbitrary metadata supporting flag evaluation.
            #[prost(message, optional, tag = "4")]
            pub metadata: ::core::option::Option<::prost_types::Struct>,
        }
        /// Request body for string flag evaluation, used by the ResolveString rpc.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResolveStringRequest {
            /// Flag key of the requested flag.
            #[prost(string, tag = "1")]
            pub flag_key: ::prost::alloc::string::String,
            /// Evaluation context used in the flag evaluation.
            #[prost(message, optional, tag = "2")]
            pub context: ::core::option::Option<::prost_types::Struct>,
        }
        /// Response body for string flag evaluation, used by the ResolveString rpc.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResolveStringResponse {
            /// The response value of the string flag evaluation, unset in the case of error.
            #[prost(string, tag = "1")]
            pub value: ::prost::alloc::string::String,
            /// The reason for the given return value.
            #[prost(string, tag = "2")]
            pub reason: ::prost::alloc::string::String,
            /// The variant name of the returned flag value.
            #[prost(string, tag = "3")]
            pub variant: ::prost::alloc::string::String,
            /// Arbitrary metadata supporting flag evaluation.
            #[prost(message, optional, tag = "4")]
            pub metadata: ::core::option::Option<::prost_types::Struct>,
        }
        /// Request body for float flag evaluation, used by the ResolveFloat rpc.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResolveFloatRequest {
            /// Flag key of the requested flag.
            #[prost(string, tag = "1")]
            pub flag_key: ::prost::alloc::string::String,
            /// Evaluation context used in the flag evaluation.
            #[prost(message, optional, tag = "2")]
            pub context: ::core::option::Option<::prost_types::Struct>,
        }
        /// Response body for float flag evaluation, used by the ResolveFloat rpc.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResolveFloatResponse {
            /// The response value of the float flag evaluation, unset in the case of error.
            #[prost(double, tag = "1")]
            pub value: f64,
            /// The reason for the given return value.
            #[prost(string, tag = "2")]
            pub reason: ::prost::alloc::string::String,
            /// The variant name of the returned flag value.
            #[prost(string, tag = "3")]
            pub variant: ::prost::alloc::string::String,
            /// Arbitrary metadata supporting flag evaluation.
            #[prost(message, optional, tag = "4")]
            pub metadata: ::core::option::Option<::prost_types::Struct>,
        }
        /// Request body for int flag evaluation, used by the ResolveInt rpc.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResolveIntRequest {
            /// Flag key of the requested flag.
            #[prost(string, tag = "1")]
            pub flag_key: ::prost::alloc::string::String,
            /// Evaluation context used in the flag evaluation.
            #[prost(message, optional, tag = "2")]
            pub context: ::core::option::Option<::prost_types::Struct>,
        }
        /// Response body for int flag evaluation, used by the ResolveInt rpc.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResolveIntResponse {
            /// The response value of the int flag evaluation, unset in the case of error.
            #[prost(int64, tag = "1")]
            pub value: i64,
            /// The reason for the given return value.
            #[prost(string, tag = "2")]
            pub reason: ::prost::alloc::string::String,
            /// The variant name of the returned flag value.
            #[prost(string, tag = "3")]
            pub variant: ::prost::alloc::string::String,
            /// Arbitrary metadata supporting flag evaluation.
            #[prost(message, optional, tag = "4")]
            pub metadata: ::core::option::Option<::prost_types::Struct>,
        }
        /// Request body for object flag evaluation, used by the ResolveObject rpc.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResolveObjectRequest {
            /// Flag key of the requested flag.
            #[prost(string, tag = "1")]
            pub flag_key: ::prost::alloc::string::String,
            /// Evaluation context used in the flag evaluation.
            #[prost(message, optional, tag = "2")]
            pub context: ::core::option::Option<::prost_types::Struct>,
        }
        /// Response body for object flag evaluation, used by the ResolveObject rpc.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResolveObjectResponse {
            /// The response value of the object flag evaluation, unset in the case of error.
            #[prost(message, optional, tag = "1")]
            pub value: ::core::option::Option<::prost_types::Struct>,
            /// The reason for the given return value.
            #[prost(string, tag = "2")]
            pub reason: ::prost::alloc::string::String,
            /// The variant name of the returned flag value.
            #[prost(string, tag = "3")]
            pub variant: ::prost::alloc::string::String,
            /// Arbitrary metadata supporting flag evaluation.
            #[prost(message, optional, tag = "4")]
            pub metadata: ::core::option::Option<::prost_types::Struct>,
        }

        /// Client implementation for `flagd.evaluation.v1.Service`.
        pub mod service_client {
            #![allow(dead_code)]
            use tonic::codegen::http;
            use tonic::transport::Channel;

            /// Unary client for the flagd evaluation service.
            #[derive(Debug, Clone)]
            pub struct ServiceClient {
                inner: tonic::client::Grpc<Channel>,
            }

            impl ServiceClient {
                pub fn new(channel: Channel) -> Self {
                    Self {
                        inner: tonic::client::Grpc::new(channel),
                    }
                }

                async fn ready(&mut self) -> Result<(), tonic::Status> {
                    self.inner.ready().await.map_err(|e| {
                        tonic::Status::unknown(format!("Service was not ready: {e}"))
                    })
                }

                pub async fn resolve_boolean(
                    &mut self,
                    request: super::ResolveBooleanRequest,
                ) -> Result<tonic::Response<super::ResolveBooleanResponse>, tonic::Status>
                {
                    self.ready().await?;
                    let codec = tonic::codec::ProstCodec::default();
                    let path = http::uri::PathAndQuery::from_static(
                        "/flagd.evaluation.v1.Service/ResolveBoolean",
                    );
                    self.inner
                        .unary(tonic::Request::new(request), path, codec)
                        .await
                }

                pub async fn resolve_string(
                    &mut self,
                    request: super::ResolveStringRequest,
                ) -> Result<tonic::Response<super::ResolveStringResponse>, tonic::Status>
                {
                    self.ready().await?;
                    let codec = tonic::codec::ProstCodec::default();
                    let path = http::uri::PathAndQuery::from_static(
                        "/flagd.evaluation.v1.Service/ResolveString",
                    );
                    self.inner
                        .unary(tonic::Request::new(request), path, codec)
                        .await
                }

                pub async fn resolve_float(
                    &mut self,
                    request: super::ResolveFloatRequest,
                ) -> Result<tonic::Response<super::ResolveFloatResponse>, tonic::Status>
                {
                    self.ready().await?;
                    let codec = tonic::codec::ProstCodec::default();
                    let path = http::uri::PathAndQuery::from_static(
                        "/flagd.evaluation.v1.Service/ResolveFloat",
                    );
                    self.inner
                        .unary(tonic::Request::new(request), path, codec)
                        .await
                }

                pub async fn resolve_int(
                    &mut self,
                    request: super::ResolveIntRequest,
                ) -> Result<tonic::Response<super::ResolveIntResponse>, tonic::Status>
                {
                    self.ready().await?;
                    let codec = tonic::codec::ProstCodec::default();
                    let path = http::uri::PathAndQuery::from_static(
                        "/flagd.evaluation.v1.Service/ResolveInt",
                    );
                    self.inner
                        .unary(tonic::Request::new(request), path, codec)
                        .await
                }

                pub async fn resolve_object(
                    &mut self,
                    request: super::ResolveObjectRequest,
                ) -> Result<tonic::Response<super::ResolveObjectResponse>, tonic::Status>
                {
                    self.ready().await?;
                    let codec = tonic::codec::ProstCodec::default();
                    let path = http::uri::PathAndQuery::from_static(
                        "/flagd.evaluation.v1.Service/ResolveObject",
                    );
                    self.inner
                        .unary(tonic::Request::new(request), path, codec)
                        .await
                }
            }
        }
    }
}
