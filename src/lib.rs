//! # flagd OpenFeature providers
//!
//! Providers that evaluate feature flags against a remote
//! [flagd](https://flagd.dev) daemon over gRPC.
//!
//! Two providers are available:
//!
//! * [`RpcResolver`] — the server-side provider; connects over TCP
//!   (optionally TLS) or a Unix domain socket and issues one RPC per
//!   evaluation.
//! * [`WebResolver`] — mirrors the web deployment of flagd; connects to an
//!   HTTP endpoint built from `{protocol, host, port}` and serves repeated
//!   boolean evaluations from an in-memory response cache.
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
//!     let options = FlagdOptions::default();
//!     let provider = RpcResolver::new(&options).await.unwrap();
//!     let context = EvaluationContext::default().with_targeting_key("user-1");
//!
//!     let details = provider.resolve_bool_value("my-flag", &context).await.unwrap();
//!     println!("Flag value: {}", details.value);
//! }
//! ```

pub mod cache;
pub mod error;
pub mod proto;
pub mod resolver;

use std::collections::{BTreeMap, HashMap};

use open_feature::{
    EvaluationContext, EvaluationContextFieldValue, FlagMetadata, FlagMetadataValue, StructValue,
    Value,
};
use prost_types::value::Kind;

pub use cache::{CacheSettings, CacheType};
pub use error::FlagdError;
pub use resolver::rpc::RpcResolver;
pub use resolver::web::WebResolver;

/// Configuration for the server-side provider.
///
/// All fields have working defaults; `..Default::default()` fills the rest.
#[derive(Debug, Clone)]
pub struct FlagdOptions {
    /// Hostname of the flagd daemon. Default: `localhost`.
    pub host: String,
    /// Port of the flagd daemon. Default: `8013`.
    pub port: u16,
    /// Use TLS for the gRPC channel. Default: `false`.
    pub tls: bool,
    /// Unix domain socket path. Takes precedence over host/port.
    pub socket_path: Option<String>,
}

impl Default for FlagdOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8013,
            tls: false,
            socket_path: None,
        }
    }
}

impl FlagdOptions {
    /// Renders the transport target: `unix://<path>` when a socket path is
    /// configured, `<host>:<port>` otherwise.
    pub fn target(&self) -> String {
        match &self.socket_path {
            Some(path) => format!("unix://{}", path),
            None => format!("{}:{}", self.host, self.port),
        }
    }
}

/// Scheme used by the web-style provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpProtocol {
    #[default]
    Http,
    Https,
}

impl std::fmt::Display for HttpProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpProtocol::Http => write!(f, "http"),
            HttpProtocol::Https => write!(f, "https"),
        }
    }
}

/// Configuration for the web-style provider.
#[derive(Debug, Clone)]
pub struct WebOptions {
    /// Hostname of the flagd endpoint. Default: `localhost`.
    pub host: String,
    /// Port of the flagd endpoint. Default: `8013`.
    pub port: u16,
    /// Scheme of the endpoint. Default: `http`.
    pub protocol: HttpProtocol,
    /// Response cache configuration.
    pub cache: CacheSettings,
}

impl Default for WebOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8013,
            protocol: HttpProtocol::default(),
            cache: CacheSettings::default(),
        }
    }
}

impl WebOptions {
    /// Renders the endpoint URL, `<protocol>://<host>:<port>`.
    pub fn endpoint(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// Serializes an evaluation context into the protobuf struct sent with
/// every resolve request.
///
/// The targeting key becomes a `targetingKey` field, matching the flagd
/// convention. Custom struct fields are accepted as
/// [`open_feature::Value`], [`StructValue`] or [`serde_json::Value`]
/// payloads; entries carrying anything else cannot be serialized and are
/// omitted, so a context holding only such entries goes out as an empty
/// object.
pub fn convert_context(context: &EvaluationContext) -> Option<prost_types::Struct> {
    let mut fields = BTreeMap::new();

    if let Some(targeting_key) = &context.targeting_key {
        fields.insert(
            "targetingKey".to_string(),
            prost_types::Value {
                kind: Some(Kind::StringValue(targeting_key.clone())),
            },
        );
    }

    for (key, value) in &context.custom_fields {
        if let Some(converted) = convert_context_field(value) {
            fields.insert(key.clone(), converted);
        }
    }

    Some(prost_types::Struct { fields })
}

fn convert_context_field(value: &EvaluationContextFieldValue) -> Option<prost_types::Value> {
    let kind = match value {
        EvaluationContextFieldValue::Bool(b) => Kind::BoolValue(*b),
        EvaluationContextFieldValue::Int(i) => Kind::NumberValue(*i as f64),
        EvaluationContextFieldValue::Float(f) => Kind::NumberValue(*f),
        EvaluationContextFieldValue::String(s) => Kind::StringValue(s.clone()),
        EvaluationContextFieldValue::DateTime(dt) => Kind::StringValue(dt.to_string()),
        EvaluationContextFieldValue::Struct(payload) => {
            if let Some(value) = payload.downcast_ref::<Value>() {
                convert_value(value).kind?
            } else if let Some(struct_value) = payload.downcast_ref::<StructValue>() {
                Kind::StructValue(convert_struct_value(struct_value))
            } else if let Some(json) = payload.downcast_ref::<serde_json::Value>() {
                convert_json_value(json).kind?
            } else {
                return None;
            }
        }
    };
    Some(prost_types::Value { kind: Some(kind) })
}

/// Converts an OpenFeature value into a protobuf value.
pub fn convert_value(value: &Value) -> prost_types::Value {
    let kind = match value {
        Value::Bool(b) => Kind::BoolValue(*b),
        Value::Int(i) => Kind::NumberValue(*i as f64),
        Value::Float(f) => Kind::NumberValue(*f),
        Value::String(s) => Kind::StringValue(s.clone()),
        Value::Array(values) => Kind::ListValue(prost_types::ListValue {
            values: values.iter().map(convert_value).collect(),
        }),
        Value::Struct(struct_value) => Kind::StructValue(convert_struct_value(struct_value)),
    };
    prost_types::Value { kind: Some(kind) }
}

fn convert_struct_value(struct_value: &StructValue) -> prost_types::Struct {
    let fields = struct_value
        .fields
        .iter()
        .map(|(k, v)| (k.clone(), convert_value(v)))
        .collect();
    prost_types::Struct { fields }
}

fn convert_json_value(value: &serde_json::Value) -> prost_types::Value {
    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(0),
        serde_json::Value::Bool(b) => Kind::BoolValue(*b),
        serde_json::Value::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => Kind::StringValue(s.clone()),
        serde_json::Value::Array(values) => Kind::ListValue(prost_types::ListValue {
            values: values.iter().map(convert_json_value).collect(),
        }),
        serde_json::Value::Object(map) => Kind::StructValue(prost_types::Struct {
            fields: map
                .iter()
                .map(|(k, v)| (k.clone(), convert_json_value(v)))
                .collect(),
        }),
    };
    prost_types::Value { kind: Some(kind) }
}

/// Converts a protobuf value into an OpenFeature value.
///
/// Protobuf has a single number kind; integral numbers come back as
/// [`Value::Int`], fractional ones as [`Value::Float`]. [`Value`] has no
/// null variant, so protobuf nulls (and values carrying no kind) coerce
/// to an empty string.
pub fn convert_proto_value(value: prost_types::Value) -> Value {
    match value.kind {
        Some(Kind::BoolValue(b)) => Value::Bool(b),
        Some(Kind::NumberValue(n)) => {
            if n.fract() == 0.0 {
                Value::Int(n as i64)
            } else {
                Value::Float(n)
            }
        }
        Some(Kind::StringValue(s)) => Value::String(s),
        Some(Kind::ListValue(list)) => {
            Value::Array(list.values.into_iter().map(convert_proto_value).collect())
        }
        Some(Kind::StructValue(s)) => Value::Struct(convert_proto_struct_to_struct_value(s)),
        Some(Kind::NullValue(_)) | None => Value::String(String::new()),
    }
}

/// Converts the protobuf struct of an object flag response into an
/// OpenFeature struct value.
pub fn convert_proto_struct_to_struct_value(value: prost_types::Struct) -> StructValue {
    let mut struct_value = StructValue::default();
    for (key, field) in value.fields {
        struct_value.add_field(key, convert_proto_value(field));
    }
    struct_value
}

/// Converts response metadata into OpenFeature flag metadata. Entries of
/// unsupported kinds are skipped.
pub fn convert_proto_metadata(metadata: prost_types::Struct) -> FlagMetadata {
    let mut values = HashMap::new();
    for (key, value) in metadata.fields {
        let metadata_value = match value.kind {
            Some(Kind::BoolValue(b)) => FlagMetadataValue::Bool(b),
            Some(Kind::NumberValue(n)) => FlagMetadataValue::Float(n),
            Some(Kind::StringValue(s)) => FlagMetadataValue::String(s),
            _ => continue,
        };
        values.insert(key, metadata_value);
    }
    FlagMetadata { values }
}
