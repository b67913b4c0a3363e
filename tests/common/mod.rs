use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use flagd_openfeature::proto::evaluation::v1::{
    ResolveBooleanRequest, ResolveBooleanResponse, ResolveFloatRequest, ResolveFloatResponse,
    ResolveObjectRequest, ResolveObjectResponse, ResolveStringRequest, ResolveStringResponse,
};
use flagd_openfeature::resolver::common::service::FlagService;

/// In-process stand-in for the flagd daemon, serving a fixed flag set.
///
/// Unknown flag keys answer with `NOT_FOUND`, like the daemon does.
#[derive(Debug, Default)]
pub struct FixtureFlagService {
    bools: HashMap<String, bool>,
    strings: HashMap<String, String>,
    floats: HashMap<String, f64>,
    objects: HashMap<String, prost_types::Struct>,
}

impl FixtureFlagService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bool(mut self, key: &str, value: bool) -> Self {
        self.bools.insert(key.to_string(), value);
        self
    }

    pub fn with_string(mut self, key: &str, value: &str) -> Self {
        self.strings.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_float(mut self, key: &str, value: f64) -> Self {
        self.floats.insert(key.to_string(), value);
        self
    }

    pub fn with_object(mut self, key: &str, fields: &[(&str, &str)]) -> Self {
        let fields = fields
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    prost_types::Value {
                        kind: Some(prost_types::value::Kind::StringValue(value.to_string())),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();
        self.objects
            .insert(key.to_string(), prost_types::Struct { fields });
        self
    }
}

fn not_found(flag_key: &str) -> tonic::Status {
    tonic::Status::not_found(format!("flag not found: {}", flag_key))
}

#[async_trait]
impl FlagService for FixtureFlagService {
    async fn resolve_boolean(
        &self,
        request: ResolveBooleanRequest,
    ) -> Result<ResolveBooleanResponse, tonic::Status> {
        let value = self
            .bools
            .get(&request.flag_key)
            .copied()
            .ok_or_else(|| not_found(&request.flag_key))?;
        Ok(ResolveBooleanResponse {
            value,
            reason: "STATIC".to_string(),
            variant: if value { "on" } else { "off" }.to_string(),
            metadata: None,
        })
    }

    async fn resolve_string(
        &self,
        request: ResolveStringRequest,
    ) -> Result<ResolveStringResponse, tonic::Status> {
        let value = self
            .strings
            .get(&request.flag_key)
            .cloned()
            .ok_or_else(|| not_found(&request.flag_key))?;
        Ok(ResolveStringResponse {
            value,
            reason: "STATIC".to_string(),
            variant: "default".to_string(),
            metadata: None,
        })
    }

    async fn resolve_float(
        &self,
        request: ResolveFloatRequest,
    ) -> Result<ResolveFloatResponse, tonic::Status> {
        let value = self
            .floats
            .get(&request.flag_key)
            .copied()
            .ok_or_else(|| not_found(&request.flag_key))?;
        Ok(ResolveFloatResponse {
            value,
            reason: "STATIC".to_string(),
            variant: "default".to_string(),
            metadata: None,
        })
    }

    async fn resolve_object(
        &self,
        request: ResolveObjectRequest,
    ) -> Result<ResolveObjectResponse, tonic::Status> {
        let value = self
            .objects
            .get(&request.flag_key)
            .cloned()
            .ok_or_else(|| not_found(&request.flag_key))?;
        Ok(ResolveObjectResponse {
            value: Some(value),
            reason: "STATIC".to_string(),
            variant: "default".to_string(),
            metadata: None,
        })
    }
}
