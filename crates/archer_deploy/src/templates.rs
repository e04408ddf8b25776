//! Read-only template stores.

use std::collections::HashMap;

use crate::error::{DeployError, DeployResult};

/// Stack template of a load balanced web application.
pub const LB_WEB_APP_TEMPLATE_PATH: &str = "lb-fargate-service/cf.yml";
/// Parameter document of a load balanced web application.
pub const LB_WEB_APP_PARAMS_PATH: &str = "lb-fargate-service/params.json";

const BUNDLED: &[(&str, &str)] = &[
    (
        LB_WEB_APP_TEMPLATE_PATH,
        include_str!("../templates/lb-fargate-service/cf.yml"),
    ),
    (
        LB_WEB_APP_PARAMS_PATH,
        include_str!("../templates/lb-fargate-service/params.json"),
    ),
];

/// Lookup of template bodies by name.
pub trait TemplateStore {
    fn find(&self, name: &str) -> DeployResult<&str>;
}

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledTemplates;

impl BundledTemplates {
    pub fn new() -> Self {
        Self
    }

    /// Names of every bundled template.
    pub fn names() -> Vec<&'static str> {
        BUNDLED.iter().map(|(name, _)| *name).collect()
    }
}

impl TemplateStore for BundledTemplates {
    fn find(&self, name: &str) -> DeployResult<&str> {
        BUNDLED
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, body)| *body)
            .ok_or_else(|| DeployError::TemplateNotFound(name.to_string()))
    }
}

/// Template store over an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplates {
    templates: HashMap<String, String>,
}

impl InMemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.templates.insert(name.into(), body.into());
        self
    }
}

impl TemplateStore for InMemoryTemplates {
    fn find(&self, name: &str) -> DeployResult<&str> {
        self.templates
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| DeployError::TemplateNotFound(name.to_string()))
    }
}
