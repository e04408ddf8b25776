//! Stack configuration shared by every application shape.

use archer_manifest::AppManifest;
use archer_store::Environment;
use serde::{Deserialize, Serialize};

use crate::error::DeployResult;
use crate::lb_web_app::LbWebAppStack;
use crate::priority::ListenerRule;
use crate::templates::TemplateStore;

/// Longest stack name CloudFormation accepts.
pub const STACK_NAME_MAX_LEN: usize = 128;

/// Tag key holding the project name.
pub const PROJECT_TAG_KEY: &str = "ecs-project";
/// Tag key holding the environment name.
pub const ENV_TAG_KEY: &str = "ecs-environment";
/// Tag key holding the application name.
pub const APP_TAG_KEY: &str = "ecs-application";

/// A named stack parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "ParameterKey")]
    pub key: String,
    #[serde(rename = "ParameterValue")]
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A tag applied to the stack and its resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Everything needed to produce the stack of one application in one environment.
#[derive(Debug, Clone, PartialEq)]
pub struct StackInput {
    pub manifest: AppManifest,
    pub environment: Environment,
    pub image_tag: String,
    /// Rules of the other applications sharing the environment's listener
    pub other_rules: Vec<ListenerRule>,
}

impl StackInput {
    pub fn new(manifest: AppManifest, environment: Environment, image_tag: impl Into<String>) -> Self {
        Self {
            manifest,
            environment,
            image_tag: image_tag.into(),
            other_rules: Vec::new(),
        }
    }

    pub fn with_other_rules(mut self, rules: Vec<ListenerRule>) -> Self {
        self.other_rules = rules;
        self
    }
}

/// A deployable stack derived from a manifest and an environment.
pub trait StackConfiguration {
    /// Name of the stack.
    fn stack_name(&self) -> String;

    /// Stack template rendered for the environment.
    fn template(&self) -> DeployResult<String>;

    /// Parameter document rendered for the environment.
    fn serialized_parameters(&self) -> DeployResult<String>;

    /// Parameters passed to the stack, in template order.
    fn parameters(&self) -> Vec<Parameter>;

    /// Tags applied to the stack.
    fn tags(&self) -> Vec<Tag>;
}

/// Select the stack configuration matching the manifest's application shape.
pub fn stack_for<'a>(
    input: &'a StackInput,
    store: &'a dyn TemplateStore,
) -> Box<dyn StackConfiguration + 'a> {
    match &input.manifest {
        AppManifest::LoadBalancedWebApp(app) => Box::new(LbWebAppStack::new(input, app, store)),
    }
}

/// Stack name for an application, keeping the last
/// [`STACK_NAME_MAX_LEN`] characters when the full name is longer.
pub fn stack_name(project: &str, env: &str, app: &str) -> String {
    let name = format!("{}-{}-{}-app", project, env, app);
    let len = name.chars().count();
    if len > STACK_NAME_MAX_LEN {
        name.chars().skip(len - STACK_NAME_MAX_LEN).collect()
    } else {
        name
    }
}

/// Location of an image inside the registry.
pub fn image_location(env: &Environment, app_name: &str, tag: &str) -> String {
    format!("{}/{}/{}:{}", env.project, env.name, app_name, tag)
}

/// Registry URL of an image location.
pub fn registry_url(account_id: &str, region: &str, location: &str) -> String {
    format!("{}.dkr.ecr.{}.amazonaws.com/{}", account_id, region, location)
}

/// Tags every stack of `app_name` in `env` carries.
pub fn stack_tags(env: &Environment, app_name: &str) -> Vec<Tag> {
    vec![
        Tag::new(PROJECT_TAG_KEY, &env.project),
        Tag::new(ENV_TAG_KEY, &env.name),
        Tag::new(APP_TAG_KEY, app_name),
    ]
}
