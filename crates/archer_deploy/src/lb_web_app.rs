//! Stack of a load balanced web application running on Fargate.

use std::collections::BTreeMap;

use archer_manifest::{AppType, LbWebAppManifest};
use serde::Serialize;
use tracing::debug;

use crate::error::DeployResult;
use crate::priority::{rule_priority, ListenerRule};
use crate::renderer::TemplateRenderer;
use crate::stack::{
    image_location, registry_url, stack_name, stack_tags, Parameter, StackConfiguration,
    StackInput, Tag,
};
use crate::templates::{TemplateStore, LB_WEB_APP_PARAMS_PATH, LB_WEB_APP_TEMPLATE_PATH};

pub const PARAM_PROJECT_NAME_KEY: &str = "ProjectName";
pub const PARAM_ENV_NAME_KEY: &str = "EnvName";
pub const PARAM_APP_NAME_KEY: &str = "AppName";
pub const PARAM_CONTAINER_IMAGE_KEY: &str = "ContainerImage";
pub const PARAM_CONTAINER_PORT_KEY: &str = "ContainerPort";
pub const PARAM_RULE_PRIORITY_KEY: &str = "RulePriority";
pub const PARAM_RULE_PATH_KEY: &str = "RulePath";
pub const PARAM_TASK_CPU_KEY: &str = "TaskCPU";
pub const PARAM_TASK_MEMORY_KEY: &str = "TaskMemory";
pub const PARAM_TASK_COUNT_KEY: &str = "TaskCount";

/// Application fields visible to the templates as `App`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppParams {
    pub name: String,
    #[serde(rename = "Type")]
    pub app_type: String,
    pub path: String,
    #[serde(rename = "CPU")]
    pub cpu: u32,
    pub memory: u32,
    pub count: u32,
    pub variables: BTreeMap<String, String>,
    pub secrets: BTreeMap<String, String>,
}

/// Environment fields visible to the templates as `Env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvParams {
    pub project: String,
    pub name: String,
    #[serde(rename = "AccountID")]
    pub account_id: String,
    pub region: String,
    pub prod: bool,
}

/// Image fields visible to the templates as `Image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageParams {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Port")]
    pub port: u16,
}

/// Data the stack templates are rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LbWebAppTemplateParams {
    pub app: AppParams,
    pub env: EnvParams,
    pub image: ImageParams,
    pub image_tag: String,
    /// Listener rule priority
    pub priority: u32,
    pub stack_name: String,
}

/// Stack configuration of a load balanced web application.
pub struct LbWebAppStack<'a> {
    input: &'a StackInput,
    app: &'a LbWebAppManifest,
    store: &'a dyn TemplateStore,
    renderer: TemplateRenderer,
}

impl<'a> LbWebAppStack<'a> {
    pub fn new(input: &'a StackInput, app: &'a LbWebAppManifest, store: &'a dyn TemplateStore) -> Self {
        Self {
            input,
            app,
            store,
            renderer: TemplateRenderer::new(),
        }
    }

    /// Build the template data: the application configuration resolved for the
    /// environment, the image URL, and the rule priority.
    pub fn template_params(&self) -> LbWebAppTemplateParams {
        let env = &self.input.environment;
        let config = self.app.env_config(&env.name);

        let location = image_location(env, &self.app.name, &self.input.image_tag);
        let rule = ListenerRule::new(&self.app.name, &config.path);
        let priority = rule_priority(&rule, &self.input.other_rules);

        LbWebAppTemplateParams {
            app: AppParams {
                name: self.app.name.clone(),
                app_type: AppType::LoadBalancedWebApp.to_string(),
                path: config.path,
                cpu: config.cpu,
                memory: config.memory,
                count: config.count,
                variables: config.variables,
                secrets: config.secrets,
            },
            env: EnvParams {
                project: env.project.clone(),
                name: env.name.clone(),
                account_id: env.account_id.clone(),
                region: env.region.clone(),
                prod: env.prod,
            },
            image: ImageParams {
                url: registry_url(&env.account_id, &env.region, &location),
                port: self.app.image.port,
            },
            image_tag: self.input.image_tag.clone(),
            priority,
            stack_name: self.stack_name(),
        }
    }

    fn render(&self, name: &str) -> DeployResult<String> {
        debug!("Rendering {} for application {}", name, self.app.name);
        self.renderer
            .render_named(self.store, name, &self.template_params())
    }
}

impl StackConfiguration for LbWebAppStack<'_> {
    fn stack_name(&self) -> String {
        let env = &self.input.environment;
        stack_name(&env.project, &env.name, &self.app.name)
    }

    fn template(&self) -> DeployResult<String> {
        self.render(LB_WEB_APP_TEMPLATE_PATH)
    }

    fn serialized_parameters(&self) -> DeployResult<String> {
        self.render(LB_WEB_APP_PARAMS_PATH)
    }

    fn parameters(&self) -> Vec<Parameter> {
        let params = self.template_params();
        vec![
            Parameter::new(PARAM_PROJECT_NAME_KEY, params.env.project),
            Parameter::new(PARAM_ENV_NAME_KEY, params.env.name),
            Parameter::new(PARAM_APP_NAME_KEY, params.app.name),
            Parameter::new(PARAM_CONTAINER_IMAGE_KEY, params.image.url),
            Parameter::new(PARAM_CONTAINER_PORT_KEY, params.image.port.to_string()),
            Parameter::new(PARAM_RULE_PRIORITY_KEY, params.priority.to_string()),
            Parameter::new(PARAM_RULE_PATH_KEY, params.app.path),
            Parameter::new(PARAM_TASK_CPU_KEY, params.app.cpu.to_string()),
            Parameter::new(PARAM_TASK_MEMORY_KEY, params.app.memory.to_string()),
            Parameter::new(PARAM_TASK_COUNT_KEY, params.app.count.to_string()),
        ]
    }

    fn tags(&self) -> Vec<Tag> {
        stack_tags(&self.input.environment, &self.app.name)
    }
}
