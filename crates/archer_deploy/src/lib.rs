//! # archer_deploy
//!
//! Turns an application manifest and an environment into a deployable stack:
//! the named parameters and tags of the stack, plus its template and parameter
//! document rendered from a read-only template store.
//!
//! ## Example
//!
//! ```rust
//! use archer_deploy::{stack_for, BundledTemplates, StackConfiguration, StackInput};
//! use archer_manifest::decode;
//! use archer_store::Environment;
//!
//! let manifest = decode(b"name: frontend\ntype: Load Balanced Web App\nimage:\n  port: 80\n").unwrap();
//! let env = Environment::new("demo", "test", "123456789012", "us-east-1");
//! let input = StackInput::new(manifest, env, "latest");
//!
//! let store = BundledTemplates::new();
//! let stack = stack_for(&input, &store);
//! assert_eq!(stack.stack_name(), "demo-test-frontend-app");
//!
//! let template = stack.template().unwrap();
//! let params = stack.serialized_parameters().unwrap();
//! assert!(params.contains("AppName: frontend"));
//! ```

pub mod error;
pub mod lb_web_app;
pub mod priority;
pub mod renderer;
pub mod stack;
pub mod templates;

pub use error::{DeployError, DeployResult};
pub use lb_web_app::{LbWebAppStack, LbWebAppTemplateParams};
pub use priority::{rule_priority, ListenerRule, RulePriorityAllocator};
pub use renderer::{TemplateRenderer, QUOTE_HELPER};
pub use stack::{stack_for, stack_name, Parameter, StackConfiguration, StackInput, Tag, STACK_NAME_MAX_LEN};
pub use templates::{
    BundledTemplates, InMemoryTemplates, TemplateStore, LB_WEB_APP_PARAMS_PATH,
    LB_WEB_APP_TEMPLATE_PATH,
};
