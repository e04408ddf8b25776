//! Load balanced web application manifest.
//!
//! A web application runs as a set of tasks behind the environment's shared
//! load balancer, reachable through a path-based routing rule.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ManifestError, ManifestResult};

fn default_path() -> String {
    "*".to_string()
}

fn default_cpu() -> u32 {
    256
}

fn default_memory() -> u32 {
    512
}

fn default_count() -> u32 {
    1
}

/// Container image settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Path to the Dockerfile used to build the image
    #[serde(default)]
    pub build: Option<String>,
    /// Port the container listens on
    pub port: u16,
}

/// Path-based routing rule on the load balancer listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRule {
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for RoutingRule {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

/// Manifest for a "Load Balanced Web App".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LbWebAppManifest {
    pub name: String,
    #[serde(rename = "type")]
    pub app_type: String,
    pub image: ImageConfig,
    #[serde(default)]
    pub http: RoutingRule,
    #[serde(default = "default_cpu")]
    pub cpu: u32,
    #[serde(default = "default_memory")]
    pub memory: u32,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    #[serde(default)]
    pub secrets: BTreeMap<String, String>,
    /// Per-environment overrides, keyed by environment name
    #[serde(default)]
    pub environments: BTreeMap<String, LbWebAppOverride>,
}

/// Partial configuration applied on top of the base manifest for one environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LbWebAppOverride {
    #[serde(default)]
    pub http: Option<RoutingRule>,
    #[serde(default)]
    pub cpu: Option<u32>,
    #[serde(default)]
    pub memory: Option<u32>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    #[serde(default)]
    pub secrets: BTreeMap<String, String>,
}

/// Application configuration resolved for a single environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LbWebAppConfig {
    pub path: String,
    pub cpu: u32,
    pub memory: u32,
    pub count: u32,
    pub variables: BTreeMap<String, String>,
    pub secrets: BTreeMap<String, String>,
}

impl LbWebAppManifest {
    /// Base configuration, ignoring every environment override.
    pub fn base_config(&self) -> LbWebAppConfig {
        LbWebAppConfig {
            path: self.http.path.clone(),
            cpu: self.cpu,
            memory: self.memory,
            count: self.count,
            variables: self.variables.clone(),
            secrets: self.secrets.clone(),
        }
    }

    /// Configuration for `env_name`: the base configuration with that
    /// environment's override merged on top, or the base alone when the
    /// manifest has no override for it.
    pub fn env_config(&self, env_name: &str) -> LbWebAppConfig {
        let base = self.base_config();
        match self.environments.get(env_name) {
            Some(over) => over.apply(base),
            None => base,
        }
    }

    pub(crate) fn validate(&self) -> ManifestResult<()> {
        if self.name.trim().is_empty() {
            return Err(ManifestError::Malformed(
                "field `name` must not be empty".to_string(),
            ));
        }
        if self.count == 0 {
            return Err(ManifestError::Malformed(format!(
                "application {} must run at least one task",
                self.name
            )));
        }
        Ok(())
    }
}

impl LbWebAppOverride {
    /// Merge this override into `base`. Set fields win; maps merge key by key.
    pub fn apply(&self, mut base: LbWebAppConfig) -> LbWebAppConfig {
        if let Some(http) = &self.http {
            base.path = http.path.clone();
        }
        if let Some(cpu) = self.cpu {
            base.cpu = cpu;
        }
        if let Some(memory) = self.memory {
            base.memory = memory;
        }
        if let Some(count) = self.count {
            base.count = count;
        }
        base.variables
            .extend(self.variables.iter().map(|(k, v)| (k.clone(), v.clone())));
        base.secrets
            .extend(self.secrets.iter().map(|(k, v)| (k.clone(), v.clone())));
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> LbWebAppManifest {
        serde_yaml::from_str(
            r#"
name: frontend
type: Load Balanced Web App
image:
  build: frontend/Dockerfile
  port: 80
http:
  path: 'api'
cpu: 256
memory: 512
count: 1
variables:
  LOG_LEVEL: info
  REGION_HINT: none
environments:
  prod:
    count: 3
    memory: 1024
    variables:
      LOG_LEVEL: warn
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_env_config_without_override_is_base() {
        let m = manifest();
        assert_eq!(m.env_config("test"), m.base_config());
    }

    #[test]
    fn test_env_config_merges_override() {
        let cfg = manifest().env_config("prod");
        assert_eq!(cfg.count, 3);
        assert_eq!(cfg.memory, 1024);
        assert_eq!(cfg.cpu, 256);
        assert_eq!(cfg.path, "api");
        assert_eq!(cfg.variables["LOG_LEVEL"], "warn");
        assert_eq!(cfg.variables["REGION_HINT"], "none");
    }

    #[test]
    fn test_defaults_applied() {
        let m: LbWebAppManifest = serde_yaml::from_str(
            "name: frontend\ntype: Load Balanced Web App\nimage:\n  port: 8080\n",
        )
        .unwrap();
        let cfg = m.base_config();
        assert_eq!(cfg.path, "*");
        assert_eq!((cfg.cpu, cfg.memory, cfg.count), (256, 512, 1));
        assert!(m.image.build.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut m = manifest();
        m.name = "  ".to_string();
        assert!(m.validate().is_err());
    }
}
