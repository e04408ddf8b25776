//! Manifest classification and decoding.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ManifestError, ManifestResult};
use crate::lb_web_app::LbWebAppManifest;

/// Application shapes that archer knows how to package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppType {
    #[serde(rename = "Load Balanced Web App")]
    LoadBalancedWebApp,
}

impl AppType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppType::LoadBalancedWebApp => "Load Balanced Web App",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Load Balanced Web App" => Some(AppType::LoadBalancedWebApp),
            _ => None,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![AppType::LoadBalancedWebApp]
    }
}

impl std::fmt::Display for AppType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A decoded application manifest, one variant per application shape.
#[derive(Debug, Clone, PartialEq)]
pub enum AppManifest {
    LoadBalancedWebApp(LbWebAppManifest),
}

impl AppManifest {
    /// Name of the application.
    pub fn name(&self) -> &str {
        match self {
            AppManifest::LoadBalancedWebApp(m) => &m.name,
        }
    }

    /// Application shape selected by the manifest's discriminator.
    pub fn app_type(&self) -> AppType {
        match self {
            AppManifest::LoadBalancedWebApp(_) => AppType::LoadBalancedWebApp,
        }
    }

    /// Routing path the application serves for the given environment.
    pub fn rule_path(&self, env_name: &str) -> String {
        match self {
            AppManifest::LoadBalancedWebApp(m) => m.env_config(env_name).path,
        }
    }
}

/// Decode a serialized manifest into its typed variant.
///
/// The document is classified by its `type` field first so that an
/// unrecognized application shape is reported as such rather than as a
/// structural failure of some other variant.
pub fn decode(raw: &[u8]) -> ManifestResult<AppManifest> {
    let doc: serde_yaml::Value =
        serde_yaml::from_slice(raw).map_err(|e| ManifestError::Malformed(e.to_string()))?;

    if !doc.is_mapping() {
        return Err(ManifestError::Malformed(
            "manifest must be a mapping of fields".to_string(),
        ));
    }

    let discriminator = doc
        .get("type")
        .ok_or_else(|| ManifestError::Malformed("missing field `type`".to_string()))?
        .as_str()
        .ok_or_else(|| ManifestError::Malformed("field `type` must be a string".to_string()))?
        .to_string();

    let app_type = AppType::from_str(&discriminator).ok_or_else(|| {
        ManifestError::UnsupportedType {
            found: discriminator.clone(),
            supported: AppType::all()
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    })?;

    debug!("Decoding manifest of type {}", app_type);

    match app_type {
        AppType::LoadBalancedWebApp => {
            let manifest: LbWebAppManifest = serde_yaml::from_value(doc)
                .map_err(|e| ManifestError::Malformed(e.to_string()))?;
            manifest.validate()?;
            Ok(AppManifest::LoadBalancedWebApp(manifest))
        }
    }
}
