//! # archer_manifest
//!
//! Application manifest decoding for archer.
//!
//! A manifest describes one deployable application in a workspace. Each
//! manifest carries a `type` discriminator that selects the application shape;
//! the decoder turns the raw YAML into the matching [`AppManifest`] variant.
//!
//! ## Example
//!
//! ```rust
//! use archer_manifest::{decode, AppManifest};
//!
//! let raw = br#"
//! name: frontend
//! type: Load Balanced Web App
//! image:
//!   build: frontend/Dockerfile
//!   port: 80
//! http:
//!   path: '*'
//! cpu: 256
//! memory: 512
//! count: 1
//! "#;
//!
//! let manifest = decode(raw).unwrap();
//! assert_eq!(manifest.name(), "frontend");
//! let AppManifest::LoadBalancedWebApp(app) = manifest;
//! assert_eq!(app.env_config("test").count, 1);
//! ```

pub mod error;
pub mod lb_web_app;
pub mod manifest;

pub use error::{ManifestError, ManifestResult};
pub use lb_web_app::{ImageConfig, LbWebAppConfig, LbWebAppManifest, LbWebAppOverride, RoutingRule};
pub use manifest::{decode, AppManifest, AppType};
