//! Certificate rendering and storage configuration.

use serde::{Deserialize, Serialize};

/// Certificate artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateConfig {
    /// Directory where rendered PDF artifacts are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// URL prefix under which artifacts are served statically.
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
    /// Name of the issuing organization printed on certificates.
    #[serde(default = "default_issuer_name")]
    pub issuer_name: String,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            public_prefix: default_public_prefix(),
            issuer_name: default_issuer_name(),
        }
    }
}

fn default_output_dir() -> String {
    "data/certificates".to_string()
}

fn default_public_prefix() -> String {
    "/certificates".to_string()
}

fn default_issuer_name() -> String {
    "LearnHub".to_string()
}
