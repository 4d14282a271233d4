//! Cluster connection settings
//!
//! Resolved once by the CLI shell and handed to [`KubeClient::connect`]
//! as a plain struct, so the query code never touches flags or globals.
//!
//! [`KubeClient::connect`]: crate::kubernetes::client::KubeClient::connect

use std::path::PathBuf;

/// How to reach the cluster: an explicit kubeconfig path and/or a named
/// context. Both default to "whatever the environment says".
#[derive(Debug, Clone, Default)]
pub struct KubeSettings {
    /// Explicit kubeconfig path. `None` means infer: `$KUBECONFIG`,
    /// then `~/.kube/config`, then in-cluster config.
    pub kubeconfig: Option<PathBuf>,
    /// Context name within the kubeconfig. `None` uses the current context.
    pub context: Option<String>,
}

impl KubeSettings {
    pub fn new(kubeconfig: Option<PathBuf>, context: Option<String>) -> Self {
        Self { kubeconfig, context }
    }

    /// The kubeconfig path these settings resolve to, if one can be named
    /// without talking to the cluster. An explicit path always wins.
    pub fn kubeconfig_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.kubeconfig {
            return Some(path.clone());
        }
        Self::default_path()
    }

    /// The conventional kubeconfig location: `$KUBECONFIG` (first entry)
    /// if it points at an existing file, otherwise `~/.kube/config`.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(kubeconfig) = std::env::var("KUBECONFIG") {
            let path = PathBuf::from(kubeconfig.split(':').next().unwrap_or(&kubeconfig));
            if path.exists() {
                return Some(path);
            }
        }

        let home = dirs::home_dir()?;
        let path = home.join(".kube").join("config");
        path.exists().then_some(path)
    }
}
