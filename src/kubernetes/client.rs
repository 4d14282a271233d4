//! Kubernetes API client
//!
//! Wraps the kube crate to provide the handful of queries the binaries
//! need: label-filtered namespace listing, per-namespace network-policy
//! listing, and PVC node-attachment lookups.

use k8s_openapi::api::core::v1::{Namespace, PersistentVolumeClaim, Pod};
use k8s_openapi::api::networking::v1::NetworkPolicy;
use k8s_openapi::api::storage::v1::VolumeAttachment;
use kube::{
    api::{Api, ListParams, PostParams},
    Client, Config, ResourceExt,
};
use thiserror::Error;

use super::settings::KubeSettings;
use super::volumes::{follower_pod, DeployedPod, PodPlacement};

#[derive(Debug, Error)]
pub enum KubeClientError {
    #[error("Failed to create client: {0}")]
    ClientError(#[from] kube::Error),
    #[error("Failed to load kubeconfig: {0}")]
    ConfigError(#[from] kube::config::KubeconfigError),
    #[error("Failed to infer config: {0}")]
    InferError(#[from] kube::config::InferConfigError),
}

/// Kubernetes API client
pub struct KubeClient {
    client: Client,
}

impl std::fmt::Debug for KubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeClient").finish_non_exhaustive()
    }
}

impl KubeClient {
    /// Connect using resolved settings. The kubeconfig path comes from
    /// [`KubeSettings::kubeconfig_path`] (explicit path first, then the
    /// conventional locations); with no kubeconfig anywhere the config is
    /// inferred, which falls back to the in-cluster environment.
    pub async fn connect(settings: &KubeSettings) -> Result<Self, KubeClientError> {
        let options = kube::config::KubeConfigOptions {
            context: settings.context.clone(),
            ..Default::default()
        };

        let config = match settings.kubeconfig_path() {
            Some(path) => {
                tracing::debug!("Loading kubeconfig from {}", path.display());
                let kubeconfig = kube::config::Kubeconfig::read_from(&path)?;
                Config::from_custom_kubeconfig(kubeconfig, &options).await?
            }
            None => Config::infer().await?,
        };

        let client = Client::try_from(config)?;
        Ok(Self { client })
    }

    /// List names of namespaces whose labels satisfy the selector.
    ///
    /// The selector uses the API server's label-selector grammar
    /// (`key=value`, `key!=value`, comma-conjoined) and is evaluated
    /// server-side. Order is whatever the server returns.
    pub async fn list_namespaces(&self, selector: &str) -> Result<Vec<String>, KubeClientError> {
        let start = std::time::Instant::now();
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let params = ListParams::default().labels(selector);
        let list = namespaces.list(&params).await?;
        tracing::debug!(
            "list_namespaces({}) API call took {:?}",
            selector,
            start.elapsed()
        );

        Ok(list.items.into_iter().map(|ns| ns.name_any()).collect())
    }

    /// List names of the network policies defined in a namespace.
    pub async fn list_network_policies(
        &self,
        namespace: &str,
    ) -> Result<Vec<String>, KubeClientError> {
        let start = std::time::Instant::now();
        let policies: Api<NetworkPolicy> = Api::namespaced(self.client.clone(), namespace);
        let list = policies.list(&ListParams::default()).await?;
        tracing::debug!(
            "list_network_policies({}) API call took {:?}",
            namespace,
            start.elapsed()
        );

        Ok(list.items.into_iter().map(|np| np.name_any()).collect())
    }

    /// Find the node a PVC's volume is attached to.
    ///
    /// Returns `Ok(None)` when the PVC has no bound volume or no attached
    /// VolumeAttachment references its PV.
    pub async fn find_pvc_node(
        &self,
        pvc_name: &str,
        namespace: &str,
    ) -> Result<Option<String>, KubeClientError> {
        let pvcs: Api<PersistentVolumeClaim> = Api::namespaced(self.client.clone(), namespace);
        let pvc = pvcs.get(pvc_name).await?;

        let Some(pv_name) = pvc.spec.and_then(|spec| spec.volume_name) else {
            tracing::debug!("PVC {} has no bound volume", pvc_name);
            return Ok(None);
        };

        let attachments: Api<VolumeAttachment> = Api::all(self.client.clone());
        let list = attachments.list(&ListParams::default()).await?;

        for attachment in list.items {
            let matches_pv = attachment
                .spec
                .source
                .persistent_volume_name
                .as_deref()
                == Some(pv_name.as_str());
            let attached = attachment
                .status
                .as_ref()
                .is_some_and(|status| status.attached);
            if matches_pv && attached {
                return Ok(Some(attachment.spec.node_name));
            }
        }

        Ok(None)
    }

    /// Create a pod pinned to a node, per the placement request.
    pub async fn deploy_pod_on_node(
        &self,
        placement: &PodPlacement,
    ) -> Result<DeployedPod, KubeClientError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), &placement.namespace);
        let pod = follower_pod(placement);

        let created = pods.create(&PostParams::default(), &pod).await?;
        tracing::info!(
            "Created pod {} on node {}",
            placement.pod_name,
            placement.node_name
        );

        let status = created
            .status
            .and_then(|status| status.phase)
            .unwrap_or_else(|| "Unknown".to_string());
        let node = created
            .spec
            .and_then(|spec| spec.node_name)
            .unwrap_or_else(|| placement.node_name.clone());

        Ok(DeployedPod {
            name: created.metadata.name.unwrap_or_default(),
            namespace: created.metadata.namespace.unwrap_or_default(),
            node,
            status,
        })
    }
}
