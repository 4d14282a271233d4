//! Follower pod construction
//!
//! Builds the pod that volumefollower pins next to a PVC's volume. Kept
//! as a pure function so the spec wiring can be tested without a cluster.

use k8s_openapi::api::core::v1::{
    Container, PersistentVolumeClaimVolumeSource, Pod, PodSpec, Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

pub const DEFAULT_IMAGE: &str = "debian:latest";
pub const DEFAULT_MOUNT_PATH: &str = "/data";

/// Where and how to run the follower pod.
#[derive(Debug, Clone)]
pub struct PodPlacement {
    pub pod_name: String,
    pub node_name: String,
    pub namespace: String,
    pub image: String,
    /// Entrypoint override. `None` keeps the pod idle with `/bin/sleep infinity`.
    pub command: Option<Vec<String>>,
    /// PVC to mount at `mount_path`, if any.
    pub pvc_name: Option<String>,
    pub mount_path: String,
}

impl PodPlacement {
    /// A placement that follows `pvc_name`: idle debian pod on `node_name`
    /// with the PVC mounted at `/data`.
    pub fn following(pvc_name: &str, node_name: &str, namespace: &str) -> Self {
        Self {
            pod_name: format!("volumefollower-{pvc_name}"),
            node_name: node_name.to_string(),
            namespace: namespace.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            command: None,
            pvc_name: Some(pvc_name.to_string()),
            mount_path: DEFAULT_MOUNT_PATH.to_string(),
        }
    }
}

/// What the API server actually created.
#[derive(Debug, Clone)]
pub struct DeployedPod {
    pub name: String,
    pub namespace: String,
    pub node: String,
    pub status: String,
}

/// Build the pod manifest for a placement. The pod is pinned with
/// `node_name` (bypassing the scheduler) and never restarted.
pub fn follower_pod(placement: &PodPlacement) -> Pod {
    let mut container = Container {
        name: format!("{}-container", placement.pod_name),
        image: Some(placement.image.clone()),
        command: Some(
            placement
                .command
                .clone()
                .unwrap_or_else(|| vec!["/bin/sleep".to_string(), "infinity".to_string()]),
        ),
        ..Default::default()
    };

    let volumes = placement.pvc_name.as_ref().map(|pvc_name| {
        container.volume_mounts = Some(vec![VolumeMount {
            name: "data-volume".to_string(),
            mount_path: placement.mount_path.clone(),
            ..Default::default()
        }]);

        vec![Volume {
            name: "data-volume".to_string(),
            persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                claim_name: pvc_name.clone(),
                read_only: None,
            }),
            ..Default::default()
        }]
    });

    Pod {
        metadata: ObjectMeta {
            name: Some(placement.pod_name.clone()),
            namespace: Some(placement.namespace.clone()),
            ..Default::default()
        },
        spec: Some(PodSpec {
            node_name: Some(placement.node_name.clone()),
            containers: vec![container],
            volumes,
            restart_policy: Some("Never".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}
