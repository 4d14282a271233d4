//! Kubernetes integration module
//!
//! Provides kubeconfig resolution, namespace and network-policy listing,
//! and PVC node-attachment queries.

pub mod client;
pub mod settings;
pub mod volumes;

pub use client::{KubeClient, KubeClientError};
pub use settings::KubeSettings;
pub use volumes::{DeployedPod, PodPlacement};
