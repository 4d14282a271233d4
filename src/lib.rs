pub mod kubernetes;
pub mod secrets;

pub use kubernetes::{DeployedPod, KubeClient, KubeClientError, KubeSettings, PodPlacement};
pub use secrets::{decode_line, decode_stream, DecodeLineError, SecretRecord, StreamError};
