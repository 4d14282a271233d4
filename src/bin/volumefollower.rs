//! Deploy a pod on the node a PVC is attached to.
//!
//! Finds the node holding the PVC's volume attachment and pins an idle
//! pod there with the PVC mounted at /data, for ad-hoc inspection of
//! node-local volumes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cluster_utils::{KubeClient, KubeClientError, KubeSettings, PodPlacement};

#[derive(Parser)]
#[command(name = "volumefollower", about = "Deploy a pod on the node a PVC is attached to")]
struct Args {
    /// Name of the PVC to follow
    pvc_name: String,

    /// Kubernetes namespace of the PVC (and of the follower pod)
    #[arg(short = 'n', long, default_value = "default")]
    namespace: String,

    /// Path to the kubeconfig file (defaults to $KUBECONFIG, then ~/.kube/config)
    #[arg(long)]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use (defaults to the current context)
    #[arg(long)]
    context: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, KubeClientError> {
    let settings = KubeSettings::new(args.kubeconfig, args.context);
    let client = KubeClient::connect(&settings).await?;

    let Some(node_name) = client
        .find_pvc_node(&args.pvc_name, &args.namespace)
        .await?
    else {
        eprintln!("Error: PVC {} is not attached to any node", args.pvc_name);
        return Ok(ExitCode::FAILURE);
    };

    println!("PVC {} is attached to node {}", args.pvc_name, node_name);

    let placement = PodPlacement::following(&args.pvc_name, &node_name, &args.namespace);
    let pod = client.deploy_pod_on_node(&placement).await?;

    println!("Pod successfully deployed:");
    println!("Name: {}", pod.name);
    println!("Namespace: {}", pod.namespace);
    println!("Status: {}", pod.status);
    println!("Node: {}", pod.node);
    println!("PVC: {} mounted at {}", args.pvc_name, placement.mount_path);

    Ok(ExitCode::SUCCESS)
}
