//! List network policies in label-selected namespaces.
//!
//! Prints one `<namespace>\t<policy>` line per pair. By default only
//! DMZ namespaces that Istio has not claimed are considered.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cluster_utils::{KubeClient, KubeClientError, KubeSettings};

const DEFAULT_SELECTOR: &str = "zone=dmz,kiali.io/member-of!=istio-system-dmz";

#[derive(Parser)]
#[command(name = "ls-netpol", about = "List network policies in label-selected namespaces")]
struct Args {
    /// Path to the kubeconfig file (defaults to $KUBECONFIG, then ~/.kube/config)
    #[arg(long)]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use (defaults to the current context)
    #[arg(long)]
    context: Option<String>,

    /// Label selector applied to namespaces
    #[arg(long, default_value = DEFAULT_SELECTOR)]
    selector: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), KubeClientError> {
    let settings = KubeSettings::new(args.kubeconfig, args.context);
    let client = KubeClient::connect(&settings).await?;

    for namespace in client.list_namespaces(&args.selector).await? {
        for policy in client.list_network_policies(&namespace).await? {
            println!("{namespace}\t{policy}");
        }
    }

    Ok(())
}
