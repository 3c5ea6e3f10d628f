use kube::Client;
use tracing::{debug, warn};

/// Infer the kube config (kubeconfig file or in-cluster service account)
/// and build a client from it.
pub async fn connect() -> Result<Client, kube::Error> {
    Client::try_default().await
}

/// Startup probe: can we find credentials and reach the API server?
pub async fn check_cluster_api_reachable() -> bool {
    let client = match connect().await {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "No usable kube config found");
            return false;
        }
    };
    match client.apiserver_version().await {
        Ok(info) => {
            debug!(version = %info.git_version, "Reached kube-apiserver");
            true
        }
        Err(e) => {
            warn!(error = %e, "kube-apiserver unreachable");
            false
        }
    }
}
