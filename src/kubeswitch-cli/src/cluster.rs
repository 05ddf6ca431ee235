use k8s_openapi::api::core::v1::Namespace;
use kube::api::ListParams;
use kube::config::KubeConfigOptions;
use kube::config::Kubeconfig;
use kube::Api;
use kube::Client;
use kube::Config;
use tracing::debug;

use kubeswitch_config::ConfigError;
use kubeswitch_config::KubeConfig;
use kubeswitch_config::NamespaceLister;

/// Namespace lister backed by a live cluster connection, built from the
/// merged kubeconfig and scoped to the credentials of its current context.
///
/// This is the only network operation in the tool: one read-only list call,
/// no retries, bounded by the client's own timeout.
pub struct ClusterNamespaces;

impl NamespaceLister for ClusterNamespaces {
    fn list_namespaces(&self, config: &KubeConfig) -> Result<Vec<String>, ConfigError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| ConfigError::ClusterUnreachable {
                source: source.into(),
            })?;
        runtime
            .block_on(fetch_namespaces(config))
            .map_err(|source| ConfigError::ClusterUnreachable {
                source: source.into(),
            })
    }
}

async fn fetch_namespaces(config: &KubeConfig) -> anyhow::Result<Vec<String>> {
    // kube's loader wants its own document type; round-trip the already
    // merged config through YAML instead of re-reading the files.
    let yaml = serde_yaml::to_string(config)?;
    let kubeconfig: Kubeconfig = serde_yaml::from_str(&yaml)?;
    let options = KubeConfigOptions {
        context: (!config.current_context.is_empty()).then(|| config.current_context.clone()),
        ..Default::default()
    };
    let client_config = Config::from_custom_kubeconfig(kubeconfig, &options).await?;
    let client = Client::try_from(client_config)?;

    let api: Api<Namespace> = Api::all(client);
    let list = api.list(&ListParams::default()).await?;
    debug!(count = list.items.len(), "listed namespaces from cluster");

    Ok(list
        .items
        .into_iter()
        .filter_map(|ns| ns.metadata.name)
        .collect())
}
