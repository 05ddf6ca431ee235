use crate::ConfigError;
use crate::KubeConfig;

pub const DEFAULT_NAMESPACE: &str = "default";

/// Capability for listing the namespaces visible to the current context's
/// credentials. Injected so the manager itself performs no network I/O and
/// tests can script the result.
pub trait NamespaceLister {
    fn list_namespaces(&self, config: &KubeConfig) -> Result<Vec<String>, ConfigError>;
}

/// Read and switch the namespace of the current context.
///
/// Construction requires a resolvable current context; both the empty and
/// the dangling case are rejected up front, before any mutation can happen.
pub struct NamespaceManager {
    config: KubeConfig,
    current_context: String,
}

impl NamespaceManager {
    /// Manager over the kubeconfig files named by `KUBECONFIG`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::new(KubeConfig::load()?)
    }

    pub fn new(config: KubeConfig) -> Result<Self, ConfigError> {
        if config.current_context.is_empty() {
            return Err(ConfigError::NoCurrentContext);
        }
        if config.current_context().is_none() {
            return Err(ConfigError::ContextNotFound {
                name: config.current_context.clone(),
            });
        }
        let current_context = config.current_context.clone();
        Ok(Self {
            config,
            current_context,
        })
    }

    pub fn current_context(&self) -> &str {
        &self.current_context
    }

    /// Namespace of the current context, or `"default"` when unset.
    pub fn current_namespace(&self) -> &str {
        self.config
            .context(&self.current_context)
            .map(|c| c.context.namespace())
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Ask the cluster for its namespaces. Read-only; the order comes back
    /// verbatim from the lister.
    pub fn list_from_cluster(&self, lister: &dyn NamespaceLister) -> Result<Vec<String>, ConfigError> {
        lister.list_namespaces(&self.config)
    }

    /// Set the current context's namespace and persist, creating the field
    /// when the context had none. Switching to the namespace that is already
    /// active is a no-op and performs no write.
    pub fn switch_to(&mut self, namespace: &str) -> Result<(), ConfigError> {
        if namespace == self.current_namespace() {
            return Ok(());
        }
        // the entry exists, checked at construction
        if let Some(context) = self.config.context_mut(&self.current_context) {
            context.context.namespace = Some(namespace.to_owned());
        }
        self.config.save()
    }

    pub fn config(&self) -> &KubeConfig {
        &self.config
    }
}
