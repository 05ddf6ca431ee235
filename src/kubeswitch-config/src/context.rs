use crate::ConfigError;
use crate::KubeConfig;

/// Read and switch the `current-context` pointer of a merged kubeconfig.
pub struct ContextManager {
    config: KubeConfig,
}

impl ContextManager {
    /// Manager over the kubeconfig files named by `KUBECONFIG`.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::new(KubeConfig::load()?))
    }

    pub fn new(config: KubeConfig) -> Self {
        Self { config }
    }

    /// Name of the active context, verbatim; may be empty.
    pub fn current_context(&self) -> &str {
        &self.config.current_context
    }

    /// All context names, lexicographically sorted and deduplicated.
    pub fn context_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .config
            .contexts
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.config.context(name).is_none() {
            return Err(ConfigError::ContextNotFound {
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    /// Make `name` the current context and persist. Switching to the context
    /// that is already current is a no-op and performs no write.
    pub fn switch_to(&mut self, name: &str) -> Result<(), ConfigError> {
        self.validate(name)?;
        if name == self.config.current_context {
            return Ok(());
        }
        self.config.current_context = name.to_owned();
        self.config.save()
    }

    pub fn config(&self) -> &KubeConfig {
        &self.config
    }
}
