mod config;
mod context;
mod error;
mod namespace;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::merge;
pub use config::Context;
pub use config::ContextDetail;
pub use config::KubeConfig;
pub use config::NamedEntry;
pub use config::KUBECONFIG_ENV;
pub use context::ContextManager;
pub use error::ConfigError;
pub use namespace::NamespaceLister;
pub use namespace::NamespaceManager;
pub use namespace::DEFAULT_NAMESPACE;
