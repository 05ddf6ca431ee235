use std::io::Error as IoError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, resolving or rewriting kubeconfig state.
///
/// All of these are terminal for the current invocation; nothing is retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read kubeconfig {}: {source}", path.display())]
    Load { path: PathBuf, source: IoError },
    #[error("cannot parse kubeconfig {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("no kubeconfig files to load")]
    NoConfigFiles,
    #[error("cannot determine home directory")]
    NoHomeDir,
    #[error("no active Kubernetes context")]
    NoCurrentContext,
    #[error("context {name:?} not found")]
    ContextNotFound { name: String },
    #[error("cluster unreachable: {source}")]
    ClusterUnreachable {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("cannot write kubeconfig {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
