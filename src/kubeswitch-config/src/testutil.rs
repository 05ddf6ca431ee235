//! Test helpers: in-memory kubeconfig documents and self-cleaning temp files.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use crate::config::Context;
use crate::config::ContextDetail;
use crate::config::KubeConfig;
use crate::config::NamedEntry;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Kubeconfig with one test cluster/user and the given (context, namespace)
/// pairs. `sources` is left empty; attach a file with [`TempKubeconfig`].
pub(crate) fn test_config(current: &str, contexts: &[(&str, Option<&str>)]) -> KubeConfig {
    let mut config = KubeConfig {
        api_version: "v1".to_owned(),
        kind: "Config".to_owned(),
        current_context: current.to_owned(),
        ..Default::default()
    };
    config.clusters.push(NamedEntry {
        name: "test-cluster".to_owned(),
        ..Default::default()
    });
    config.users.push(NamedEntry {
        name: "test-user".to_owned(),
        ..Default::default()
    });
    for (name, namespace) in contexts {
        config.contexts.push(Context {
            name: (*name).to_owned(),
            context: ContextDetail {
                cluster: "test-cluster".to_owned(),
                user: "test-user".to_owned(),
                namespace: namespace.map(str::to_owned),
            },
        });
    }
    config
}

/// A kubeconfig written to a unique temp path, removed on drop.
pub(crate) struct TempKubeconfig {
    pub path: PathBuf,
}

impl TempKubeconfig {
    pub fn write(config: &KubeConfig) -> Self {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = env::temp_dir().join(format!("kubeswitch-test-{}-{n}.yaml", process::id()));
        config.to_file(&path).expect("write test kubeconfig");
        Self { path }
    }
}

impl Drop for TempKubeconfig {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
