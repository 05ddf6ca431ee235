use std::collections::BTreeMap;
use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use dirs::home_dir;
use serde::Deserialize;
use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

use crate::namespace::DEFAULT_NAMESPACE;
use crate::ConfigError;

pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    pub context: ContextDetail,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContextDetail {
    pub cluster: String,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ContextDetail {
    /// Namespace of this context; empty or absent means the default one.
    pub fn namespace(&self) -> &str {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => ns,
            _ => DEFAULT_NAMESPACE,
        }
    }
}

/// A named cluster or user entry carried verbatim.
///
/// This tool only ever follows context names, so everything below the name
/// stays opaque YAML and survives a rewrite untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedEntry {
    pub name: String,
    #[serde(flatten)]
    pub entry: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KubeConfig {
    /// Ordered file list this document was merged from; the first entry is
    /// the write target for mutations.
    #[serde(skip)]
    pub sources: Vec<PathBuf>,
    #[serde(rename = "apiVersion", default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default)]
    pub clusters: Vec<NamedEntry>,
    #[serde(default)]
    pub contexts: Vec<Context>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_context: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default)]
    pub users: Vec<NamedEntry>,
    /// Top-level keys this tool does not model (`preferences`, extensions).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl KubeConfig {
    /// Resolve the kubeconfig file list: `KUBECONFIG` split on the platform
    /// path-list separator, or the single default under the home directory.
    pub fn config_files() -> Result<Vec<PathBuf>, ConfigError> {
        Self::config_files_from(env::var_os(KUBECONFIG_ENV).as_deref())
    }

    /// Same as [`config_files`](Self::config_files) with an explicit
    /// environment value. A set-but-empty variable behaves as unset.
    pub fn config_files_from(value: Option<&OsStr>) -> Result<Vec<PathBuf>, ConfigError> {
        if let Some(value) = value {
            let paths: Vec<PathBuf> = env::split_paths(value)
                .filter(|path| !path.as_os_str().is_empty())
                .collect();
            if !paths.is_empty() {
                return Ok(paths);
            }
        }
        let home = home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(vec![home.join(".kube").join("config")])
    }

    /// Load and merge the files named by `KUBECONFIG`, or the default file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_files(Self::config_files()?)
    }

    pub fn from_file<T: AsRef<Path>>(path: T) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.sources = vec![path.to_path_buf()];
        Ok(config)
    }

    /// Load every file in order and fold them into one document with
    /// [`merge`]. Any missing or unparseable file fails the whole load.
    pub fn from_files(paths: Vec<PathBuf>) -> Result<Self, ConfigError> {
        let mut merged: Option<Self> = None;
        for path in &paths {
            let next = Self::from_file(path)?;
            debug!(path = %path.display(), contexts = next.contexts.len(), "loaded kubeconfig");
            merged = Some(match merged {
                Some(acc) => merge(acc, next),
                None => next,
            });
        }
        let mut config = merged.ok_or(ConfigError::NoConfigFiles)?;
        config.sources = paths;
        Ok(config)
    }

    pub fn to_file<T: AsRef<Path>>(&self, path: T) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).map_err(|source| ConfigError::Persist {
            path: path.to_path_buf(),
            source: source.into(),
        })?;
        fs::write(path, yaml).map_err(|source| ConfigError::Persist {
            path: path.to_path_buf(),
            source: source.into(),
        })
    }

    /// Rewrite the file that owns mutable state, the first source file.
    /// The whole merged document is written; entries that originated in
    /// other files are carried along unchanged.
    pub fn save(&self) -> Result<(), ConfigError> {
        let target = self.write_target().ok_or(ConfigError::NoConfigFiles)?;
        debug!(path = %target.display(), "persisting kubeconfig");
        self.to_file(target)
    }

    pub fn write_target(&self) -> Option<&Path> {
        self.sources.first().map(PathBuf::as_path)
    }

    pub fn current_context(&self) -> Option<&Context> {
        self.context(&self.current_context)
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    pub fn context_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }
}

/// Merge step for multi-file kubeconfigs.
///
/// Singular fields keep the first non-empty value seen; named entries and
/// unmodeled top-level keys are unioned with first-seen-wins on collision.
pub fn merge(mut acc: KubeConfig, next: KubeConfig) -> KubeConfig {
    if acc.api_version.is_empty() {
        acc.api_version = next.api_version;
    }
    if acc.kind.is_empty() {
        acc.kind = next.kind;
    }
    if acc.current_context.is_empty() {
        acc.current_context = next.current_context;
    }
    for context in next.contexts {
        if acc.context(&context.name).is_none() {
            acc.contexts.push(context);
        }
    }
    for cluster in next.clusters {
        if !acc.clusters.iter().any(|c| c.name == cluster.name) {
            acc.clusters.push(cluster);
        }
    }
    for user in next.users {
        if !acc.users.iter().any(|u| u.name == user.name) {
            acc.users.push(user);
        }
    }
    for (key, value) in next.extra {
        acc.extra.entry(key).or_insert(value);
    }
    acc
}

#[cfg(test)]
mod test {
    use std::env::join_paths;
    use std::path::PathBuf;

    use super::merge;
    use super::KubeConfig;
    use crate::testutil::test_config;

    #[test]
    fn test_decode_default_config() {
        let config = KubeConfig::from_file("data/k8config.yaml").expect("read");
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.kind, "Config");
        assert_eq!(config.current_context, "dev");
        assert_eq!(config.clusters.len(), 1);
        assert_eq!(config.clusters[0].name, "kind-local");
        assert_eq!(config.contexts.len(), 2);
        let ctx = &config.contexts[0].context;
        assert_eq!(ctx.cluster, "kind-local");
        assert_eq!(ctx.namespace.as_ref().unwrap(), "web");
        assert!(config.contexts[1].context.namespace.is_none());
        assert!(config.extra.contains_key("preferences"));
        assert_eq!(config.sources, vec![PathBuf::from("data/k8config.yaml")]);
    }

    #[test]
    fn test_config_ser() {
        //given
        let config = KubeConfig::from_file("data/k8config.yaml").expect("read");

        //when
        let serialized = serde_yaml::to_string(&config).expect("serialized");

        //then
        assert_eq!(
            serialized,
            r#"apiVersion: v1
clusters:
- name: kind-local
  cluster:
    certificate-authority: /home/test/.kube/kind-ca.crt
    server: https://127.0.0.1:6443
contexts:
- name: dev
  context:
    cluster: kind-local
    user: kind-user
    namespace: web
- name: prod
  context:
    cluster: kind-local
    user: kind-user
current-context: dev
kind: Config
users:
- name: kind-user
  user:
    client-certificate: /home/test/.kube/client.crt
    client-key: /home/test/.kube/client.key
preferences: {}
"#
        );
    }

    #[test]
    fn test_merge_singular_fields() {
        //given
        let first = test_config("one", &[("one", None)]);
        let second = test_config("two", &[("two", None)]);

        //when
        let merged = merge(first, second);

        //then: earlier file wins
        assert_eq!(merged.current_context, "one");
    }

    #[test]
    fn test_merge_fills_empty_singular_fields() {
        let first = test_config("", &[("one", None)]);
        let second = test_config("two", &[("two", None)]);

        let merged = merge(first, second);

        assert_eq!(merged.current_context, "two");
    }

    #[test]
    fn test_merge_contexts_first_seen_wins() {
        let first = test_config("shared", &[("shared", Some("ns1"))]);
        let second = test_config("shared", &[("shared", Some("ns2")), ("extra", None)]);

        let merged = merge(first, second);

        assert_eq!(merged.contexts.len(), 2);
        let shared = merged.context("shared").expect("shared");
        assert_eq!(shared.context.namespace.as_deref(), Some("ns1"));
        assert!(merged.context("extra").is_some());
        // the shared cluster/user entries dedupe as well
        assert_eq!(merged.clusters.len(), 1);
        assert_eq!(merged.users.len(), 1);
    }

    #[test]
    fn test_from_files_merges_in_order() {
        let config = KubeConfig::from_files(vec![
            PathBuf::from("data/k8config.yaml"),
            PathBuf::from("data/k8config_extra.yaml"),
        ])
        .expect("merge");

        assert_eq!(config.current_context, "dev");
        assert_eq!(config.contexts.len(), 3);
        assert!(config.context("staging").is_some());
        assert_eq!(config.clusters.len(), 2);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.write_target().unwrap().to_str().unwrap(), "data/k8config.yaml");
    }

    #[test]
    fn test_from_files_missing_file_fails() {
        let result = KubeConfig::from_files(vec![
            PathBuf::from("data/k8config.yaml"),
            PathBuf::from("data/no_such_file.yaml"),
        ]);

        assert!(matches!(result, Err(crate::ConfigError::Load { .. })));
    }

    #[test]
    fn test_config_files_from_env_value() {
        let value = join_paths(["/tmp/a", "/tmp/b"]).expect("join");
        let paths = KubeConfig::config_files_from(Some(&value)).expect("paths");
        assert_eq!(paths, vec![PathBuf::from("/tmp/a"), PathBuf::from("/tmp/b")]);
    }

    #[test]
    fn test_config_files_empty_value_falls_back_to_default() {
        let paths = KubeConfig::config_files_from(Some("".as_ref())).expect("paths");
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with(".kube/config"));
    }

    #[test]
    fn test_default_namespace_fallback() {
        let config = test_config("dev", &[("dev", None), ("prod", Some("")), ("qa", Some("qa-ns"))]);
        assert_eq!(config.context("dev").unwrap().context.namespace(), "default");
        assert_eq!(config.context("prod").unwrap().context.namespace(), "default");
        assert_eq!(config.context("qa").unwrap().context.namespace(), "qa-ns");
    }
}
