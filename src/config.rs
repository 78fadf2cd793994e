use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::cli::{Backend, ConfigArgs};
use crate::repository::{LocalRepository, MenuRepository, RemoteRepository};

/// Runtime configuration, resolved from flags, environment and `Defaults`.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    pub api_url: String,
    pub restaurant_id: u64,
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub currency: String,
    pub log_file: PathBuf,
}

impl From<ConfigArgs> for Config {
    fn from(a: ConfigArgs) -> Self {
        Self {
            backend: a.backend,
            api_url: a.api_url,
            restaurant_id: a.restaurant_id,
            data_dir: a.data_dir,
            storage_key: a.storage_key,
            currency: a.currency,
            log_file: a.log_file,
        }
    }
}

impl Config {
    /// Build the one backend this run talks to.
    pub fn open_repository(&self) -> Result<Arc<dyn MenuRepository>> {
        match self.backend {
            Backend::Local => {
                let repo = LocalRepository::new(&self.data_dir, &self.storage_key);
                info!(path = %repo.path().display(), "using local store");
                Ok(Arc::new(repo))
            }
            Backend::Remote => {
                let repo = RemoteRepository::new(&self.api_url, self.restaurant_id)
                    .context("building HTTP client")?;
                info!(url = %self.api_url, restaurant_id = self.restaurant_id, "using REST API");
                Ok(Arc::new(repo))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use tempfile::TempDir;

    #[tokio::test]
    async fn local_backend_reads_from_the_configured_key() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("lunch.json"),
            r#"[{"id":1,"name":"Soup","description":"","price":9.0}]"#,
        )
        .unwrap();
        let data_dir = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["menu-manager", "--data-dir", data_dir, "--storage-key", "lunch"]).unwrap();

        let repo = Config::from(cli.config).open_repository().unwrap();
        let items = repo.list().await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Soup");
    }

    #[test]
    fn remote_backend_builds() {
        let cli = Cli::try_parse_from(["menu-manager", "--backend", "remote", "--api-url", "http://127.0.0.1:1/"]).unwrap();
        assert!(Config::from(cli.config).open_repository().is_ok());
    }
}
