use crate::error::Result;
use crate::locate::RepoRef;
use git2::build::RepoBuilder;
use git2::FetchOptions;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

/// A temporary working copy owned by one scoring run. The directory and
/// everything under it is removed when the value is dropped.
#[derive(Debug)]
pub struct Checkout {
    dir: TempDir,
}

impl Checkout {
    pub fn new(dir: TempDir) -> Self {
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for Checkout {
    fn drop(&mut self) {
        debug!(path = %self.dir.path().display(), "releasing checkout");
    }
}

pub trait CheckoutProvider: Send + Sync {
    fn checkout(&self, repo: &RepoRef) -> Result<Checkout>;
}

#[derive(Debug, Clone, Default)]
pub struct GitCheckout {
    parent: Option<PathBuf>,
}

impl GitCheckout {
    pub fn new(parent: Option<PathBuf>) -> Self {
        Self { parent }
    }

    fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("repotrust-");
        let dir = match &self.parent {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                builder.tempdir_in(parent)?
            }
            None => builder.tempdir()?,
        };
        Ok(dir)
    }
}

impl CheckoutProvider for GitCheckout {
    fn checkout(&self, repo: &RepoRef) -> Result<Checkout> {
        let dir = self.scratch_dir()?;
        let mut fetch = FetchOptions::new();
        fetch.depth(1);
        RepoBuilder::new()
            .fetch_options(fetch)
            .clone(&repo.clone_url(), dir.path())?;
        info!(repo = %repo, path = %dir.path().display(), "cloned checkout");
        Ok(Checkout::new(dir))
    }
}
