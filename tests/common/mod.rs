#![allow(dead_code)]

use adaptagrams_loader::{
    error::{LoadError, load_error},
    loader::NativeLoader,
    root::InstallationRoot,
};
use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
};

pub const PREFIX: &str = "/opt/kieler";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Resolve(String),
    Load(PathBuf),
    Release(PathBuf),
}

/// A shared, ordered record of every call made to the fakes below.
pub type Calls = Rc<RefCell<Vec<Call>>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn location(path: &str) -> PathBuf {
    Path::new(PREFIX).join(path)
}

/// Resolves everything below [`PREFIX`] except the paths in `missing`.
pub struct RecordingRoot {
    calls: Calls,
    missing: Vec<String>,
}

impl RecordingRoot {
    pub fn new(calls: &Calls) -> Self {
        Self {
            calls: calls.clone(),
            missing: Vec::new(),
        }
    }

    pub fn missing(mut self, path: &str) -> Self {
        self.missing.push(path.to_owned());
        self
    }
}

impl InstallationRoot for RecordingRoot {
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        self.calls.borrow_mut().push(Call::Resolve(path.to_owned()));
        if self.missing.iter().any(|m| m == path) {
            return None;
        }
        Some(location(path))
    }
}

/// Records loads and hands out handles that record their release.
pub struct RecordingLoader {
    calls: Calls,
    rejected: Vec<PathBuf>,
}

impl RecordingLoader {
    pub fn new(calls: &Calls) -> Self {
        Self {
            calls: calls.clone(),
            rejected: Vec::new(),
        }
    }

    pub fn reject(mut self, path: &str) -> Self {
        self.rejected.push(location(path));
        self
    }
}

pub struct Handle {
    location: PathBuf,
    calls: Calls,
}

impl Handle {
    pub fn location(&self) -> &Path {
        &self.location
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.calls
            .borrow_mut()
            .push(Call::Release(self.location.clone()));
    }
}

impl NativeLoader for RecordingLoader {
    type Library = Handle;

    fn load(&mut self, location: &Path) -> Result<Handle, LoadError> {
        self.calls
            .borrow_mut()
            .push(Call::Load(location.to_path_buf()));
        if self.rejected.iter().any(|r| r == location) {
            return Err(load_error("invalid ELF header"));
        }
        Ok(Handle {
            location: location.to_path_buf(),
            calls: self.calls.clone(),
        })
    }
}

pub fn resolves(calls: &Calls) -> Vec<String> {
    calls
        .borrow()
        .iter()
        .filter_map(|call| match call {
            Call::Resolve(path) => Some(path.clone()),
            _ => None,
        })
        .collect()
}

pub fn loads(calls: &Calls) -> Vec<PathBuf> {
    calls
        .borrow()
        .iter()
        .filter_map(|call| match call {
            Call::Load(location) => Some(location.clone()),
            _ => None,
        })
        .collect()
}
