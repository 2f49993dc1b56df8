//! # adaptagrams_loader
//! Detects the platform of the running process and loads the packaged
//! adaptagrams native libraries into it, runtime-support libraries first.
//! ## Usage
//! A host calls [`Bootstrapper::load`] once during startup with the
//! [`InstallationRoot`](root::InstallationRoot) it was installed into and a
//! [`NativeLoader`](loader::NativeLoader). The returned
//! [`LoadedLibraries`](loader::LoadedLibraries) keeps every artifact resident
//! until it is dropped.
//! ## Layout
//! Artifacts are expected below the installation root at
//! `lib/<platform>/<artifact>`, where `<platform>` is one of `linux32`,
//! `linux64`, `win32`, `win64`, `osx32` and `osx64`.
//! ## Example
#![cfg_attr(feature = "native", doc = "```no_run")]
#![cfg_attr(not(feature = "native"), doc = "```ignore")]
//! use adaptagrams_loader::{bootstrap, root::DirRoot};
//!
//! let libs = bootstrap(&DirRoot::new("/opt/kieler")).unwrap();
//! for lib in &libs {
//!     println!("{} <- {}", lib.artifact(), lib.location().display());
//! }
//! ```
mod bootstrap;
pub mod error;
pub mod lifecycle;
pub mod loader;
mod macros;
pub mod manifest;
#[cfg(feature = "native")]
mod os;
pub mod platform;
pub mod root;

#[cfg(feature = "native")]
pub use bootstrap::bootstrap;
pub use bootstrap::Bootstrapper;
pub use error::Error;
pub use platform::{PlatformId, PlatformSignals};

/// A type alias for `Result`s which may return `adaptagrams_loader::Error`.
pub type Result<T> = core::result::Result<T, Error>;
