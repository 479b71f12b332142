// src/lib.rs

//! GnuTLS packaging recipe
//!
//! Build orchestration for the GnuTLS secure-communications library: this
//! crate contains no TLS or cryptographic logic of its own. It validates the
//! build configuration, fetches and verifies the pinned upstream tarball,
//! composes an autotools build environment from the declared options and
//! host-resolved dependencies, drives configure/make/install, and reports
//! the packaged libraries to downstream consumers.
//!
//! # Pipeline
//!
//! Validate → Fetch → Compose (once, memoized) → Build → Package → Export.
//! Strictly sequential and blocking; the first failure halts the run.

pub mod artifacts;
pub mod autotools;
pub mod checksum;
pub mod deps;
mod error;
pub mod options;
pub mod recipe;
pub mod settings;
pub mod source;

pub use autotools::AutotoolsEnv;
pub use checksum::Sha256Digest;
pub use deps::{Dependency, Profile, ResolvedDependency};
pub use error::{Error, Result};
pub use options::{LinkMode, Options};
pub use recipe::{cook, CookReport, GnuTlsRecipe, RecipeContext};
pub use settings::{Compiler, Os, Settings};
pub use source::{SourceFetcher, SOURCE_SUBFOLDER};
