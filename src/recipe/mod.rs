// src/recipe/mod.rs

//! Recipe lifecycle for building and packaging GnuTLS from source
//!
//! The host package manager drives a recipe through fixed-name callbacks,
//! always in the same order:
//!
//! 1. `configure` — reject unsupported platform/toolchain pairs, normalize
//!    settings. Fails before any expensive work.
//! 2. `source` — download the pinned upstream tarball, verify its SHA-256,
//!    unpack it to the canonical source subfolder.
//! 3. `build` — compose the autotools environment (once, memoized on the
//!    invocation context) and run configure + make.
//! 4. `package` — stage the license, run make install into the package
//!    folder, strip install-time cruft.
//! 5. `package_info` — report the produced libraries for downstream linking.
//!
//! Every stage failure is fatal and halts the pipeline; there are no
//! retries and no fallback between shared and static linking.

mod context;
mod gnutls;

pub use context::RecipeContext;
pub use gnutls::{GnuTlsRecipe, DESCRIPTION, HOMEPAGE, LICENSE, NAME, VERSION};

use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

/// Outcome of a full pipeline run.
#[derive(Debug)]
pub struct CookReport {
    /// Final package layout: binaries, headers, licenses.
    pub package_folder: PathBuf,
    /// Link names of the libraries the package produced.
    pub libs: Vec<String>,
}

/// Run the whole pipeline: validate, fetch, build, package, export.
pub fn cook(recipe: &GnuTlsRecipe, ctx: &mut RecipeContext) -> Result<CookReport> {
    info!("Cooking {} {}", NAME, recipe.version());

    recipe.configure(ctx)?;

    info!("Fetching source...");
    recipe.source(ctx)?;

    info!("Building...");
    recipe.build(ctx)?;

    info!("Packaging...");
    recipe.package(ctx)?;

    let libs = recipe.package_info(ctx)?;
    info!(
        "Packaged {} to {} (libs: {})",
        NAME,
        ctx.package_folder.display(),
        libs.join(", ")
    );

    Ok(CookReport {
        package_folder: ctx.package_folder.clone(),
        libs,
    })
}
