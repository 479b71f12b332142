// src/recipe/gnutls.rs

//! The GnuTLS packaging recipe
//!
//! Package identity, the pinned upstream archive, and the five lifecycle
//! callbacks the host invokes in order: `configure`, `source`, `build`,
//! `package`, `package_info`. No TLS logic lives here; the recipe only
//! orchestrates the upstream autotools build.

use crate::checksum::Sha256Digest;
use crate::error::{Error, Result};
use crate::recipe::context::RecipeContext;
use crate::settings::{Compiler, Os};
use crate::source::SourceFetcher;
use crate::{artifacts, deps::Dependency};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

pub const NAME: &str = "gnutls";
pub const VERSION: &str = "3.6.8";
pub const DESCRIPTION: &str =
    "A secure communications library implementing the SSL, TLS and DTLS protocols";
pub const HOMEPAGE: &str = "https://www.gnutls.org";
pub const LICENSE: &str = "LGPL-2.1";

const SOURCE_URL_BASE: &str = "https://www.gnupg.org/ftp/gcrypt/gnutls";
const SOURCE_SHA256: &str = "aa81944e5635de981171772857e72be231a7e0f559ae0292d2737de475383e83";

pub struct GnuTlsRecipe {
    version: String,
    source_url: Option<String>,
    sha256: String,
}

impl Default for GnuTlsRecipe {
    fn default() -> Self {
        Self::new()
    }
}

impl GnuTlsRecipe {
    pub fn new() -> Self {
        Self {
            version: VERSION.to_string(),
            source_url: None,
            sha256: SOURCE_SHA256.to_string(),
        }
    }

    /// Override the source archive location and digest. Lets a host point
    /// at a mirror or a pre-fetched local archive.
    pub fn with_source(mut self, url: impl Into<String>, sha256: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self.sha256 = sha256.into();
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The pinned dependency set for the context's profile.
    pub fn requires(&self, ctx: &RecipeContext) -> Vec<Dependency> {
        ctx.profile.dependencies()
    }

    fn source_url(&self) -> String {
        match &self.source_url {
            Some(url) => url.clone(),
            None => format!(
                "{}/v3.6/{}-{}.tar.xz",
                SOURCE_URL_BASE, NAME, self.version
            ),
        }
    }

    /// Validate the platform/toolchain pairing and normalize settings.
    ///
    /// Runs before any filesystem or network work. GnuTLS cannot be built
    /// with Visual Studio, and the C++ runtime ABI selector does not apply
    /// to a C library.
    pub fn configure(&self, ctx: &mut RecipeContext) -> Result<()> {
        if ctx.settings.os == Os::Windows && ctx.settings.compiler == Compiler::VisualStudio {
            return Err(Error::InvalidConfiguration(
                "gnutls cannot be built with Visual Studio".to_string(),
            ));
        }
        ctx.settings.libcxx = None;
        debug!(
            "Configured for {} / {}",
            ctx.settings.os, ctx.settings.compiler
        );
        Ok(())
    }

    /// Fetch the upstream archive, verify its digest, and unpack it to the
    /// canonical source subfolder.
    pub fn source(&self, ctx: &RecipeContext) -> Result<PathBuf> {
        let digest: Sha256Digest = self.sha256.parse()?;
        let url = self.source_url();
        info!("Fetching {} {} from {}", NAME, self.version, url);

        fs::create_dir_all(&ctx.build_folder)?;
        let fetcher = SourceFetcher::new(ctx.source_cache.clone());
        let archive = fetcher.fetch(&url, &digest)?;
        fetcher.unpack(
            &archive,
            &ctx.build_folder,
            &format!("{}-{}", NAME, self.version),
        )
    }

    /// Configure and compile, reusing the memoized build environment.
    pub fn build(&self, ctx: &mut RecipeContext) -> Result<()> {
        let source_dir = ctx.source_folder();
        let build_dir = ctx.build_folder.clone();
        let jobs = ctx.jobs;

        let env = ctx.autotools();
        env.configure(&source_dir, &build_dir)?;
        env.make(&build_dir, jobs)
    }

    /// Stage the build output into the package layout: license first, then
    /// `make install`, then drop the `share/` tree downstream consumers
    /// never need.
    pub fn package(&self, ctx: &mut RecipeContext) -> Result<()> {
        let licenses = ctx.package_folder.join("licenses");
        fs::create_dir_all(&licenses)?;
        fs::copy(
            ctx.source_folder().join("COPYING"),
            licenses.join("COPYING"),
        )?;

        let build_dir = ctx.build_folder.clone();
        ctx.autotools().install(&build_dir)?;

        let share = ctx.package_folder.join("share");
        if share.is_dir() {
            fs::remove_dir_all(&share)?;
        }
        Ok(())
    }

    /// Report the libraries this package produced for downstream linking.
    pub fn package_info(&self, ctx: &RecipeContext) -> Result<Vec<String>> {
        artifacts::collect_libs(&ctx.package_folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::Profile;
    use crate::options::Options;
    use crate::settings::Settings;

    fn context(os: Os, compiler: Compiler) -> RecipeContext {
        RecipeContext::new(
            Settings::new(os, compiler),
            Options::default(),
            Profile::Base,
            "/tmp/build",
            "/tmp/package",
        )
    }

    #[test]
    fn test_configure_accepts_supported_pairs() {
        let recipe = GnuTlsRecipe::new();
        for (os, compiler) in [
            (Os::Linux, Compiler::Gcc),
            (Os::Linux, Compiler::Clang),
            (Os::Macos, Compiler::AppleClang),
            (Os::FreeBsd, Compiler::Clang),
            (Os::Windows, Compiler::Gcc), // mingw is fine
        ] {
            let mut ctx = context(os, compiler);
            assert!(recipe.configure(&mut ctx).is_ok(), "{os} / {compiler}");
        }
    }

    #[test]
    fn test_configure_rejects_visual_studio_on_windows() {
        let recipe = GnuTlsRecipe::new();
        let mut ctx = context(Os::Windows, Compiler::VisualStudio);
        let err = recipe.configure(&mut ctx).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_configure_clears_libcxx() {
        let recipe = GnuTlsRecipe::new();
        let mut ctx = context(Os::Linux, Compiler::Gcc);
        assert!(ctx.settings.libcxx.is_some());
        recipe.configure(&mut ctx).unwrap();
        assert!(ctx.settings.libcxx.is_none());
    }

    #[test]
    fn test_default_source_url_is_version_templated() {
        let recipe = GnuTlsRecipe::new();
        assert_eq!(
            recipe.source_url(),
            "https://www.gnupg.org/ftp/gcrypt/gnutls/v3.6/gnutls-3.6.8.tar.xz"
        );
    }

    #[test]
    fn test_with_source_overrides_url() {
        let recipe = GnuTlsRecipe::new().with_source("/tmp/gnutls.tar.xz", "ab".repeat(32));
        assert_eq!(recipe.source_url(), "/tmp/gnutls.tar.xz");
    }

    #[test]
    fn test_source_rejects_malformed_digest() {
        let recipe = GnuTlsRecipe::new().with_source("/tmp/gnutls.tar.xz", "not-a-digest");
        let ctx = context(Os::Linux, Compiler::Gcc);
        assert!(matches!(recipe.source(&ctx), Err(Error::Parse(_))));
    }

    #[test]
    fn test_requires_follows_profile() {
        let recipe = GnuTlsRecipe::new();
        let ctx = context(Os::Linux, Compiler::Gcc);
        let refs: Vec<String> = recipe.requires(&ctx).iter().map(|d| d.reference()).collect();
        assert_eq!(
            refs,
            [
                "nettle/3.4.1@bincrafters/stable",
                "gmp/6.1.2@bincrafters/stable"
            ]
        );
    }
}
