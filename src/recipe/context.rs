// src/recipe/context.rs

//! Per-invocation recipe state
//!
//! One [`RecipeContext`] lives for exactly one packaging run: settings,
//! options, resolved dependencies, and the working folders the host assigned.
//! The composed autotools environment is an explicit memoized field rather
//! than a global: absent until first use, computed once, then shared by the
//! build and package steps so both see identical configuration.

use crate::autotools::AutotoolsEnv;
use crate::deps::{Profile, ResolvedDependency};
use crate::options::Options;
use crate::settings::Settings;
use crate::source::SOURCE_SUBFOLDER;
use std::path::PathBuf;

pub struct RecipeContext {
    pub settings: Settings,
    pub options: Options,
    pub profile: Profile,
    /// Dependency metadata the host resolved before our callbacks ran.
    pub deps: Vec<ResolvedDependency>,
    /// Working directory for configure/make; the source subfolder lives here.
    pub build_folder: PathBuf,
    /// Install prefix and final package layout.
    pub package_folder: PathBuf,
    /// Download cache for fetched archives.
    pub source_cache: PathBuf,
    pub jobs: u32,
    autotools: Option<AutotoolsEnv>,
}

impl RecipeContext {
    pub fn new(
        settings: Settings,
        options: Options,
        profile: Profile,
        build_folder: impl Into<PathBuf>,
        package_folder: impl Into<PathBuf>,
    ) -> Self {
        let build_folder = build_folder.into();
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        Self {
            settings,
            options,
            profile,
            deps: Vec::new(),
            source_cache: build_folder.join("cache"),
            build_folder,
            package_folder: package_folder.into(),
            jobs,
            autotools: None,
        }
    }

    /// Where the unpacked upstream tree resides after the source step.
    pub fn source_folder(&self) -> PathBuf {
        self.build_folder.join(SOURCE_SUBFOLDER)
    }

    /// The composed build environment, created on first access and reused
    /// for every later lifecycle call in this invocation.
    pub fn autotools(&mut self) -> &AutotoolsEnv {
        let options = self.options;
        let profile = self.profile;
        let deps = &self.deps;
        let package_folder = &self.package_folder;
        self.autotools
            .get_or_insert_with(|| AutotoolsEnv::compose(&options, profile, deps, package_folder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Compiler, Os};

    fn context() -> RecipeContext {
        RecipeContext::new(
            Settings::new(Os::Linux, Compiler::Gcc),
            Options::default(),
            Profile::Base,
            "/tmp/build",
            "/tmp/package",
        )
    }

    #[test]
    fn test_source_folder_under_build_folder() {
        let ctx = context();
        assert_eq!(
            ctx.source_folder(),
            PathBuf::from("/tmp/build/source_subfolder")
        );
    }

    #[test]
    fn test_autotools_is_memoized_by_identity() {
        let mut ctx = context();
        let first = ctx.autotools() as *const AutotoolsEnv;
        let second = ctx.autotools() as *const AutotoolsEnv;
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_autotools_reads_deps_present_at_first_use() {
        let mut ctx = context();
        ctx.deps.push(ResolvedDependency {
            name: "nettle".to_string(),
            include_dirs: vec![PathBuf::from("/opt/nettle/include")],
            lib_dirs: vec![],
            libs: vec![],
        });

        let env = ctx.autotools();
        assert!(env.vars().contains_key("CPPFLAGS"));
    }

    #[test]
    fn test_default_jobs_positive() {
        assert!(context().jobs > 0);
    }
}
