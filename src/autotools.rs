// src/autotools.rs

//! Composed autotools build environment and external-tool driver
//!
//! Translates the declared options, the selected profile, and the resolved
//! dependency metadata into the argument list and environment variables for
//! the upstream `configure` script, then drives configure/make/install as
//! blocking subprocesses. Any non-zero exit is fatal and carries the tool's
//! stderr.

use crate::deps::{Profile, ResolvedDependency};
use crate::error::{Error, Result};
use crate::options::{LinkMode, Options};
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// The composed build environment for one invocation.
///
/// Composed at most once per [`RecipeContext`](crate::RecipeContext) and
/// reused for every subsequent lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutotoolsEnv {
    configure_args: Vec<String>,
    vars: BTreeMap<String, String>,
}

impl AutotoolsEnv {
    /// Build the argument list and variable overlay.
    ///
    /// The shared/static flag pair comes from [`LinkMode`], so the two modes
    /// stay mutually exclusive regardless of the option combination.
    pub fn compose(
        options: &Options,
        profile: Profile,
        deps: &[ResolvedDependency],
        prefix: &Path,
    ) -> Self {
        let mode = options.link_mode();

        let mut configure_args = vec!["--disable-tests".to_string()];
        configure_args.extend(profile.configure_flags().iter().map(|f| f.to_string()));
        configure_args.extend(mode.configure_flags().iter().map(|f| f.to_string()));
        if options.fpic && mode == LinkMode::Static {
            configure_args.push("--with-pic".to_string());
        }
        configure_args.push(format!("--prefix={}", prefix.display()));

        let mut vars = BTreeMap::new();

        let cppflags: Vec<String> = deps
            .iter()
            .flat_map(|d| d.include_dirs.iter())
            .map(|dir| format!("-I{}", dir.display()))
            .collect();
        if !cppflags.is_empty() {
            vars.insert("CPPFLAGS".to_string(), cppflags.join(" "));
        }

        let ldflags: Vec<String> = deps
            .iter()
            .flat_map(|d| d.lib_dirs.iter())
            .map(|dir| format!("-L{}", dir.display()))
            .collect();
        if !ldflags.is_empty() {
            vars.insert("LDFLAGS".to_string(), ldflags.join(" "));
        }

        let libs: Vec<String> = deps
            .iter()
            .flat_map(|d| d.libs.iter())
            .map(|lib| format!("-l{lib}"))
            .collect();
        if !libs.is_empty() {
            vars.insert("LIBS".to_string(), libs.join(" "));
        }

        Self {
            configure_args,
            vars,
        }
    }

    pub fn configure_args(&self) -> &[String] {
        &self.configure_args
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Run the upstream configure script from `build_dir`.
    pub fn configure(&self, source_dir: &Path, build_dir: &Path) -> Result<()> {
        let script = source_dir.join("configure");
        let command = format!("{} {}", script.display(), self.configure_args.join(" "));
        self.run_step("configure", &command, build_dir)
    }

    /// Run the compile step.
    pub fn make(&self, build_dir: &Path, jobs: u32) -> Result<()> {
        self.run_step("make", &format!("make -j{jobs}"), build_dir)
    }

    /// Run the install step. The install prefix was fixed at configure time,
    /// so this stages straight into the package folder.
    pub fn install(&self, build_dir: &Path) -> Result<()> {
        self.run_step("install", "make install", build_dir)
    }

    fn run_step(&self, step: &str, command: &str, cwd: &Path) -> Result<()> {
        info!("Running {} step", step);
        debug!("Command: {}", command);

        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .envs(&self.vars)
            .output()
            .map_err(|e| Error::Tool {
                step: step.to_string(),
                code: None,
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Tool {
                step: step.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}
