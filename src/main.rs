// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gnutls_recipe::{
    cook, deps, GnuTlsRecipe, Options, Profile, RecipeContext, Settings,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gnutls-recipe")]
#[command(version)]
#[command(about = "Build and package GnuTLS from source", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: validate, fetch, build, package
    Cook {
        /// Build shared libraries instead of static ones
        #[arg(long)]
        shared: bool,

        /// Disable position-independent code (static builds only)
        #[arg(long)]
        no_fpic: bool,

        /// Configuration profile (base or extended)
        #[arg(long, default_value = "base")]
        profile: String,

        /// Resolved dependency metadata (TOML)
        #[arg(long)]
        deps: Option<PathBuf>,

        /// Working directory for configure/make
        #[arg(long, default_value = "build")]
        build_dir: PathBuf,

        /// Package output directory
        #[arg(long, default_value = "package")]
        package_dir: PathBuf,

        /// Override the source archive (URL or local path)
        #[arg(long, requires = "sha256")]
        source: Option<String>,

        /// SHA-256 digest of the overridden source archive
        #[arg(long)]
        sha256: Option<String>,

        /// Parallel build jobs (default: number of CPUs)
        #[arg(long)]
        jobs: Option<u32>,

        /// Target operating system (default: host)
        #[arg(long)]
        os: Option<String>,

        /// Toolchain (default: host)
        #[arg(long)]
        compiler: Option<String>,
    },
    /// Print the pinned dependency set for a profile
    Deps {
        /// Configuration profile (base or extended)
        #[arg(long, default_value = "base")]
        profile: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cook {
            shared,
            no_fpic,
            profile,
            deps: deps_file,
            build_dir,
            package_dir,
            source,
            sha256,
            jobs,
            os,
            compiler,
        } => {
            let profile: Profile = profile.parse()?;

            let mut settings = Settings::host();
            if let Some(os) = os {
                settings.os = os.parse()?;
            }
            if let Some(compiler) = compiler {
                settings.compiler = compiler.parse()?;
            }

            let options = Options {
                shared,
                fpic: !no_fpic,
            };

            let mut ctx = RecipeContext::new(settings, options, profile, build_dir, package_dir);
            if let Some(path) = deps_file {
                ctx.deps = deps::load_resolved(&path)
                    .with_context(|| format!("loading {}", path.display()))?;
            }
            if let Some(jobs) = jobs {
                ctx.jobs = jobs;
            }

            let mut recipe = GnuTlsRecipe::new();
            if let (Some(url), Some(digest)) = (source, sha256) {
                recipe = recipe.with_source(url, digest);
            }

            let report = cook(&recipe, &mut ctx)?;
            println!("package: {}", report.package_folder.display());
            for lib in &report.libs {
                println!("lib: {lib}");
            }
        }
        Commands::Deps { profile } => {
            let profile: Profile = profile.parse()?;
            for dep in profile.dependencies() {
                println!("{}", dep.reference());
            }
        }
    }

    Ok(())
}
