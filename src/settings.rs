// src/settings.rs

//! Build settings: target platform and toolchain
//!
//! Mirrors the settings surface the host package manager hands to a recipe:
//! operating system, architecture, compiler, and build type. The `libcxx`
//! field is the C++ runtime ABI selector; it is meaningless for a C library
//! and is cleared during configuration.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    Macos,
    Windows,
    FreeBsd,
}

impl Os {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Macos => "Macos",
            Self::Windows => "Windows",
            Self::FreeBsd => "FreeBSD",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Os {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::Macos),
            "windows" => Ok(Self::Windows),
            "freebsd" => Ok(Self::FreeBsd),
            _ => Err(Error::Parse(format!("unknown operating system: {s}"))),
        }
    }
}

/// Toolchain used for the build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compiler {
    Gcc,
    Clang,
    AppleClang,
    VisualStudio,
}

impl Compiler {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gcc => "gcc",
            Self::Clang => "clang",
            Self::AppleClang => "apple-clang",
            Self::VisualStudio => "Visual Studio",
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Compiler {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gcc" => Ok(Self::Gcc),
            "clang" => Ok(Self::Clang),
            "apple-clang" | "appleclang" => Ok(Self::AppleClang),
            "visual studio" | "visual-studio" | "msvc" => Ok(Self::VisualStudio),
            _ => Err(Error::Parse(format!("unknown compiler: {s}"))),
        }
    }
}

/// The full settings tuple for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub os: Os,
    pub arch: String,
    pub compiler: Compiler,
    pub build_type: String,
    /// C++ runtime ABI selector; not applicable to a C toolchain and
    /// removed by the configuration step.
    pub libcxx: Option<String>,
}

impl Settings {
    pub fn new(os: Os, compiler: Compiler) -> Self {
        Self {
            os,
            arch: std::env::consts::ARCH.to_string(),
            compiler,
            build_type: "Release".to_string(),
            libcxx: default_libcxx(compiler),
        }
    }

    /// Settings for the machine the recipe is running on.
    pub fn host() -> Self {
        let os = match std::env::consts::OS {
            "macos" => Os::Macos,
            "windows" => Os::Windows,
            "freebsd" => Os::FreeBsd,
            _ => Os::Linux,
        };
        let compiler = match os {
            Os::Macos => Compiler::AppleClang,
            Os::Windows => Compiler::VisualStudio,
            _ => Compiler::Gcc,
        };
        Self::new(os, compiler)
    }
}

fn default_libcxx(compiler: Compiler) -> Option<String> {
    match compiler {
        Compiler::Gcc => Some("libstdc++11".to_string()),
        Compiler::Clang => Some("libstdc++".to_string()),
        Compiler::AppleClang => Some("libc++".to_string()),
        // MSVC has no libcxx setting to begin with
        Compiler::VisualStudio => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_parse() {
        assert_eq!("linux".parse::<Os>().unwrap(), Os::Linux);
        assert_eq!("Macos".parse::<Os>().unwrap(), Os::Macos);
        assert_eq!("darwin".parse::<Os>().unwrap(), Os::Macos);
        assert_eq!("Windows".parse::<Os>().unwrap(), Os::Windows);
        assert!("plan9".parse::<Os>().is_err());
    }

    #[test]
    fn test_compiler_parse() {
        assert_eq!("gcc".parse::<Compiler>().unwrap(), Compiler::Gcc);
        assert_eq!("apple-clang".parse::<Compiler>().unwrap(), Compiler::AppleClang);
        assert_eq!("Visual Studio".parse::<Compiler>().unwrap(), Compiler::VisualStudio);
        assert_eq!("msvc".parse::<Compiler>().unwrap(), Compiler::VisualStudio);
        assert!("tcc".parse::<Compiler>().is_err());
    }

    #[test]
    fn test_new_fills_libcxx_for_gcc() {
        let settings = Settings::new(Os::Linux, Compiler::Gcc);
        assert_eq!(settings.libcxx.as_deref(), Some("libstdc++11"));
        assert_eq!(settings.build_type, "Release");
    }

    #[test]
    fn test_msvc_has_no_libcxx() {
        let settings = Settings::new(Os::Windows, Compiler::VisualStudio);
        assert!(settings.libcxx.is_none());
    }

    #[test]
    fn test_host_settings() {
        let settings = Settings::host();
        assert!(!settings.arch.is_empty());
    }
}
