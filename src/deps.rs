// src/deps.rs

//! Dependency declarations and host-resolved metadata
//!
//! The recipe declares pinned dependencies; the host resolves them before
//! any lifecycle callback runs and hands back each dependency's include and
//! library directories. Resolved metadata can be loaded from a TOML file:
//!
//! ```toml
//! [[dependency]]
//! name = "nettle"
//! include_dirs = ["/opt/deps/nettle/include"]
//! lib_dirs = ["/opt/deps/nettle/lib"]
//! libs = ["nettle", "hogweed"]
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A pinned dependency declaration: name, version, and channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
    pub channel: String,
}

impl Dependency {
    pub fn new(name: &str, version: &str, channel: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            channel: channel.to_string(),
        }
    }

    /// Full reference string, e.g. `nettle/3.4.1@bincrafters/stable`.
    pub fn reference(&self) -> String {
        format!("{}/{}@{}", self.name, self.version, self.channel)
    }
}

/// What the host reports back after resolving a dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    pub name: String,
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub lib_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub libs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ResolvedSet {
    #[serde(default, rename = "dependency")]
    dependencies: Vec<ResolvedDependency>,
}

/// Load resolved dependency metadata from a TOML file.
pub fn load_resolved(path: &Path) -> Result<Vec<ResolvedDependency>> {
    let content = std::fs::read_to_string(path)?;
    let set: ResolvedSet = toml::from_str(&content)
        .map_err(|e| Error::Parse(format!("invalid dependency metadata: {e}")))?;
    Ok(set.dependencies)
}

/// The two maintained configuration profiles.
///
/// The base profile matches the original recipe (nettle + gmp, bundled
/// helper libraries, no IDN or PKCS#11 support). The extended profile adds
/// libiconv, libidn2, and p11-kit with the matching configure flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Base,
    Extended,
}

impl Profile {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Extended => "extended",
        }
    }

    /// The pinned dependency set this profile requires.
    pub fn dependencies(&self) -> Vec<Dependency> {
        let mut deps = vec![
            Dependency::new("nettle", "3.4.1", "bincrafters/stable"),
            Dependency::new("gmp", "6.1.2", "bincrafters/stable"),
        ];
        if *self == Self::Extended {
            deps.push(Dependency::new("libiconv", "1.15", "bincrafters/stable"));
            deps.push(Dependency::new("libidn2", "2.1.1", "bincrafters/stable"));
            deps.push(Dependency::new("p11-kit", "0.23.15", "bincrafters/stable"));
        }
        deps
    }

    /// Profile-specific configure flags. Both profiles prefer the bundled
    /// helper libraries over system-installed equivalents.
    pub fn configure_flags(&self) -> Vec<&'static str> {
        let mut flags = vec!["--with-included-libtasn1", "--with-included-unistring"];
        match self {
            Self::Base => {
                flags.push("--without-p11-kit");
                flags.push("--without-idn");
            }
            Self::Extended => {
                flags.push("--with-p11-kit");
                flags.push("--with-idn");
            }
        }
        flags
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "extended" => Ok(Self::Extended),
            _ => Err(Error::Parse(format!(
                "unknown profile: {s} (expected base or extended)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_reference() {
        let dep = Dependency::new("nettle", "3.4.1", "bincrafters/stable");
        assert_eq!(dep.reference(), "nettle/3.4.1@bincrafters/stable");
    }

    #[test]
    fn test_base_profile_pins() {
        let deps = Profile::Base.dependencies();
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["nettle", "gmp"]);
        assert_eq!(deps[0].version, "3.4.1");
        assert_eq!(deps[1].version, "6.1.2");
    }

    #[test]
    fn test_extended_profile_adds_helpers() {
        let deps = Profile::Extended.dependencies();
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["nettle", "gmp", "libiconv", "libidn2", "p11-kit"]);
    }

    #[test]
    fn test_profile_flags_differ() {
        let base = Profile::Base.configure_flags();
        assert!(base.contains(&"--without-p11-kit"));
        assert!(base.contains(&"--without-idn"));
        assert!(base.contains(&"--with-included-libtasn1"));

        let extended = Profile::Extended.configure_flags();
        assert!(extended.contains(&"--with-p11-kit"));
        assert!(extended.contains(&"--with-idn"));
        assert!(!extended.contains(&"--without-p11-kit"));
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!("base".parse::<Profile>().unwrap(), Profile::Base);
        assert_eq!("Extended".parse::<Profile>().unwrap(), Profile::Extended);
        assert!("full".parse::<Profile>().is_err());
    }

    #[test]
    fn test_load_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deps.toml");
        std::fs::write(
            &path,
            r#"
[[dependency]]
name = "nettle"
include_dirs = ["/opt/nettle/include"]
lib_dirs = ["/opt/nettle/lib"]
libs = ["nettle", "hogweed"]

[[dependency]]
name = "gmp"
include_dirs = ["/opt/gmp/include"]
lib_dirs = ["/opt/gmp/lib"]
libs = ["gmp"]
"#,
        )
        .unwrap();

        let resolved = load_resolved(&path).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].name, "nettle");
        assert_eq!(resolved[0].libs, ["nettle", "hogweed"]);
        assert_eq!(resolved[1].lib_dirs, [PathBuf::from("/opt/gmp/lib")]);
    }

    #[test]
    fn test_load_resolved_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deps.toml");
        std::fs::write(&path, "dependency = 3").unwrap();
        assert!(matches!(load_resolved(&path), Err(Error::Parse(_))));
    }
}
