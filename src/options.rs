// src/options.rs

//! Recipe options and the shared/static link mode
//!
//! `shared` and `fPIC` are the two declared options, fixed once configuration
//! runs. The shared/static decision is modeled as the [`LinkMode`] variant so
//! that flag emission is owned by one place and the two modes can never both
//! be enabled.

use serde::{Deserialize, Serialize};

/// Declared options with their defaults: `shared=false`, `fpic=true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Build shared libraries instead of static ones.
    #[serde(default)]
    pub shared: bool,
    /// Build position-independent code. Ignored where not applicable
    /// (shared builds are PIC by construction).
    #[serde(default = "default_fpic")]
    pub fpic: bool,
}

fn default_fpic() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            shared: false,
            fpic: true,
        }
    }
}

impl Options {
    pub fn link_mode(&self) -> LinkMode {
        if self.shared {
            LinkMode::Shared
        } else {
            LinkMode::Static
        }
    }
}

/// Mutually exclusive linking modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    Shared,
    Static,
}

impl LinkMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Static => "static",
        }
    }

    /// The configure flag pair for this mode. Each mode enables itself and
    /// disables the other, so no argument list can carry both.
    pub const fn configure_flags(&self) -> [&'static str; 2] {
        match self {
            Self::Shared => ["--enable-shared", "--disable-static"],
            Self::Static => ["--disable-shared", "--enable-static"],
        }
    }
}
