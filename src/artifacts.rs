// src/artifacts.rs

//! Library artifact discovery for package_info
//!
//! After packaging, the host needs the link names of the libraries this
//! package produced. Scans `lib/` under the package folder and strips the
//! `lib` prefix and platform extension.

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Collect the link names of libraries under `<package_folder>/lib`.
///
/// `libgnutls.a`, `libgnutls.so`, `libgnutls.so.30`, and `libgnutls.dylib`
/// all report as `gnutls`. Names are deduplicated and sorted.
pub fn collect_libs(package_folder: &Path) -> Result<Vec<String>> {
    let lib_dir = package_folder.join("lib");
    let mut libs = Vec::new();

    if lib_dir.is_dir() {
        for entry in fs::read_dir(&lib_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name();
            if let Some(lib) = link_name(&name.to_string_lossy()) {
                libs.push(lib);
            }
        }
    }

    libs.sort();
    libs.dedup();
    Ok(libs)
}

fn link_name(filename: &str) -> Option<String> {
    let stem = filename.strip_prefix("lib")?;

    if let Some(name) = stem.strip_suffix(".a") {
        return Some(name.to_string());
    }
    if let Some(name) = stem.strip_suffix(".dylib") {
        return Some(name.to_string());
    }
    // Shared objects may carry a version suffix: libgnutls.so.30.23.2
    if let Some(pos) = stem.find(".so") {
        let rest = &stem[pos + 3..];
        if rest.is_empty() || rest.starts_with('.') {
            return Some(stem[..pos].to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_name() {
        assert_eq!(link_name("libgnutls.a").as_deref(), Some("gnutls"));
        assert_eq!(link_name("libgnutls.so").as_deref(), Some("gnutls"));
        assert_eq!(link_name("libgnutls.so.30").as_deref(), Some("gnutls"));
        assert_eq!(link_name("libgnutlsxx.dylib").as_deref(), Some("gnutlsxx"));
        assert_eq!(link_name("gnutls.pc"), None);
        assert_eq!(link_name("libgnutls.la"), None);
    }

    #[test]
    fn test_collect_libs_scans_lib_dir() {
        let dir = tempfile::tempdir().unwrap();
        let lib_dir = dir.path().join("lib");
        fs::create_dir_all(&lib_dir).unwrap();
        for name in ["libgnutls.a", "libgnutlsxx.a", "libgnutls.so.30", "pkgconfig"] {
            if name.contains('.') {
                fs::write(lib_dir.join(name), b"").unwrap();
            } else {
                fs::create_dir_all(lib_dir.join(name)).unwrap();
            }
        }

        let libs = collect_libs(dir.path()).unwrap();
        assert_eq!(libs, ["gnutls", "gnutlsxx"]);
    }

    #[test]
    fn test_collect_libs_empty_without_lib_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_libs(dir.path()).unwrap().is_empty());
    }
}
