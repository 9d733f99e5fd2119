//! Dynamic library file names per platform, and the cache policy.
//!
//! The naming scheme is data: adding a platform means adding a table row.

use ffiglue_core::{LibraryLocation, Profile};

/// File name suffix for one CPU architecture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchEntry {
    pub arch: &'static str,
    pub suffix: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlatformEntry {
    /// Key the loader uses for this platform.
    pub os: &'static str,
    /// `std::env::consts::OS` value for the same platform.
    pub rust_os: &'static str,
    pub prefix: &'static str,
    pub extension: &'static str,
    /// Per-architecture names, used for remote locations only.
    pub arches: &'static [ArchEntry],
}

pub static PLATFORMS: &[PlatformEntry] = &[
    PlatformEntry {
        os: "darwin",
        rust_os: "macos",
        prefix: "lib",
        extension: "dylib",
        arches: &[
            ArchEntry {
                arch: "aarch64",
                suffix: "_arm64",
            },
            ArchEntry {
                arch: "x86_64",
                suffix: "",
            },
        ],
    },
    PlatformEntry {
        os: "linux",
        rust_os: "linux",
        prefix: "lib",
        extension: "so",
        arches: &[],
    },
    PlatformEntry {
        os: "windows",
        rust_os: "windows",
        prefix: "",
        extension: "dll",
        arches: &[],
    },
];

/// Whether the loader may keep a downloaded copy of the library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    #[default]
    None,
    Store,
}

impl CachePolicy {
    /// Only a trusted release, a remote location built in release mode, is cached.
    pub fn for_location(location: &LibraryLocation, profile: Profile) -> Self {
        match (location, profile) {
            (LibraryLocation::Remote(_), Profile::Release) => CachePolicy::Store,
            _ => CachePolicy::None,
        }
    }

    pub fn ts(self) -> &'static str {
        match self {
            CachePolicy::None => "CachePolicy.NONE",
            CachePolicy::Store => "CachePolicy.STORE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileName {
    Single(String),
    /// `(arch, file name)` pairs.
    PerArch(Vec<(&'static str, String)>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformFile {
    pub os: &'static str,
    pub file: FileName,
}

/// Everything the emitted loader needs to find the library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLibrary {
    pub base: String,
    pub files: Vec<PlatformFile>,
    pub policy: CachePolicy,
}

#[derive(Clone, Debug)]
pub struct LibraryLocator {
    platforms: &'static [PlatformEntry],
}

impl Default for LibraryLocator {
    fn default() -> Self {
        Self::new(PLATFORMS)
    }
}

impl LibraryLocator {
    pub fn new(platforms: &'static [PlatformEntry]) -> Self {
        Self { platforms }
    }

    pub fn platforms(&self) -> &'static [PlatformEntry] {
        self.platforms
    }

    pub fn locate(
        &self,
        package: &str,
        location: &LibraryLocation,
        profile: Profile,
    ) -> ResolvedLibrary {
        let files = self
            .platforms
            .iter()
            .map(|p| {
                let file = if location.is_remote() && !p.arches.is_empty() {
                    FileName::PerArch(
                        p.arches
                            .iter()
                            .map(|a| (a.arch, file_name(p, package, a.suffix)))
                            .collect(),
                    )
                } else {
                    FileName::Single(file_name(p, package, ""))
                };
                PlatformFile { os: p.os, file }
            })
            .collect();

        ResolvedLibrary {
            base: location.base().to_string(),
            files,
            policy: CachePolicy::for_location(location, profile),
        }
    }

    /// File name a local build produces for `rust_os`.
    pub fn local_file_name(&self, package: &str, rust_os: &str) -> Option<String> {
        self.platforms
            .iter()
            .find(|p| p.rust_os == rust_os)
            .map(|p| file_name(p, package, ""))
    }

    /// File name a local build produces on the running host.
    pub fn host_file_name(&self, package: &str) -> Option<String> {
        self.local_file_name(package, std::env::consts::OS)
    }
}

fn file_name(platform: &PlatformEntry, package: &str, suffix: &str) -> String {
    format!(
        "{}{}{}.{}",
        platform.prefix, package, suffix, platform.extension
    )
}
