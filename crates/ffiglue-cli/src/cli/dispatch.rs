//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls that turn `--release[=URL]` into a profile and a library location

use std::path::PathBuf;

use clap::ArgMatches;
use ffiglue_core::{LibraryLocation, Profile};

use super::FormatterChoice;
use crate::commands::emit::EmitArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::locate::LocateArgs;

pub struct GenerateParams {
    /// `None` for debug, `Some("")` for a local release, `Some(url)` for a remote one.
    pub release: Option<String>,
    pub out_dir: PathBuf,
    pub lazy_init: bool,
    pub no_build: bool,
    pub formatter: FormatterChoice,
    pub cargo_args: Vec<String>,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            release: m.get_one::<String>("release").cloned(),
            out_dir: m
                .get_one::<PathBuf>("out_dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("bindings")),
            lazy_init: m.get_flag("lazy_init"),
            no_build: m.get_flag("no_build"),
            formatter: parse_formatter(m),
            cargo_args: m
                .get_many::<String>("cargo_args")
                .map(|vals| vals.cloned().collect())
                .unwrap_or_default(),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        let (profile, location) = target(p.release.as_deref());
        Self {
            profile,
            location,
            out_dir: p.out_dir,
            lazy_init: p.lazy_init,
            build: !p.no_build,
            formatter: p.formatter,
            cargo_args: p.cargo_args,
        }
    }
}

pub struct EmitParams {
    pub metadata: PathBuf,
    pub release: Option<String>,
    pub output: Option<PathBuf>,
    pub lazy_init: bool,
}

impl EmitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            metadata: m
                .get_one::<PathBuf>("metadata")
                .cloned()
                .unwrap_or_default(),
            release: m.get_one::<String>("release").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            lazy_init: m.get_flag("lazy_init"),
        }
    }
}

impl From<EmitParams> for EmitArgs {
    fn from(p: EmitParams) -> Self {
        let (profile, location) = target(p.release.as_deref());
        Self {
            metadata: p.metadata,
            profile,
            location,
            output: p.output,
            lazy_init: p.lazy_init,
        }
    }
}

pub struct LocateParams {
    pub name: String,
    pub release: Option<String>,
    pub json: bool,
}

impl LocateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            name: m.get_one::<String>("name").cloned().unwrap_or_default(),
            release: m.get_one::<String>("release").cloned(),
            json: m.get_flag("json"),
        }
    }
}

impl From<LocateParams> for LocateArgs {
    fn from(p: LocateParams) -> Self {
        let (profile, location) = target(p.release.as_deref());
        Self {
            name: p.name,
            profile,
            location,
            json: p.json,
        }
    }
}

/// Build profile and library location for a `--release` value.
pub fn target(release: Option<&str>) -> (Profile, LibraryLocation) {
    match release {
        None => (Profile::Debug, LibraryLocation::target_dir(Profile::Debug)),
        Some("") => (
            Profile::Release,
            LibraryLocation::target_dir(Profile::Release),
        ),
        Some(url) => (Profile::Release, LibraryLocation::Remote(url.to_string())),
    }
}

fn parse_formatter(m: &ArgMatches) -> FormatterChoice {
    match m.get_one::<String>("formatter").map(|s| s.as_str()) {
        Some("dprint") => FormatterChoice::Dprint,
        Some("none") => FormatterChoice::None,
        _ => FormatterChoice::Deno,
    }
}
