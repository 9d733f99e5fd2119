//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Release build, optionally loaded from a remote URL (--release[=URL]).
pub fn release_arg() -> Arg {
    Arg::new("release")
        .long("release")
        .value_name("URL")
        .num_args(0..=1)
        .require_equals(true)
        .default_missing_value("")
        .help("Build in release mode; with a URL, load the library from there")
}

/// Output directory for the generated module (-o/--out-dir).
pub fn out_dir_arg() -> Arg {
    Arg::new("out_dir")
        .short('o')
        .long("out-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .default_value("bindings")
        .help("Directory to write bindings.ts into")
}

/// Output file (-o/--output). Stdout when absent.
pub fn out_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write to FILE instead of stdout")
}

/// Defer library loading to an exported `load()` (--lazy-init).
pub fn lazy_init_arg() -> Arg {
    Arg::new("lazy_init")
        .long("lazy-init")
        .action(ArgAction::SetTrue)
        .help("Load the library from an exported load() instead of at import time")
}

/// Skip the cargo build (--no-build).
pub fn no_build_arg() -> Arg {
    Arg::new("no_build")
        .long("no-build")
        .action(ArgAction::SetTrue)
        .help("Use the metadata already on disk instead of building")
}

/// External formatter for the generated module (--formatter).
pub fn formatter_arg() -> Arg {
    Arg::new("formatter")
        .long("formatter")
        .value_name("FORMATTER")
        .default_value("deno")
        .value_parser(["deno", "dprint", "none"])
        .help("Formatter to run over the output")
}

/// Extra arguments forwarded to cargo (after `--`).
pub fn cargo_args_arg() -> Arg {
    Arg::new("cargo_args")
        .value_name("CARGO_ARGS")
        .num_args(0..)
        .last(true)
        .allow_hyphen_values(true)
        .help("Extra arguments passed to cargo build")
}

/// Metadata file to render (positional).
pub fn metadata_path_arg() -> Arg {
    Arg::new("metadata")
        .value_name("METADATA")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Metadata file written by the native build")
}

/// Library package name (positional).
pub fn name_arg() -> Arg {
    Arg::new("name")
        .value_name("NAME")
        .required(true)
        .help("Library package name")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Verbosity level (-v for info, -vv for debug)")
}
