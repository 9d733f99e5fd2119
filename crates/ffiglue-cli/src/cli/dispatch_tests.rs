//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. `--release[=URL]` maps to the right profile and library location
//! 2. Cargo arguments after `--` are forwarded verbatim
//! 3. Params extraction: defaults and flags land in the right fields

use std::path::PathBuf;

use ffiglue_core::{LibraryLocation, Profile};

use super::*;
use crate::cli::commands::{emit_command, generate_command, locate_command};
use crate::commands::emit::EmitArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::locate::LocateArgs;

fn generate_args(argv: &[&str]) -> GenerateArgs {
    let m = generate_command().try_get_matches_from(argv).unwrap();
    GenerateParams::from_matches(&m).into()
}

#[test]
fn generate_defaults() {
    let args = generate_args(&["generate"]);

    assert_eq!(args.profile, Profile::Debug);
    assert_eq!(args.location, LibraryLocation::Local("../target/debug".into()));
    assert_eq!(args.out_dir, PathBuf::from("bindings"));
    assert!(args.build);
    assert!(!args.lazy_init);
    assert!(!args.trusted());
    assert_eq!(args.formatter, FormatterChoice::Deno);
    assert!(args.cargo_args.is_empty());
}

#[test]
fn bare_release_flag_is_local() {
    let args = generate_args(&["generate", "--release"]);

    assert_eq!(args.profile, Profile::Release);
    assert_eq!(args.location, LibraryLocation::Local("../target/release".into()));
    assert!(!args.trusted());
}

#[test]
fn release_url_is_trusted_remote() {
    let args = generate_args(&["generate", "--release=https://example.com/v1"]);

    assert_eq!(args.profile, Profile::Release);
    assert_eq!(
        args.location,
        LibraryLocation::Remote("https://example.com/v1".into())
    );
    assert!(args.trusted());
}

#[test]
fn release_does_not_swallow_next_arg() {
    let args = generate_args(&["generate", "--release", "--lazy-init"]);

    assert_eq!(args.profile, Profile::Release);
    assert!(args.lazy_init);
}

#[test]
fn cargo_args_after_separator() {
    let args = generate_args(&[
        "generate",
        "--no-build",
        "--formatter",
        "none",
        "-o",
        "out",
        "--",
        "--features",
        "ffi",
        "-p",
        "add",
    ]);

    assert!(!args.build);
    assert_eq!(args.formatter, FormatterChoice::None);
    assert_eq!(args.out_dir, PathBuf::from("out"));
    assert_eq!(args.cargo_args, ["--features", "ffi", "-p", "add"]);
}

#[test]
fn unknown_formatter_rejected() {
    let result = generate_command().try_get_matches_from(["generate", "--formatter", "prettier"]);

    assert!(result.is_err());
}

#[test]
fn emit_params() {
    let m = emit_command()
        .try_get_matches_from(["emit", "bindings.json", "-o", "out.ts", "--release"])
        .unwrap();

    let args: EmitArgs = EmitParams::from_matches(&m).into();

    assert_eq!(args.metadata, PathBuf::from("bindings.json"));
    assert_eq!(args.output, Some(PathBuf::from("out.ts")));
    assert_eq!(args.profile, Profile::Release);
    assert!(!args.lazy_init);
}

#[test]
fn emit_requires_metadata_path() {
    assert!(emit_command().try_get_matches_from(["emit"]).is_err());
}

#[test]
fn locate_params() {
    let m = locate_command()
        .try_get_matches_from(["locate", "add", "--json"])
        .unwrap();

    let args: LocateArgs = LocateParams::from_matches(&m).into();

    assert_eq!(args.name, "add");
    assert!(args.json);
    assert_eq!(args.profile, Profile::Debug);
}

#[test]
fn verbose_is_global() {
    let m = build_cli()
        .try_get_matches_from(["ffiglue", "locate", "add", "-vv"])
        .unwrap();

    let (name, sub) = m.subcommand().unwrap();
    assert_eq!(name, "locate");
    assert_eq!(sub.get_count("verbose"), 2);
}

#[test]
fn help_lists_subcommands() {
    let help = build_cli().render_help().to_string();

    assert!(help.contains("generate"));
    assert!(help.contains("emit"));
    assert!(help.contains("locate"));
}
