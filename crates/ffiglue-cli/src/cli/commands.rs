//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("ffiglue")
        .about("TypeScript bindings for native Rust libraries")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg().global(true))
        .subcommand(generate_command())
        .subcommand(emit_command())
        .subcommand(locate_command())
}

/// Build the library and generate its bindings.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Build the library and generate bindings/bindings.ts")
        .override_usage(
            "\
  ffiglue generate [OPTIONS] [-- <CARGO_ARGS>...]",
        )
        .after_help(
            r#"EXAMPLES:
  ffiglue generate                                  # debug build
  ffiglue generate --release                        # release build
  ffiglue generate --release=https://example.com/v1 # load from a release URL
  ffiglue generate --lazy-init -o lib               # write lib/bindings.ts
  ffiglue generate -- --features ffi                # forward cargo args"#,
        )
        .arg(release_arg())
        .arg(out_dir_arg())
        .arg(lazy_init_arg())
        .arg(no_build_arg())
        .arg(formatter_arg())
        .arg(cargo_args_arg())
}

/// Render a metadata file without consuming it.
pub fn emit_command() -> Command {
    Command::new("emit")
        .about("Render bindings from a metadata file")
        .after_help(
            r#"EXAMPLES:
  ffiglue emit bindings.json                # print to stdout
  ffiglue emit bindings.json -o out.ts      # write a file
  ffiglue emit bindings.json --release"#,
        )
        .arg(metadata_path_arg())
        .arg(release_arg())
        .arg(out_file_arg())
        .arg(lazy_init_arg())
}

/// Show where the bindings will look for the library.
pub fn locate_command() -> Command {
    Command::new("locate")
        .about("Show per-platform library file names and cache policy")
        .after_help(
            r#"EXAMPLES:
  ffiglue locate add
  ffiglue locate add --release=https://example.com/v1 --json"#,
        )
        .arg(name_arg())
        .arg(release_arg())
        .arg(json_arg())
}
