use std::fs;
use std::path::Path;

use ffiglue_core::{LibraryLocation, METADATA_FILE, MetadataArtifact, Profile};

use crate::cli::FormatterChoice;
use crate::commands::CommandError;
use crate::commands::build_step::{BuildOutcome, BuildStep};
use crate::commands::generate::{GenerateArgs, OUTPUT_FILE, execute};

const METADATA: &str = r#"{ "name": "add", "symbols": { "add": { "parameters": ["i32", "i32"], "result": "i32" } } }"#;

fn args(out_dir: &Path, location: LibraryLocation) -> GenerateArgs {
    GenerateArgs {
        profile: Profile::Debug,
        location,
        out_dir: out_dir.to_path_buf(),
        lazy_init: false,
        build: false,
        formatter: FormatterChoice::None,
        cargo_args: vec![],
    }
}

#[test]
fn writes_bindings_and_consumes_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = dir.path().join(METADATA_FILE);
    fs::write(&metadata, METADATA).unwrap();
    let out_dir = dir.path().join("bindings");
    let mut artifact = MetadataArtifact::at(&metadata);

    let report = execute(&args(&out_dir, LibraryLocation::default()), None, &mut artifact).unwrap();

    let written = out_dir.join(OUTPUT_FILE);
    assert_eq!(report.written.as_deref(), Some(written.as_path()));
    assert_eq!(report.exit_code(), 0);
    let text = fs::read_to_string(&written).unwrap();
    assert!(text.starts_with("// Auto-generated with ffiglue\n"));
    assert!(text.contains(r#"const url = new URL("../target/debug", import.meta.url);"#));
    assert!(!metadata.exists());
}

#[test]
fn missing_metadata_leaves_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("bindings");
    fs::create_dir_all(&out_dir).unwrap();
    fs::write(out_dir.join(OUTPUT_FILE), "// previous").unwrap();
    let mut artifact = MetadataArtifact::at(dir.path().join(METADATA_FILE));

    let report = execute(&args(&out_dir, LibraryLocation::default()), None, &mut artifact).unwrap();

    assert_eq!(report.written, None);
    assert_eq!(fs::read_to_string(out_dir.join(OUTPUT_FILE)).unwrap(), "// previous");
}

#[test]
fn invalid_metadata_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = dir.path().join(METADATA_FILE);
    fs::write(&metadata, r#"{ "name": "x", "symbols": { "f": { "parameters": ["Nope"] } } }"#)
        .unwrap();
    let out_dir = dir.path().join("bindings");
    let mut artifact = MetadataArtifact::at(&metadata);

    let err = execute(&args(&out_dir, LibraryLocation::default()), None, &mut artifact).unwrap_err();

    assert!(matches!(err, CommandError::Generate(_)));
    assert!(!out_dir.join(OUTPUT_FILE).exists());
    assert!(metadata.exists());
}

#[cfg(unix)]
#[test]
fn stale_metadata_is_discarded_before_build() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = dir.path().join(METADATA_FILE);
    fs::write(&metadata, METADATA).unwrap();
    let out_dir = dir.path().join("bindings");
    let mut artifact = MetadataArtifact::at(&metadata);
    let step = BuildStep::cargo(false, vec![]).program("true");

    let report = execute(
        &args(&out_dir, LibraryLocation::default()),
        Some(&step),
        &mut artifact,
    )
    .unwrap();

    assert_eq!(report.build, Some(BuildOutcome::Succeeded));
    assert_eq!(report.written, None);
    assert!(!metadata.exists());
}

#[cfg(unix)]
#[test]
fn failed_build_skips_generation() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("bindings");
    let mut artifact = MetadataArtifact::at(dir.path().join(METADATA_FILE));
    let step = BuildStep::cargo(false, vec![]).program("false");

    let report = execute(
        &args(&out_dir, LibraryLocation::default()),
        Some(&step),
        &mut artifact,
    )
    .unwrap();

    assert_eq!(report.build, Some(BuildOutcome::Failed(Some(1))));
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.written, None);
    assert!(!out_dir.exists());
}

#[cfg(unix)]
#[test]
fn trusted_release_generates_after_failed_build() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = dir.path().join(METADATA_FILE);
    fs::write(&metadata, METADATA).unwrap();
    let out_dir = dir.path().join("bindings");
    let mut artifact = MetadataArtifact::at(&metadata);
    let step = BuildStep::cargo(true, vec![]).program("false");
    let mut args = args(
        &out_dir,
        LibraryLocation::Remote("https://example.com/v1".to_string()),
    );
    args.profile = Profile::Release;

    let report = execute(&args, Some(&step), &mut artifact).unwrap();

    assert_eq!(report.exit_code(), 1);
    let text = fs::read_to_string(report.written.unwrap()).unwrap();
    assert!(text.contains("policy: CachePolicy.STORE,"));
    assert!(text.contains(r#"aarch64: uri + "libadd_arm64.dylib","#));
    assert!(!metadata.exists());
}
