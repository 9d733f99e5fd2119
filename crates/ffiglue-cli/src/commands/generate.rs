use std::fs;
use std::path::PathBuf;

use ffiglue_codegen::{Config, Formatter, Generation, generate_from_artifact};
use ffiglue_core::{LibraryLocation, MetadataArtifact, Profile};
use tracing::{info, warn};

use super::CommandError;
use super::build_step::{BuildOutcome, BuildStep};
use crate::cli::FormatterChoice;

/// File name of the generated module inside the output directory.
pub const OUTPUT_FILE: &str = "bindings.ts";

pub struct GenerateArgs {
    pub profile: Profile,
    pub location: LibraryLocation,
    pub out_dir: PathBuf,
    pub lazy_init: bool,
    pub build: bool,
    pub formatter: FormatterChoice,
    pub cargo_args: Vec<String>,
}

impl GenerateArgs {
    /// A remote location marks a trusted release whose metadata is used even after a failed build.
    pub fn trusted(&self) -> bool {
        self.location.is_remote()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub build: Option<BuildOutcome>,
    pub written: Option<PathBuf>,
}

impl GenerateReport {
    pub fn exit_code(&self) -> i32 {
        self.build.map_or(0, BuildOutcome::exit_code)
    }
}

pub fn run(args: GenerateArgs) {
    let dir = std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("error: {}", CommandError::WorkingDir(e));
        std::process::exit(1);
    });
    let mut artifact = MetadataArtifact::locate(&dir);
    let step = args.build.then(|| {
        BuildStep::cargo(args.profile == Profile::Release, args.cargo_args.clone())
    });

    match execute(&args, step.as_ref(), &mut artifact) {
        Ok(report) => {
            let code = report.exit_code();
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Build (when `step` is given), then generate from whatever metadata is present.
pub fn execute(
    args: &GenerateArgs,
    step: Option<&BuildStep>,
    artifact: &mut MetadataArtifact,
) -> Result<GenerateReport, CommandError> {
    let mut report = GenerateReport::default();

    if let Some(step) = step {
        if !args.trusted() {
            artifact.discard()?;
        }
        let outcome = step.run()?;
        report.build = Some(outcome);
        if !outcome.succeeded() && !args.trusted() {
            warn!("build failed, bindings not regenerated");
            return Ok(report);
        }
    }

    fs::create_dir_all(&args.out_dir).map_err(|source| CommandError::Write {
        path: args.out_dir.clone(),
        source,
    })?;

    let config = Config::new().lazy_init(args.lazy_init);
    let formatter = args.formatter.formatter();
    let generation = generate_from_artifact(
        artifact,
        args.profile,
        args.location.clone(),
        &config,
        formatter.as_ref().map(|f| f as &dyn Formatter),
    )?;

    let Generation::Emitted(text) = generation else {
        info!("no metadata, nothing to update");
        return Ok(report);
    };

    let path = args.out_dir.join(OUTPUT_FILE);
    fs::write(&path, text).map_err(|source| CommandError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "bindings written");

    report.written = Some(path);
    Ok(report)
}
