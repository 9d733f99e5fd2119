use std::fs;
use std::path::PathBuf;

use ffiglue_codegen::{Config, generate};
use ffiglue_core::{LibraryLocation, MetadataArtifact, Profile};

use super::CommandError;

pub struct EmitArgs {
    pub metadata: PathBuf,
    pub profile: Profile,
    pub location: LibraryLocation,
    pub output: Option<PathBuf>,
    pub lazy_init: bool,
}

pub fn run(args: EmitArgs) {
    let result = render(&args).and_then(|text| match &args.output {
        Some(path) => fs::write(path, text).map_err(|source| CommandError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            print!("{}", text);
            Ok(())
        }
    });

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Render the metadata file. The file is read, never consumed.
pub fn render(args: &EmitArgs) -> Result<String, CommandError> {
    let artifact = MetadataArtifact::at(&args.metadata);
    let raw = artifact
        .read()?
        .ok_or_else(|| CommandError::MissingMetadata(args.metadata.clone()))?;
    let module = raw.into_module(args.profile, args.location.clone())?;
    let config = Config::new().lazy_init(args.lazy_init);
    Ok(generate(module, &config, None)?)
}
