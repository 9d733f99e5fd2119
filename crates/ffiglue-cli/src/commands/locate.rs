use ffiglue_codegen::LibraryLocator;
use ffiglue_codegen::locator::{FileName, ResolvedLibrary};
use ffiglue_core::{LibraryLocation, Profile};
use serde_json::{Map, Value, json};

pub struct LocateArgs {
    pub name: String,
    pub profile: Profile,
    pub location: LibraryLocation,
    pub json: bool,
}

pub fn run(args: LocateArgs) {
    let locator = LibraryLocator::default();
    let library = locator.locate(&args.name, &args.location, args.profile);

    if args.json {
        println!("{:#}", to_json(&library));
    } else {
        print!("{}", render_table(&library));
    }
}

/// One `key  value` row per platform (or platform/arch) file name.
pub fn render_table(library: &ResolvedLibrary) -> String {
    let mut rows = vec![
        ("base".to_string(), library.base.clone()),
        ("policy".to_string(), library.policy.ts().to_string()),
    ];
    for platform in &library.files {
        match &platform.file {
            FileName::Single(file) => rows.push((platform.os.to_string(), file.clone())),
            FileName::PerArch(files) => {
                for (arch, file) in files {
                    rows.push((format!("{}/{}", platform.os, arch), file.clone()));
                }
            }
        }
    }

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 2;
    let mut out = String::new();
    for (key, value) in rows {
        out.push_str(&format!("{key:<width$}{value}\n"));
    }
    out
}

pub fn to_json(library: &ResolvedLibrary) -> Value {
    let mut files = Map::new();
    for platform in &library.files {
        let value = match &platform.file {
            FileName::Single(file) => Value::String(file.clone()),
            FileName::PerArch(files) => Value::Object(
                files
                    .iter()
                    .map(|(arch, file)| (arch.to_string(), Value::String(file.clone())))
                    .collect(),
            ),
        };
        files.insert(platform.os.to_string(), value);
    }

    json!({
        "base": library.base,
        "policy": library.policy.ts(),
        "files": files,
    })
}
