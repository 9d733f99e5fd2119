use ffiglue_core::{BindingModule, Primitive, Signature};

use crate::emit::{CommandFormatter, Config, FormatError, Formatter, generate};

struct Failing;

impl Formatter for Failing {
    fn format(&self, _source: &str) -> Result<String, FormatError> {
        Err(FormatError::Failed {
            program: "fmt".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "boom".to_string(),
        })
    }
}

struct Indent;

impl Formatter for Indent {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.replace("  ", "    "))
    }
}

fn module() -> BindingModule {
    BindingModule::builder("add")
        .signature(Signature::new(
            "add",
            vec![Primitive::I32.into(), Primitive::I32.into()],
            Primitive::I32,
        ))
        .build()
        .unwrap()
}

#[test]
fn failing_formatter_keeps_unformatted_text() {
    let config = Config::default();
    let plain = generate(module(), &config, None).unwrap();

    let out = generate(module(), &config, Some(&Failing)).unwrap();

    assert_eq!(out, plain);
}

#[test]
fn formatter_output_replaces_text() {
    let out = generate(module(), &Config::default(), Some(&Indent)).unwrap();

    assert!(out.contains("\n    const rawResult = _lib.symbols.add(a0, a1);\n"));
}

#[test]
fn presets() {
    assert_eq!(CommandFormatter::deno().program(), "deno");
    assert_eq!(CommandFormatter::dprint().program(), "dprint");
}

#[cfg(unix)]
#[test]
fn command_formatter_pipes_through_program() {
    let cat = CommandFormatter::new("cat", Vec::<String>::new());

    let out = cat.format("const x = 1;\n").unwrap();

    assert_eq!(out, "const x = 1;\n");
}

#[cfg(unix)]
#[test]
fn command_formatter_reports_exit_status() {
    let fail = CommandFormatter::new("sh", ["-c", "echo bad >&2; exit 3"]);

    let err = fail.format("x").unwrap_err();

    match err {
        FormatError::Failed { program, stderr, .. } => {
            assert_eq!(program, "sh");
            assert_eq!(stderr, "bad");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn missing_program_is_a_spawn_error() {
    let missing = CommandFormatter::new("ffiglue-no-such-formatter", ["--check"]);

    let err = missing.format("x").unwrap_err();

    assert!(matches!(err, FormatError::Spawn { .. }));
    assert!(err.to_string().starts_with("failed to run `ffiglue-no-such-formatter`"));
}
