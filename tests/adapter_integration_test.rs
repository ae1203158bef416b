//! Integration tests for exposing a single command as a program.

use commander::{
    Adapter, AdapterOptions, Command, CommanderError, FnCommand, FromInvocation, Outcome,
    Parameter, ParsedInvocation, ParserOptions, Signature, SignatureBuilder, Value, ValueType,
};
use commander::Constructor;
use std::cell::RefCell;
use std::rc::Rc;

fn greet_signature() -> SignatureBuilder {
    Signature::builder()
        .param(Parameter::new("name", ValueType::Str))
        .param(Parameter::of::<i64>("times").with_default(1))
        .doc(
            "Greet someone.

            Prints a greeting once per requested repetition.

            Args:
                name: Who to greet.
                times: How many times to greet.

            Returns:
                Nothing.
            ",
        )
}

fn greet() -> FnCommand<impl Fn(&ParsedInvocation) -> anyhow::Result<Outcome>> {
    FnCommand::new("greet", greet_signature(), |args: &ParsedInvocation| {
        let name: String = args.get("name")?;
        let times: i64 = args.get("times")?;
        Ok(Outcome::text(
            vec![format!("Hello, {}!", name); times.max(0) as usize].join("\n"),
        ))
    })
}

fn plain() -> AdapterOptions {
    AdapterOptions {
        color: false,
        ..AdapterOptions::default()
    }
}

fn run<C: Command>(adapter: &Adapter<C>, tokens: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = adapter.run_with_io(tokens, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn test_greet_end_to_end() {
    let adapter = Adapter::build_with(greet(), plain()).unwrap();

    let (code, out, err) = run(&adapter, &["--name", "Ada", "--times", "2"]);
    assert_eq!(code, 0);
    assert_eq!(out, "Hello, Ada!\nHello, Ada!\n");
    assert!(err.is_empty());

    let (code, out, _) = run(&adapter, &["Ada"]);
    assert_eq!(code, 0);
    assert_eq!(out, "Hello, Ada!\n");
}

#[test]
fn test_positional_and_flag_forms_bind_identically() {
    let adapter = Adapter::build(greet()).unwrap();

    let forms: [&[&str]; 5] = [
        &["Ada", "3"],
        &["--name", "Ada", "--times", "3"],
        &["--name=Ada", "--times=3"],
        &["--times", "3", "Ada"],
        &["Ada", "--times", "3"],
    ];

    let expected = adapter.parse(forms[0]).unwrap();
    for form in &forms[1..] {
        assert_eq!(adapter.parse(*form).unwrap(), expected, "form {:?}", form);
    }
    assert_eq!(expected.get::<i64>("times").unwrap(), 3);
}

#[test]
fn test_parse_is_repeatable() {
    let adapter = Adapter::build(greet()).unwrap();
    let first = adapter.parse(["--name", "Ada"]).unwrap();
    let second = adapter.parse(["--name", "Ada"]).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.value("times"), Some(&Value::Int(1)));
}

#[test]
fn test_usage_errors_exit_with_usage_code() {
    let adapter = Adapter::build_with(greet(), plain()).unwrap();

    let (code, out, err) = run(&adapter, &["--times", "2"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.starts_with("error: greet: missing argument '--name'"));
    assert!(err.contains("Run 'greet --help' for usage."));

    let (code, _, err) = run(&adapter, &["--name", "Ada", "--times", "many"]);
    assert_eq!(code, 2);
    assert!(err.contains("invalid value 'many' for '--times'"));

    let (code, _, err) = run(&adapter, &["--name", "Ada", "--name", "Bob"]);
    assert_eq!(code, 2);
    assert!(err.contains("supplied more than once"));
}

#[test]
fn test_unknown_flag_reported_before_other_errors() {
    let adapter = Adapter::build(greet()).unwrap();

    // Missing name and a bad value are both present, the unknown flag wins.
    let result = adapter.parse(["--times", "x", "--bogus"]);
    match result {
        Err(CommanderError::UnknownArgument { token }) => assert_eq!(token, "--bogus"),
        other => panic!("expected unknown argument, got {:?}", other),
    }
}

#[test]
fn test_help_lists_every_parameter() {
    let adapter = Adapter::build_with(greet(), plain()).unwrap();

    let (code, out, err) = run(&adapter, &["--help"]);
    assert_eq!(code, 0);
    assert!(err.is_empty());
    assert!(out.starts_with("Greet someone."));
    assert!(out.contains("Prints a greeting once per requested repetition."));
    assert!(out.contains("Usage: greet [OPTIONS] <name> [times]"));
    for column in ["Parameter", "Type", "Default", "Required", "Description"] {
        assert!(out.contains(column), "missing column {}", column);
    }
    assert!(out.contains("--name"));
    assert!(out.contains("--times"));
    assert!(out.contains("Who to greet."));
    assert!(out.contains("Returns:"));

    // -h anywhere before the separator still means help.
    let (code, short_help, _) = run(&adapter, &["Ada", "-h"]);
    assert_eq!(code, 0);
    assert_eq!(short_help, out);
}

#[test]
fn test_help_after_separator_is_a_value() {
    let adapter = Adapter::build_with(greet(), plain()).unwrap();
    let (code, out, _) = run(&adapter, &["--", "--help"]);
    assert_eq!(code, 0);
    assert_eq!(out, "Hello, --help!\n");
}

#[derive(Debug)]
struct Quota {
    used: u32,
}

impl std::fmt::Display for Quota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "quota exhausted after {} calls", self.used)
    }
}

impl std::error::Error for Quota {}

#[test]
fn test_command_failure_is_wrapped_with_source() {
    let failing = FnCommand::new(
        "fetch",
        Signature::builder().param(Parameter::of::<String>("url")),
        |_: &ParsedInvocation| Err(anyhow::Error::new(Quota { used: 7 })),
    );
    let adapter = Adapter::build_with(failing, plain()).unwrap();

    match adapter.execute(["https://example.org"]) {
        Err(CommanderError::TargetInvocation { command, source }) => {
            assert_eq!(command, "fetch");
            assert_eq!(source.downcast_ref::<Quota>().unwrap().used, 7);
        }
        other => panic!("expected target invocation error, got {:?}", other),
    }

    let (code, out, err) = run(&adapter, &["https://example.org"]);
    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert!(err.contains("quota exhausted after 7 calls"));
    assert!(!err.contains("--help"));
}

#[test]
fn test_custom_exit_codes() {
    let options = AdapterOptions {
        color: false,
        usage_exit_code: 64,
        failure_exit_code: 70,
        ..AdapterOptions::default()
    };
    let failing = FnCommand::new("boom", Signature::builder(), |_: &ParsedInvocation| {
        anyhow::bail!("boom")
    });
    let adapter = Adapter::build_with(failing, options).unwrap();

    assert_eq!(run(&adapter, &[]).0, 70);
    assert_eq!(run(&adapter, &["--what"]).0, 64);
}

#[test]
fn test_exit_code_outcome_is_returned() {
    let check = FnCommand::new("check", Signature::builder(), |_: &ParsedInvocation| {
        Ok(Outcome::exit(3))
    });
    let adapter = Adapter::build_with(check, plain()).unwrap();
    assert_eq!(run(&adapter, &[]), (3, String::new(), String::new()));
}

#[test]
fn test_json_outcome_is_pretty_printed() {
    let report = FnCommand::new(
        "report",
        Signature::builder().param(Parameter::of::<Vec<String>>("tags")),
        |args: &ParsedInvocation| Ok(Outcome::Json(args.to_json())),
    );
    let adapter = Adapter::build_with(report, plain()).unwrap();

    let (code, out, _) = run(&adapter, &["--tags", "a", "--tags", "b"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, serde_json::json!({ "tags": ["a", "b"] }));
}

#[test]
fn test_bool_flag_forms() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let command = FnCommand::new(
        "build",
        Signature::builder().param(Parameter::flag("verbose")),
        move |args: &ParsedInvocation| {
            sink.borrow_mut().push(args.get::<bool>("verbose")?);
            Ok(Outcome::Unit)
        },
    );
    let adapter = Adapter::build_with(command, plain()).unwrap();

    for tokens in [
        &[][..],
        &["--verbose"][..],
        &["--no-verbose"][..],
        &["--verbose=yes"][..],
        &["--verbose=off"][..],
    ] {
        assert_eq!(run(&adapter, tokens).0, 0, "tokens {:?}", tokens);
    }
    assert_eq!(*seen.borrow(), vec![false, true, false, true, false]);

    // Bools never bind positionally.
    assert_eq!(run(&adapter, &["true"]).0, 2);
}

#[test]
fn test_negated_flags_can_be_disabled() {
    let options = AdapterOptions {
        parser: ParserOptions {
            negated_flags: false,
            ..ParserOptions::default()
        },
        ..plain()
    };
    let command = FnCommand::new(
        "build",
        Signature::builder().param(Parameter::flag("verbose")),
        |_: &ParsedInvocation| Ok(Outcome::Unit),
    );
    let adapter = Adapter::build_with(command, options).unwrap();
    assert!(matches!(
        adapter.parse(["--no-verbose"]),
        Err(CommanderError::UnknownArgument { .. })
    ));
}

struct Resize {
    width: u32,
    height: u32,
    mode: String,
}

impl FromInvocation for Resize {
    fn signature() -> SignatureBuilder {
        Signature::builder()
            .param(Parameter::of::<u32>("width"))
            .param(Parameter::of::<u32>("height"))
            .param(
                Parameter::new("mode", ValueType::Enum(vec!["fit".into(), "fill".into()]))
                    .with_default("fit")
                    .keyword_only(),
            )
    }

    fn from_invocation(args: &ParsedInvocation) -> anyhow::Result<Self> {
        Ok(Self {
            width: args.get("width")?,
            height: args.get("height")?,
            mode: args.get("mode")?,
        })
    }
}

#[test]
fn test_constructor_builds_value_from_arguments() {
    let command = Constructor::new("resize", |r: Resize| {
        Ok(Outcome::text(format!("{}x{} {}", r.width, r.height, r.mode)))
    });
    let adapter = Adapter::build_with(command, plain()).unwrap();

    let (code, out, _) = run(&adapter, &["640", "480"]);
    assert_eq!(code, 0);
    assert_eq!(out, "640x480 fit\n");

    let (code, out, _) = run(&adapter, &["640", "480", "--mode", "fill"]);
    assert_eq!(code, 0);
    assert_eq!(out, "640x480 fill\n");

    // Keyword-only parameters never take positionals.
    let (code, _, err) = run(&adapter, &["640", "480", "fill"]);
    assert_eq!(code, 2);
    assert!(err.contains("unknown argument 'fill'"));

    let (code, _, err) = run(&adapter, &["640", "-480"]);
    assert_eq!(code, 2);
    assert!(err.contains("invalid value '-480' for '--height'"));

    let (code, _, err) = run(&adapter, &["640", "480", "--mode", "stretch"]);
    assert_eq!(code, 2);
    assert!(err.contains("one of fit, fill"));
}

#[test]
fn test_invalid_signature_fails_build() {
    let command = FnCommand::new(
        "broken",
        Signature::builder().tagged("when", "datetime"),
        |_: &ParsedInvocation| Ok(Outcome::Unit),
    );
    assert!(matches!(
        Adapter::build(command),
        Err(CommanderError::Signature { .. })
    ));
}

#[test]
fn test_out_of_range_integer_is_a_usage_error() {
    let serve = FnCommand::new(
        "serve",
        Signature::builder().param(Parameter::of::<u32>("port").with_default(8080)),
        |args: &ParsedInvocation| Ok(Outcome::text(format!("port {}", args.get::<u32>("port")?))),
    );
    let adapter = Adapter::build_with(serve, plain()).unwrap();

    assert!(matches!(
        adapter.parse(["--port", "-1"]),
        Err(CommanderError::TypeCoercion { .. })
    ));

    let (code, out, err) = run(&adapter, &["--port", "-1"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("invalid value '-1' for '--port': expected int between 0 and 4294967295"));
    assert!(!err.contains("failed"));

    let (code, out, _) = run(&adapter, &["--port", "4294967295"]);
    assert_eq!(code, 0);
    assert_eq!(out, "port 4294967295\n");
}

#[test]
fn test_negative_repeat_count_prints_nothing() {
    let adapter = Adapter::build_with(greet(), plain()).unwrap();
    let (code, out, _) = run(&adapter, &["Ada", "--times", "-1"]);
    assert_eq!(code, 0);
    assert_eq!(out, "\n");
}
