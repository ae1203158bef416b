//! A small program with a plain command, a constructor command and a group.
//!
//! ```text
//! cargo run --example greet -- greet --name Ada --times 2
//! cargo run --example greet -- serve --port 9000 --tls
//! cargo run --example greet -- db migrate --steps 3
//! cargo run --example greet -- --help
//! ```

use anyhow::Result;
use commander::config::{ConfigurationLoader, EnvironmentLoader};
use commander::prelude::*;
use commander::SignatureBuilder;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct Server {
    host: String,
    port: u32,
    tls: bool,
}

impl FromInvocation for Server {
    fn signature() -> SignatureBuilder {
        Signature::builder()
            .param(Parameter::of::<String>("host").with_default("127.0.0.1"))
            .param(Parameter::of::<u32>("port").with_default(8080).with_short('p'))
            .param(Parameter::flag("tls"))
            .doc(
                "Describe a server without starting it.

                Args:
                    host: Interface to bind.
                    port: TCP port.
                    tls: Serve over TLS.
                ",
            )
    }

    fn from_invocation(args: &ParsedInvocation) -> Result<Self> {
        Ok(Self {
            host: args.get("host")?,
            port: args.get("port")?,
            tls: args.get("tls")?,
        })
    }
}

fn greet(args: &ParsedInvocation) -> Result<Outcome> {
    let name: String = args.get("name")?;
    let times: i64 = args.get("times")?;
    let shout: bool = args.get("shout")?;

    let mut line = format!("Hello, {}!", name);
    if shout {
        line = line.to_uppercase();
    }
    Ok(Outcome::text(vec![line; times.max(0) as usize].join("\n")))
}

fn build_app() -> Result<Commander> {
    let env = EnvironmentLoader::new(Some(Path::new(".env")));
    let loader = ConfigurationLoader::for_app("greet", None)?.with_environment(&env)?;

    let mut app = Commander::from_config(&loader.config)
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_about("Greets people and describes servers.");

    app.register(FnCommand::new(
        "greet",
        Signature::builder()
            .param(Parameter::new("name", ValueType::Str))
            .param(Parameter::of::<i64>("times").with_default(1).with_short('t'))
            .param(Parameter::flag("shout"))
            .doc(
                "Greet someone.

                Args:
                    name: Who to greet.
                    times: How many times to repeat the greeting.
                    shout: Print in capitals.
                ",
            ),
        greet,
    ))?;

    app.register(Constructor::new("serve", |server: Server| Outcome::json(&server)))?;

    app.group(
        CommandGroup::new("db")
            .with_about("Pretend database maintenance.")
            .with(FnCommand::new(
                "migrate",
                Signature::builder()
                    .param(Parameter::of::<i64>("steps").with_default(1))
                    .param(Parameter::flag("dry_run"))
                    .doc("Apply pending migrations."),
                |args: &ParsedInvocation| {
                    let steps: i64 = args.get("steps")?;
                    let verb = if args.get::<bool>("dry_run")? { "would apply" } else { "applied" };
                    Ok(Outcome::text(format!("{} {} migration(s)", verb, steps)))
                },
            ))?
            .with(FnCommand::new(
                "check",
                Signature::builder().doc("Exit with 3 to signal pending migrations."),
                |_: &ParsedInvocation| Ok(Outcome::exit(3)),
            ))?,
    )?;

    Ok(app)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let code = match build_app() {
        Ok(app) => app.run(),
        Err(e) => {
            eprintln!("error: {:#}", e);
            1
        }
    };
    std::process::exit(code);
}
