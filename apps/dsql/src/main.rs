//! dsql - translate SQL-like statements into store requests.
//!
//! Each statement is parsed and printed as the operation target header
//! followed by the JSON request body. With `--decode` a stored query response
//! is projected into rows instead.
//!
//! # Usage
//!
//! ```text
//! dsql "select id, name from users where id = 1"
//! echo "drop table users" | dsql
//! dsql --decode response.json ["select id, name from users"]
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DSQL_TARGET_PREFIX` | `DynamoDB_20120810` | Operation target prefix |
//! | `DSQL_STRICT_NUMBERS` | `false` | Fail rows holding non-integer numbers |
//! | `DSQL_LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `DSQL_LOG_LEVEL`) |

use std::fmt::Write as _;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use dsql_core::{Advance, DsqlConfig, Projection, Request, Rows, Value, parse};
use dsql_model::ServiceError;
use dsql_model::output::QueryOutput;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `DSQL_LOG_LEVEL` config
/// value. Logs go to stderr so stdout carries only the translation.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    Ok(())
}

/// What the binary was asked to do.
#[derive(Debug, PartialEq, Eq)]
enum Mode {
    /// Translate statements given as arguments, or read from stdin when empty.
    Translate(Vec<String>),
    /// Project a stored query response, optionally with the originating query.
    Decode {
        path: PathBuf,
        statement: Option<String>,
    },
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Mode> {
    let mut statements = Vec::new();
    let mut decode = None;

    while let Some(arg) = args.next() {
        if arg == "--decode" {
            let path = args.next().context("--decode requires a file path")?;
            decode = Some(PathBuf::from(path));
        } else {
            statements.push(arg);
        }
    }

    match decode {
        Some(path) => {
            if statements.len() > 1 {
                bail!("--decode accepts at most one statement");
            }
            Ok(Mode::Decode {
                path,
                statement: statements.pop(),
            })
        }
        None => Ok(Mode::Translate(statements)),
    }
}

/// Statements from stdin, one per non-empty line.
fn read_statements(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Render one statement as its target header and pretty-printed body.
fn translate(statement: &str, config: &DsqlConfig) -> Result<String> {
    let request = parse(statement)?;
    let target = request.operation().target(&config.target_prefix);
    let body: serde_json::Value = serde_json::from_slice(&request.to_body()?)?;
    debug!(target = %target, "translated statement");
    Ok(format!(
        "X-Amz-Target: {target}\n{}\n",
        serde_json::to_string_pretty(&body)?
    ))
}

/// Render a query response body as tab-separated rows under a header line.
fn decode(body: &[u8], statement: Option<&str>, config: &DsqlConfig) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_slice(body).context("response is not valid JSON")?;
    if value.get("__type").is_some() {
        return Err(ServiceError::from_body(body).into());
    }
    // Decode from the raw body: `serde_json::Value` does not keep key order.
    let output: QueryOutput = serde_json::from_slice(body)?;

    let request = statement.map(parse).transpose()?;
    let explicit = request.as_ref().and_then(Request::projected_columns);
    let mut rows = Rows::new(
        Projection::new(output.items, explicit),
        config.number_policy(),
    );

    let mut out = rows.columns().join("\t");
    out.push('\n');
    let mut buf = vec![Value::Null; rows.columns().len()];
    let mut count = 0usize;
    while rows.advance(&mut buf)? == Advance::Row {
        let line: Vec<String> = buf.iter().map(ToString::to_string).collect();
        writeln!(out, "{}", line.join("\t"))?;
        count += 1;
    }
    rows.close();

    info!(rows = count, "decoded response");
    Ok(out)
}

fn main() -> Result<()> {
    let config = DsqlConfig::from_env();
    init_tracing(&config.log_level)?;

    match parse_args(std::env::args().skip(1))? {
        Mode::Decode { path, statement } => {
            let body = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            print!("{}", decode(&body, statement.as_deref(), &config)?);
        }
        Mode::Translate(mut statements) => {
            if statements.is_empty() {
                let mut input = String::new();
                io::stdin()
                    .read_to_string(&mut input)
                    .context("failed to read stdin")?;
                statements = read_statements(&input);
            }
            for statement in &statements {
                print!("{}", translate(statement, &config)?);
            }
        }
    }

    Ok(())
}
