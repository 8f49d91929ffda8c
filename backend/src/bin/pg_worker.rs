//! Worker binary for `pg_embedded_setup_unpriv` when the test suites run as root.
//!
//! Invoked as `pg_worker <setup|start|stop> <payload.json>`. The payload is a
//! serialised [`WorkerPayload`] describing the embedded cluster and the
//! environment it expects.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Report, Result, bail, eyre};
use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
use postgresql_embedded::PostgreSQL;

fn main() -> Result<()> {
    color_eyre::install()?;
    let invocation = Invocation::from_args(std::env::args_os())?;
    invocation.run()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Setup,
    Start,
    Stop,
}

impl Step {
    fn parse(raw: &str) -> Result<Self> {
        match raw {
            "setup" => Ok(Self::Setup),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            other => bail!("unknown pg_worker step '{other}'; expected setup, start or stop"),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
        })
    }
}

#[derive(Debug)]
struct Invocation {
    step: Step,
    payload_path: PathBuf,
}

impl Invocation {
    fn from_args(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut args = args.into_iter().skip(1);
        let step = args.next().ok_or_else(|| eyre!("missing step argument"))?;
        let payload_path = args
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| eyre!("missing payload path argument"))?;
        if let Some(extra) = args.next() {
            bail!(
                "unexpected argument {}; usage: pg_worker <step> <payload>",
                extra.to_string_lossy()
            );
        }
        Ok(Self {
            step: Step::parse(&step.to_string_lossy())?,
            payload_path,
        })
    }

    fn run(self) -> Result<()> {
        let payload = read_payload(&self.payload_path)?;
        let settings = payload
            .settings
            .into_settings()
            .map_err(|err| Report::new(err).wrap_err("failed to rebuild postgres settings"))?;
        export_environment(payload.environment);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .wrap_err("failed to build worker runtime")?;
        let mut postgres = PostgreSQL::new(settings);
        let step = self.step;
        runtime
            .block_on(async move {
                match step {
                    Step::Setup => postgres.setup().await,
                    Step::Start => postgres.start().await,
                    Step::Stop => postgres.stop().await,
                }
            })
            .with_context(|| format!("postgres {step} failed"))
    }
}

fn read_payload(path: &Path) -> Result<WorkerPayload> {
    let raw = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn export_environment(environment: Vec<(String, Option<PlainSecret>)>) {
    for (key, value) in environment {
        // SAFETY: runs before the tokio runtime starts any threads.
        match value {
            Some(value) => unsafe { std::env::set_var(&key, value.expose()) },
            None => unsafe { std::env::remove_var(&key) },
        }
    }
}
