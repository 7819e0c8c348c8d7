//! Deadline-guarded subprocess invocation (made by FontLab https://www.fontlab.com/)

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// An external command to run: program name plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Render the command line for diagnostics.
    pub fn display(&self) -> String {
        let mut rendered = self.program.clone();
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(arg);
        }
        rendered
    }
}

/// Trait for running external commands, so the platform handlers share one
/// failure path and tests can substitute a recording fake.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<()>;
}

/// Runs commands via `std::process` and kills them when a deadline expires.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<()> {
        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawning `{}`", spec.display()))?;

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child
                .try_wait()
                .with_context(|| format!("waiting on `{}`", spec.display()))?
            {
                break status;
            }

            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(anyhow!(
                    "`{}` timed out after {:?}",
                    spec.display(),
                    self.timeout
                ));
            }

            thread::sleep(POLL_INTERVAL);
        };

        if status.success() {
            return Ok(());
        }

        let mut stderr = String::new();
        if let Some(mut pipe) = child.stderr.take() {
            let _ = pipe.read_to_string(&mut stderr);
        }
        let stderr = stderr.trim();

        if stderr.is_empty() {
            Err(anyhow!("`{}` exited with {}", spec.display(), status))
        } else {
            Err(anyhow!(
                "`{}` exited with {}: {}",
                spec.display(),
                status,
                stderr
            ))
        }
    }
}
