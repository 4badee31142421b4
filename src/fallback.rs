//! Hooks for colors only a host environment can resolve, such as named
//! colors or system colors. The engine works without any of them.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use anyhow::Context;

/// Something that can translate an arbitrary color string into one the
/// parsers understand, usually `rgb(...)`.
pub trait ColorResolver {
    /// `Ok(None)` means the resolver doesn't know the color.
    fn resolve(&self, raw: &str) -> anyhow::Result<Option<String>>;
}

impl<F> ColorResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, raw: &str) -> anyhow::Result<Option<String>> {
        Ok(self(raw))
    }
}

/// Placeholder resolver for parsers that have none.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResolver;

impl ColorResolver for NoResolver {
    fn resolve(&self, _raw: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

/// Asks `resolver` once. Resolver errors are logged and treated as "no answer".
pub(crate) fn resolve_with<R: ColorResolver>(resolver: Option<&R>, raw: &str) -> Option<String> {
    let resolver = resolver?;
    match resolver.resolve(raw) {
        Ok(Some(resolved)) => {
            log::debug!("Resolver translated '{raw}' to '{resolved}'");
            Some(resolved)
        }
        Ok(None) => {
            log::debug!("Resolver doesn't know '{raw}'");
            None
        }
        Err(err) => {
            log::warn!("Resolver failed for '{raw}': {err:#}");
            None
        }
    }
}

/// A host that resolves colors through a short-lived probe, e.g. a scratch
/// element whose computed style is read back.
pub trait ProbeHost {
    type Probe;

    fn acquire(&self) -> anyhow::Result<Self::Probe>;

    /// Returns the host's computed color for `raw`.
    fn query(&self, probe: &mut Self::Probe, raw: &str) -> anyhow::Result<String>;

    fn release(&self, probe: Self::Probe);
}

struct ProbeGuard<'h, H: ProbeHost> {
    host: &'h H,
    probe: Option<H::Probe>,
}

impl<H: ProbeHost> Drop for ProbeGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(probe) = self.probe.take() {
            self.host.release(probe);
        }
    }
}

fn is_rgb_function(s: &str) -> bool {
    let s = s.trim_start().to_ascii_lowercase();
    s.starts_with("rgb(") || s.starts_with("rgba(")
}

/// Adapts a [`ProbeHost`] into a [`ColorResolver`]. The probe is released
/// on every exit path, including errors and panics inside `query`.
///
/// Only `rgb()`/`rgba()` answers are passed on; hosts report anything else
/// for colors they couldn't compute.
#[derive(Debug)]
pub struct ProbeResolver<H> {
    host: H,
}

impl<H: ProbeHost> ProbeResolver<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: ProbeHost> ColorResolver for ProbeResolver<H> {
    fn resolve(&self, raw: &str) -> anyhow::Result<Option<String>> {
        let mut guard = ProbeGuard {
            host: &self.host,
            probe: Some(self.host.acquire()?),
        };
        let Some(probe) = guard.probe.as_mut() else {
            return Ok(None);
        };

        let computed = self.host.query(probe, raw)?;
        Ok(is_rgb_function(&computed).then_some(computed))
    }
}

/// Resolves colors with an external program: one process per lookup, the
/// color on stdin and the answer as the first line of stdout.
#[derive(Clone, Debug)]
pub struct CommandResolver {
    program: String,
    args: Vec<String>,
}

impl CommandResolver {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl ProbeHost for CommandResolver {
    type Probe = Child;

    fn acquire(&self) -> anyhow::Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Couldn't start resolver '{}'", self.program))
    }

    fn query(&self, child: &mut Child, raw: &str) -> anyhow::Result<String> {
        let mut stdin = child.stdin.take().context("Resolver stdin unavailable")?;
        writeln!(stdin, "{raw}").context("Write to resolver failed")?;
        drop(stdin);

        let stdout = child.stdout.take().context("Resolver stdout unavailable")?;
        let mut line = String::new();
        BufReader::new(stdout)
            .read_line(&mut line)
            .context("Read from resolver failed")?;
        Ok(line.trim().to_owned())
    }

    fn release(&self, mut child: Child) {
        if let Err(err) = child.kill() {
            log::debug!("Couldn't kill resolver '{}': {err}", self.program);
        }
        if let Err(err) = child.wait() {
            log::warn!("Couldn't reap resolver '{}': {err}", self.program);
        }
    }
}
