use anyhow::{Context, bail};
use camino::Utf8Path;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use wormguard_domain::policy::ResolverPolicy;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Runs the package manager's dependency-listing command for one batch of names.
///
/// Implementations return the raw captured output; extracting JSON from it is the
/// caller's job. An `Err` means the batch yields no information.
pub trait DependencyLister {
    fn list(&self, project: &Utf8Path, names: &[String]) -> anyhow::Result<String>;
}

/// [`DependencyLister`] backed by an external process.
#[derive(Clone, Debug)]
pub struct CommandLister {
    policy: ResolverPolicy,
}

impl CommandLister {
    pub fn new(policy: ResolverPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ResolverPolicy {
        &self.policy
    }

    /// `args`, then the package names, then `trailing_args`.
    pub fn command_args(&self, names: &[String]) -> Vec<String> {
        self.policy
            .args
            .iter()
            .chain(names)
            .chain(&self.policy.trailing_args)
            .cloned()
            .collect()
    }
}

impl DependencyLister for CommandLister {
    fn list(&self, project: &Utf8Path, names: &[String]) -> anyhow::Result<String> {
        let program = &self.policy.program;
        let mut command = Command::new(program);
        command
            .current_dir(project)
            .args(self.command_args(names))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // Own group, so a timeout can take down shims and the processes they start.
            command.process_group(0);
        }
        let mut child = command
            .spawn()
            .with_context(|| format!("spawn {program} in {project}"))?;

        let limit = self.policy.max_output_bytes;
        let stdout = child.stdout.take().context("stdout was not captured")?;
        let stderr = child.stderr.take().context("stderr was not captured")?;
        let stdout_reader = thread::spawn(move || read_capped(stdout, limit));
        let stderr_reader = thread::spawn(move || read_capped(stderr, limit));

        let status = wait_with_timeout(&mut child, self.policy.timeout)
            .with_context(|| format!("wait for {program}"))?;
        let Some(status) = status else {
            // Readers are left detached; a process that escaped the group may still hold
            // the pipes open.
            bail!(
                "{program} timed out after {}s",
                self.policy.timeout.as_secs_f64()
            );
        };

        let stdout = join_reader(stdout_reader).context("read stdout")?;
        let stderr = join_reader(stderr_reader).context("read stderr")?;

        if !stderr.is_empty() {
            tracing::debug!(
                program = %program,
                stderr = %String::from_utf8_lossy(&stderr),
                "tool stderr"
            );
        }

        if stdout.len() > limit {
            bail!("{program} produced more than {limit} bytes of output");
        }
        if !status.success() {
            if !self.policy.tolerate_nonzero_exit {
                bail!("{program} exited with {status}");
            }
            tracing::debug!(
                program = %program,
                status = %status,
                "reading listing despite exit status"
            );
        }

        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

/// Read at most `limit + 1` bytes so the caller can tell an overflow from a full read.
///
/// Dropping the pipe early makes a chatty child fail its next write instead of blocking.
fn read_capped<R: Read>(reader: R, limit: usize) -> std::io::Result<Vec<u8>> {
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut buf = Vec::new();
    reader.take(cap).read_to_end(&mut buf)?;
    Ok(buf)
}

fn join_reader(
    handle: thread::JoinHandle<std::io::Result<Vec<u8>>>,
) -> anyhow::Result<Vec<u8>> {
    match handle.join() {
        Ok(result) => Ok(result?),
        Err(_) => bail!("output reader thread panicked"),
    }
}

/// `Ok(None)` means the deadline passed and the child was killed.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> anyhow::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            kill_tree(child);
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill the child and everything in its process group.
#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    // The child leads its own group, so its pid is the group id.
    if let Ok(pid) = i32::try_from(child.id()) {
        let _ = killpg(Pid::from_raw(pid), Signal::SIGKILL);
    }
    let _ = child.kill();
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
}
