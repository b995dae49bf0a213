use std::{
    io,
    process::{ExitStatus, Stdio},
    time::Duration,
};

use tokio::process::{Child, Command};

use crate::configuration::BackendSettings;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to launch `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to stop the backend process")]
    Terminate(#[from] io::Error),
    #[cfg(unix)]
    #[error("failed to signal the backend process")]
    Signal(#[from] nix::Error),
}

#[derive(Debug)]
pub enum StopOutcome {
    /// The process left on its own or after the graceful signal.
    Exited(ExitStatus),
    /// The grace period ran out and the process was killed.
    Killed,
}

/// The running backend server. Owned by exactly one caller between
/// [`Backend::start`] and [`Backend::stop`]; dropping it kills the child.
#[derive(Debug)]
pub struct Backend {
    child: Child,
    startup_delay: Duration,
    grace_period: Duration,
}

impl Backend {
    #[tracing::instrument(name = "Launching backend", skip_all, fields(program = %settings.program))]
    pub fn start(settings: &BackendSettings) -> Result<Self, BackendError> {
        let child = Command::new(&settings.program)
            .args(settings.command_args())
            .current_dir(&settings.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BackendError::Spawn {
                program: settings.program.clone(),
                source,
            })?;
        tracing::info!(pid = child.id(), "Backend process spawned");
        Ok(Self {
            child,
            startup_delay: settings.startup_delay(),
            grace_period: settings.shutdown_grace_period(),
        })
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Fixed wait for the server to come up. No readiness probe is made.
    pub async fn settle(&self) {
        tracing::debug!(delay_ms = self.startup_delay.as_millis() as u64, "Waiting for backend startup");
        tokio::time::sleep(self.startup_delay).await
    }

    #[tracing::instrument(name = "Stopping backend", skip_all, fields(pid = self.child.id()))]
    pub async fn stop(mut self) -> Result<StopOutcome, BackendError> {
        if let Some(status) = self.child.try_wait()? {
            tracing::warn!(%status, "Backend process had already exited");
            return Ok(StopOutcome::Exited(status));
        }
        self.terminate()?;
        match tokio::time::timeout(self.grace_period, self.child.wait()).await {
            Ok(status) => {
                let status = status?;
                tracing::info!(%status, "Backend process exited");
                Ok(StopOutcome::Exited(status))
            }
            Err(_) => {
                tracing::warn!(
                    grace_period_ms = self.grace_period.as_millis() as u64,
                    "Backend ignored termination, killing it"
                );
                self.child.kill().await?;
                Ok(StopOutcome::Killed)
            }
        }
    }

    #[cfg(unix)]
    fn terminate(&mut self) -> Result<(), BackendError> {
        use nix::{
            sys::signal::{kill, Signal},
            unistd::Pid,
        };
        match self.child.id() {
            Some(pid) => kill(Pid::from_raw(pid as i32), Signal::SIGTERM).map_err(Into::into),
            None => Ok(()),
        }
    }

    #[cfg(not(unix))]
    fn terminate(&mut self) -> Result<(), BackendError> {
        self.child.start_kill().map_err(Into::into)
    }
}
