use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

use crate::script::ScriptInvocation;

/// Captured result of one installer invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl InstallOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

pub trait ScriptRunner {
    fn run(&mut self, invocation: &ScriptInvocation) -> Result<InstallOutput>;
}

/// Runs invocations as child processes with the inherited environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ScriptRunner for ProcessRunner {
    fn run(&mut self, invocation: &ScriptInvocation) -> Result<InstallOutput> {
        debug!(command = %invocation.display_command(), "running install script");
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .output()
            .with_context(|| {
                format!(
                    "failed to start install script: {}",
                    invocation.program.display()
                )
            })?;

        // a signal-terminated child has no code
        Ok(InstallOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
