/// Captures the current screen hierarchy through `adb` and `uiautomator dump`.
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use crate::capture::transport::CaptureTransport;
use crate::config::CaptureConfig;
use crate::errors::{DroidScopeError, DroidScopeResult};

pub struct AdbTransport {
    config: CaptureConfig,
}

impl AdbTransport {
    pub fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    /// Full argument list for one adb invocation, with the device selector
    /// prepended when a serial is configured.
    fn args<'a>(&'a self, command: &[&'a str]) -> Vec<&'a str> {
        let mut args = Vec::with_capacity(command.len() + 2);
        if let Some(serial) = self.config.serial.as_deref() {
            args.extend(["-s", serial]);
        }
        args.extend_from_slice(command);
        args
    }

    async fn run(&self, command: &[&str]) -> DroidScopeResult<String> {
        let args = self.args(command);
        tracing::debug!(adb = %self.config.adb_path, ?args, "running adb");

        let mut cmd = Command::new(&self.config.adb_path);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = timeout(Duration::from_millis(self.config.timeout_ms), cmd.output())
            .await
            .map_err(|_| {
                DroidScopeError::Acquisition(format!(
                    "adb {} timed out after {} ms",
                    command.join(" "),
                    self.config.timeout_ms
                ))
            })?
            .map_err(|e| {
                DroidScopeError::Acquisition(format!("spawn {}: {e}", self.config.adb_path))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(code = ?output.status.code(), stderr = %stderr.trim(), "adb failed");
            return Err(DroidScopeError::Acquisition(format!(
                "adb {} exited with {}: {}",
                command.join(" "),
                output.status,
                stderr.trim()
            )));
        }
        Ok(stdout)
    }
}

#[async_trait]
impl CaptureTransport for AdbTransport {
    async fn capture(&self) -> DroidScopeResult<Vec<u8>> {
        let device_path = self.config.device_dump_path.as_str();
        let local_path = &self.config.local_dump_path;

        let out = self
            .run(&["shell", "uiautomator", "dump", device_path])
            .await?;
        // uiautomator reports some failures on stdout with a zero exit code.
        if out.contains("ERROR") {
            return Err(DroidScopeError::Acquisition(format!(
                "uiautomator dump: {}",
                out.trim()
            )));
        }

        // A stale dump from an earlier run must never be mistaken for this one.
        match tokio::fs::remove_file(local_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(DroidScopeError::Acquisition(format!(
                    "remove stale {}: {e}",
                    local_path.display()
                )))
            }
        }

        let local = local_path.to_string_lossy();
        self.run(&["pull", device_path, local.as_ref()]).await?;

        let bytes = tokio::fs::read(local_path).await.map_err(|e| {
            DroidScopeError::Acquisition(format!("read {}: {e}", local_path.display()))
        })?;
        tracing::info!(bytes = bytes.len(), "UI hierarchy captured");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_selects_device() {
        let transport = AdbTransport::new(CaptureConfig {
            serial: Some("emulator-5554".into()),
            ..CaptureConfig::default()
        });
        assert_eq!(
            transport.args(&["pull", "/sdcard/window_dump.xml", "out.xml"]),
            ["-s", "emulator-5554", "pull", "/sdcard/window_dump.xml", "out.xml"]
        );
    }

    #[test]
    fn no_serial_passes_command_through() {
        let transport = AdbTransport::new(CaptureConfig::default());
        assert_eq!(
            transport.args(&["shell", "uiautomator", "dump", "/sdcard/window_dump.xml"]),
            ["shell", "uiautomator", "dump", "/sdcard/window_dump.xml"]
        );
    }

    #[tokio::test]
    async fn missing_adb_binary_is_acquisition_failure() {
        let transport = AdbTransport::new(CaptureConfig {
            adb_path: "/nonexistent/platform-tools/adb".into(),
            ..CaptureConfig::default()
        });
        let err = transport.capture().await.unwrap_err();
        assert!(matches!(err, DroidScopeError::Acquisition(_)), "{err}");
    }
}
