use std::io::Read;
use std::process::{Child, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::core::command::ExternalCommand;
use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// How long captured pipes may stay open after the child itself exited
const DRAIN_GRACE: Duration = Duration::from_secs(2);

struct Drain {
    buf: Arc<Mutex<Vec<u8>>>,
    handle: JoinHandle<()>,
}

fn drain<R: Read + Send + 'static>(mut stream: R) -> Drain {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buf);
    let handle = thread::spawn(move || {
        let mut chunk = [0u8; 8192];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(_) => break,
                Ok(n) => {
                    if let Ok(mut b) = sink.lock() {
                        b.extend_from_slice(&chunk[..n]);
                    }
                }
            }
        }
    });
    Drain { buf, handle }
}

// A grandchild holding the pipe open would block a plain join forever; after the grace
// period the reader is detached and whatever was read so far is returned.
fn collect(drain: Option<Drain>, deadline: Instant) -> String {
    let Some(Drain { buf, handle }) = drain else {
        return String::new();
    };
    while !handle.is_finished() && Instant::now() < deadline {
        thread::sleep(POLL_INTERVAL);
    }
    if handle.is_finished() {
        let _ = handle.join();
    } else {
        warn!("Output pipe still open after exit; truncating captured output");
    }
    let bytes = buf.lock().map(|b| b.clone()).unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

// Ok(None) means the limit elapsed and the child was killed.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
) -> std::io::Result<Option<ExitStatus>> {
    let Some(limit) = timeout else {
        return child.wait().map(Some);
    };
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= limit {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(limit.saturating_sub(start.elapsed())));
    }
}

/// Run an external command to completion and check its exit status.
///
/// In verbose mode the child writes straight to the caller's console; otherwise stdout
/// and stderr are captured and returned (or attached to the error on failure).
pub fn run_external(
    cmd: &ExternalCommand,
    verbose: bool,
    timeout: Option<Duration>,
) -> Result<String> {
    let rendered = cmd.to_string();
    info!("Running: {}", rendered);

    let mut command = cmd.to_command();
    command.stdin(Stdio::null());
    if verbose {
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    } else {
        command.stdout(Stdio::piped()).stderr(Stdio::piped());
    }

    let mut child = command.spawn().map_err(|source| Error::Spawn {
        command: rendered.clone(),
        source,
    })?;
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = match wait_with_timeout(&mut child, timeout)? {
        Some(status) => status,
        None => {
            // Readers are detached: grandchildren may still hold the pipes open.
            return Err(Error::Timeout {
                command: rendered,
                secs: timeout.map(|t| t.as_secs()).unwrap_or_default(),
            });
        }
    };

    let drain_deadline = Instant::now() + DRAIN_GRACE;
    let mut output = collect(stdout, drain_deadline);
    let err_text = collect(stderr, drain_deadline);
    if !err_text.is_empty() {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&err_text);
    }

    if !status.success() {
        return Err(Error::ExternalTool {
            command: rendered,
            status: status.to_string(),
            output,
        });
    }
    debug!("{} finished: {}", cmd.program.to_string_lossy(), status);
    Ok(output)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> ExternalCommand {
        ExternalCommand::new("sh").arg("-c").arg(script)
    }

    #[test]
    fn captures_output_when_quiet() -> Result<()> {
        let out = run_external(&sh("echo hello; echo warn >&2"), false, None)?;
        assert!(out.contains("hello"));
        assert!(out.contains("warn"));
        Ok(())
    }

    #[test]
    fn failure_carries_captured_text() {
        let err = run_external(&sh("echo broken volume >&2; exit 3"), false, None).unwrap_err();
        match err {
            Error::ExternalTool {
                command, output, ..
            } => {
                assert!(command.starts_with("sh -c"));
                assert!(output.contains("broken volume"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn verbose_failure_is_still_detected() {
        let err = run_external(&sh("exit 2"), true, None).unwrap_err();
        assert!(matches!(err, Error::ExternalTool { ref output, .. } if output.is_empty()));
    }

    #[test]
    fn missing_executable_is_a_spawn_error() {
        let cmd = ExternalCommand::new("definitely-not-a-real-nu-correct-binary");
        assert!(matches!(
            run_external(&cmd, false, None),
            Err(Error::Spawn { .. })
        ));
    }

    #[test]
    fn lingering_grandchild_does_not_block_capture() -> Result<()> {
        let started = Instant::now();
        let out = run_external(&sh("sleep 20 & echo spawned"), false, None)?;
        assert!(out.contains("spawned"));
        assert!(started.elapsed() < Duration::from_secs(15));
        Ok(())
    }

    #[test]
    fn timeout_kills_the_child() {
        let started = Instant::now();
        let err = run_external(&sh("sleep 5"), false, Some(Duration::from_millis(200)))
            .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
