//! Existence checks for resolved targets and launching of a viewer.

use std::process::Command;

use crate::error::Error;
use crate::probe::{HTTP_OK, Probe};
use crate::reference::Locator;

/// Fail unless the target behind `locator` exists: a local file on disk, or
/// a URL answering 200.
///
/// # Errors
///
/// Returns `Error::TargetMissing` if the target doesn't exist, or
/// `Error::ProbeFailed` if a URL could not be probed at all.
pub fn ensure_exists<R: Probe + ?Sized>(class: &str, locator: &Locator, probe: &R) -> Result<(), Error> {
    let exists = if locator.is_remote() {
        probe.status(locator.as_str())? == HTTP_OK
    } else {
        locator.to_file_path().is_some_and(|p| return p.exists())
    };

    if exists {
        return Ok(());
    }
    return Err(Error::TargetMissing {
        class: class.to_string(),
        locator: locator.to_string(),
        remote: locator.is_remote(),
    });
}

/// Open `locator` with `viewer` (a program, optionally followed by
/// whitespace-separated arguments) or with the desktop handler.
/// Waits for the launched program to exit.
///
/// # Errors
///
/// Returns `Error::ViewerNotFound` if the program can't be started, or
/// `Error::ViewerFailed` if it exits unsuccessfully or no handler is known.
pub fn open(locator: &Locator, viewer: Option<&str>) -> Result<(), Error> {
    let command_line: Vec<String> = match viewer {
        Some(v) => v.split_whitespace().map(str::to_string).collect(),
        None => desktop_handler(),
    };
    let Some((program, args)) = command_line.split_first() else {
        return Err(Error::ViewerFailed {
            program: viewer.unwrap_or_default().to_string(),
            reason: "no desktop handler is known for this platform; use --viewer".to_string(),
        });
    };

    tracing::debug!(%program, ?args, %locator, "launching viewer");
    let status = Command::new(program)
        .args(args)
        .arg(locator.as_str())
        .status()
        .map_err(|e| {
            return match e.kind() {
                std::io::ErrorKind::NotFound => Error::ViewerNotFound {
                    program: program.clone(),
                },
                _ => Error::ViewerFailed {
                    program: program.clone(),
                    reason: e.to_string(),
                },
            };
        })?;

    if status.success() {
        return Ok(());
    }
    return Err(Error::ViewerFailed {
        program: program.clone(),
        reason: status.to_string(),
    });
}

/// Program and leading arguments that open a URL with the desktop default.
fn desktop_handler() -> Vec<String> {
    let parts: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(windows) {
        &["cmd", "/C", "start", ""]
    } else if cfg!(unix) {
        &["xdg-open"]
    } else {
        &[]
    };
    return parts.iter().map(|p| return (*p).to_string()).collect();
}
