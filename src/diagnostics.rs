use std::fmt::Write as _;
use std::path::Path;

use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where the user can
/// do something about it, how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::ConfigMalformed { path, reason } => render_config_malformed(path, reason),
        Error::InvalidLocator { key, reference } => render_invalid_locator(key, reference.as_deref()),
        Error::NoReferencesAvailable { path } => render_no_references(path),
        Error::ProbeFailed { url, reason } => render_probe_failed(url, reason),
        Error::ReferenceNotFound { name, available } => render_reference_not_found(name, available),
        Error::TargetMissing { class, locator, .. } => render_target_missing(class, locator),
        _ => render_generic(e),
    }
}

fn render_config_malformed(path: &Path, reason: &str) -> String {
    format!("\
# Error: Config Malformed

`{}` could not be parsed: {reason}

## Fix

Each reference is a table with string `src` and `doc` keys:

    [java]
    src = \"/usr/lib/jvm/java-17/src/\"
    doc = \"https://docs.oracle.com/en/java/javase/17/docs/api/java.base/\"

srcdoc never rewrites a file it cannot parse. Fix it by hand, or move it
aside to be asked for a new reference.
", path.display())
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::ConfigUnreadable { path, source } => format!("\
# Error: Config Unreadable

`{}` exists but could not be read: {source}
", path.display()),

        Error::ConfigUnwritable { path, source } => format!("\
# Error: Config Not Saved

`{}` could not be written: {source}

The reference was used for this lookup but you will be asked again next time.
", path.display()),

        Error::MalformedLocator { locator, reason } => format!("\
# Error: Malformed Locator

`{locator}` is not a valid location: {reason}

## Fix

Check the `src` and `doc` values of the reference in your configuration.
"),

        Error::ViewerNotFound { program } => format!("\
# Error: Viewer Not Found

The program `{program}` could not be found or is not in the PATH.
"),

        _ => format!("# Error\n\n{e}\n"),
    }
}

fn render_invalid_locator(key: &str, reference: Option<&str>) -> String {
    let name = reference.unwrap_or("?");
    format!("\
# Error: Incomplete Reference

Reference `{name}` has no `{key}` location.

## Fix

Add a `{key}` entry to the `[{name}]` table of your configuration.
")
}

fn render_no_references(path: &Path) -> String {
    format!("\
# Error: No References

`{}` defines no references.

## Fix

Add a table such as `[java]` with `src` and `doc` keys.
", path.display())
}

fn render_probe_failed(url: &str, reason: &str) -> String {
    format!("\
# Error: Probe Failed

Could not check `{url}`: {reason}

## Fix

Pass `--nocheck` to open it without checking.
")
}

fn render_reference_not_found(name: &str, available: &[String]) -> String {
    let mut md = format!("\
# Error: Unknown Reference

No reference named `{name}` is configured.
");
    if !available.is_empty() {
        md.push_str("\n## Available\n\n");
        for candidate in available {
            let _ = writeln!(md, "- `{candidate}`");
        }
    }
    md
}

fn render_target_missing(class: &str, locator: &str) -> String {
    format!("\
# Error: Not Found

`{class}` could not be found at `{locator}`.

## Fix

Check the spelling of the class name, or pass `--nocheck` to open it anyway.
")
}
