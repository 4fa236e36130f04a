use anyhow::{Context, bail};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Lay out and export DOT source through the Graphviz `dot` executable.
///
/// `format` is a Graphviz `-T` output format (`png`, `svg`, `pdf`).
pub fn run_graphviz(dot_src: &str, format: &str, out: &Path, dot_bin: &str) -> anyhow::Result<()> {
    tracing::debug!(dot_bin, format, out = %out.display(), "invoking graphviz");

    let mut child = Command::new(dot_bin)
        .arg(format!("-T{}", format))
        .arg("-o")
        .arg(out)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("run graphviz `{}` (is Graphviz installed?)", dot_bin))?;

    // stdin is closed at the end of this block so `dot` sees EOF.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(dot_src.as_bytes()),
        None => Ok(()),
    };

    // A child that exits early breaks the pipe; its stderr has the real cause.
    let output = child
        .wait_with_output()
        .with_context(|| format!("wait for `{}`", dot_bin))?;
    if !output.status.success() {
        bail!(
            "graphviz `{}` exited with {}: {}",
            dot_bin,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    written.with_context(|| format!("write DOT source to `{}`", dot_bin))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("d.png");
        let err = run_graphviz(
            "digraph {}",
            "png",
            &out,
            "/nonexistent/bin/graphviz-dot",
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("is Graphviz installed?"));
        assert!(!out.exists());
    }

    #[cfg(unix)]
    fn failing_tool(dir: &Path) -> String {
        use std::os::unix::fs::PermissionsExt;

        // exits without reading stdin, like `dot` rejecting its arguments
        let script = dir.join("fake-dot");
        std::fs::write(&script, "#!/bin/sh\necho 'Error: boom' >&2\nexit 3\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let tool = failing_tool(dir.path());
        // large enough to overflow the pipe buffer if nobody reads it
        let big = format!("digraph {{ {} }}", "\"n\"; ".repeat(64 * 1024));

        let err = run_graphviz(&big, "png", &dir.path().join("d.png"), &tool).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("exited with"), "{msg}");
        assert!(msg.contains("Error: boom"), "{msg}");
        assert!(!msg.contains("write DOT source"), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn false_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_graphviz("digraph {}", "svg", &dir.path().join("d.svg"), "false").unwrap_err();
        assert!(format!("{err:#}").contains("graphviz `false` exited with"));
    }
}
