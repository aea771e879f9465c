use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Opens `path` with the platform's default handler (the browser for SVG).
pub fn open_in_browser(path: &Path) -> io::Result<()> {
    let target = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    let command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };

    launch(command, &target)?;
    tracing::debug!(path = %target.display(), "launched browser");
    Ok(())
}

/// Runs the opener to completion. The platform openers hand the file off
/// and exit, so waiting here reaps them instead of leaving zombies.
fn launch(mut command: Command, target: &Path) -> io::Result<()> {
    let status = command
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "{} exited with {status}",
            command.get_program().to_string_lossy()
        )))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn successful_opener_is_waited_for() {
        assert!(launch(Command::new("true"), Path::new("chart.svg")).is_ok());
    }

    #[test]
    fn failing_opener_is_reported() {
        let error = launch(Command::new("false"), Path::new("chart.svg")).expect_err("must fail");
        assert!(error.to_string().contains("false exited with"));
    }
}
