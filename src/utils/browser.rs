use std::process::{Command, Stdio};
use log::{info, warn};

/// Build the platform command that opens `url` in the default browser
pub fn opener_command(url: &str) -> Command {
    #[cfg(target_os = "windows")]
    let mut cmd = {
        let mut cmd = Command::new(r"C:\Windows\System32\rundll32.exe");
        cmd.arg("url.dll,FileProtocolHandler");
        cmd
    };
    #[cfg(target_os = "macos")]
    let mut cmd = Command::new("open");
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let mut cmd = Command::new("xdg-open");

    cmd.arg(url).stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    cmd
}

/// Open `url` without waiting for the browser; failures are only logged.
pub fn open(url: &str) {
    match opener_command(url).spawn() {
        Ok(_) => info!("Opened browser at {}", url),
        Err(e) => warn!("Could not open a browser at {}: {}", url, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_last_argument() {
        let cmd = opener_command("http://127.0.0.1:8080/view/Home");
        let last = cmd.get_args().last().map(|a| a.to_string_lossy().to_string());
        assert_eq!(last.as_deref(), Some("http://127.0.0.1:8080/view/Home"));
    }
}
