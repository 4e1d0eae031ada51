//! systemd user-unit generation for periodic mirror maintenance.
//!
//! Registers a oneshot service (update all mirrors, then sync the gitolite
//! config) plus a timer that fires shortly after boot and every 15 minutes
//! thereafter. Units are user-level, under `~/.config/systemd/user`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::error::{Error, Result};

/// Unit file name for a given base directory, slugged from its absolute
/// path so multiple mirror trees can coexist.
pub fn unit_name(base_dir: &Path) -> String {
    let absolute = fs::canonicalize(base_dir).unwrap_or_else(|_| base_dir.to_path_buf());
    let slug: String = absolute
        .display()
        .to_string()
        .replace(['/', '\\'], "-");
    format!("git-mirror-{}.service", slug.trim_start_matches('-'))
}

/// Render the oneshot service unit text.
pub fn render_service(base_dir: &Path, exe: &Path) -> String {
    format!(
        "[Unit]\n\
         Description=Mirror and sync Gitolite ACLs for {base}\n\
         \n\
         [Service]\n\
         Type=oneshot\n\
         WorkingDirectory={base}\n\
         ExecStart={exe} update-all --base-dir {base}\n\
         ExecStart={exe} gitolite-sync --base-dir {base}\n\
         \n\
         [Install]\n\
         WantedBy=default.target\n",
        base = base_dir.display(),
        exe = exe.display(),
    )
}

/// Render the timer unit text driving the given service unit.
pub fn render_timer(base_dir: &Path, unit: &str) -> String {
    format!(
        "[Unit]\n\
         Description=Run git-mirror for {base} periodically\n\
         \n\
         [Timer]\n\
         OnBootSec=5min\n\
         OnUnitActiveSec=15min\n\
         Unit={unit}\n\
         \n\
         [Install]\n\
         WantedBy=timers.target\n",
        base = base_dir.display(),
        unit = unit,
    )
}

/// Create and enable user-level systemd service and timer units for
/// `base_dir`. Returns `(service_path, timer_path)`.
pub fn register_user_timer(base_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let unit = unit_name(base_dir);
    let timer = unit.replace(".service", ".timer");

    let config_dir = dirs::config_dir().ok_or_else(|| {
        Error::Io(io::Error::other("could not determine user config directory"))
    })?;
    let unit_dir = config_dir.join("systemd").join("user");
    fs::create_dir_all(&unit_dir)?;

    let exe = std::env::current_exe()?;
    let service_path = unit_dir.join(&unit);
    let timer_path = unit_dir.join(&timer);
    fs::write(&service_path, render_service(base_dir, &exe))?;
    fs::write(&timer_path, render_timer(base_dir, &unit))?;

    info!("registering user timer {}", timer);
    run_systemctl(&["--user", "daemon-reload"])?;
    run_systemctl(&["--user", "enable", "--now", &timer])?;
    Ok((service_path, timer_path))
}

fn run_systemctl(args: &[&str]) -> Result<()> {
    let output = Command::new("systemctl")
        .args(args)
        .output()
        .map_err(|e| Error::Io(io::Error::other(format!("failed to run systemctl: {}", e))))?;
    if !output.status.success() {
        return Err(Error::Io(io::Error::other(format!(
            "systemctl {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        ))));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unit_name_slug() {
        let temp = TempDir::new().unwrap();
        let name = unit_name(temp.path());
        assert!(name.starts_with("git-mirror-"));
        assert!(name.ends_with(".service"));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_render_service_runs_both_steps() {
        let text = render_service(Path::new("/srv/git"), Path::new("/usr/bin/git-mirror"));
        assert!(text.contains("Type=oneshot"));
        assert!(text.contains("ExecStart=/usr/bin/git-mirror update-all --base-dir /srv/git"));
        assert!(text.contains("ExecStart=/usr/bin/git-mirror gitolite-sync --base-dir /srv/git"));
    }

    #[test]
    fn test_render_timer_references_service() {
        let text = render_timer(Path::new("/srv/git"), "git-mirror-srv-git.service");
        assert!(text.contains("OnUnitActiveSec=15min"));
        assert!(text.contains("Unit=git-mirror-srv-git.service"));
        assert!(text.contains("WantedBy=timers.target"));
    }
}
