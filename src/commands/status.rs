//! The `status` command: read-only drift report between on-disk mirrors
//! and the gitolite config.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use git_mirror::admin;
use git_mirror::document::ConfigDocument;
use git_mirror::output::{tag, OutputConfig};
use git_mirror::reconcile::diff;
use git_mirror::inventory;

/// Report drift between mirrors and the gitolite config
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Base directory for mirrors
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// gitolite-admin repository URL
    #[arg(long, value_name = "URL")]
    pub admin_url: Option<String>,

    /// Local path for the gitolite-admin checkout
    #[arg(long, value_name = "DIR")]
    pub admin_dir: Option<PathBuf>,

    /// Path prefix inside gitolite
    #[arg(long, default_value = "mirrors")]
    pub prefix: String,

    /// Included conf filename
    #[arg(long, value_name = "FILE", default_value = "mirrors.conf")]
    pub conf_file: String,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

/// Drift summary surfaced by `status`.
#[derive(Debug, Serialize)]
struct StatusReport {
    /// Mirrors on disk that do not follow the expected layout.
    bad_layout: Vec<String>,
    /// Desired keys with no stanza in the config.
    missing_in_config: BTreeSet<String>,
    /// Config stanzas with no mirror on disk.
    missing_on_disk: BTreeSet<String>,
    /// Opaque last-sync timestamp from the base directory's ledger.
    last_sync: Option<String>,
}

impl StatusReport {
    fn in_sync(&self) -> bool {
        self.bad_layout.is_empty()
            && self.missing_in_config.is_empty()
            && self.missing_on_disk.is_empty()
    }
}

/// Execute the `status` command.
pub fn execute(args: StatusArgs, output: &OutputConfig) -> Result<()> {
    let base_dir = super::resolve_base_dir(args.base_dir)?;
    let (admin_url, admin_dir) =
        super::resolve_admin(Some(&base_dir), args.admin_url, args.admin_dir)?;

    admin::ensure_admin_repo(&admin_url, &admin_dir)?;
    let document = admin::ensure_include(&admin_dir, &args.conf_file)?;

    let mut desired: BTreeSet<String> = BTreeSet::new();
    let mut bad_layout = Vec::new();
    for mirror in inventory::scan(&base_dir) {
        match inventory::identity_for(&base_dir, &mirror) {
            Ok(rid) => {
                desired.insert(rid.config_key(&args.prefix));
            }
            Err(_) => bad_layout.push(mirror.display().to_string()),
        }
    }
    bad_layout.sort();

    let doc = ConfigDocument::parse(&admin::read_document(&document)?);
    let drift = diff(&desired, &doc);

    let report = StatusReport {
        bad_layout,
        missing_in_config: drift.missing_in_config,
        missing_on_disk: drift.missing_on_disk,
        last_sync: inventory::read_sync_time(&base_dir),
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Last sync: {}",
        report.last_sync.as_deref().unwrap_or("never")
    );
    for path in &report.bad_layout {
        println!("{} {}", tag(output, "[BAD LAYOUT]", false), path);
    }
    for key in &report.missing_in_config {
        println!("{} {}", tag(output, "[UNCONFIGURED]", false), key);
    }
    for key in &report.missing_on_disk {
        println!("{} {}", tag(output, "[MISSING]", false), key);
    }
    if report.in_sync() {
        println!("{} mirrors and config in sync", tag(output, "[OK]", true));
    }
    Ok(())
}
