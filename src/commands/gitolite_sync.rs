//! The `gitolite-sync` command: reconcile the gitolite config with the
//! mirrors actually present on disk.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use log::warn;

use git_mirror::admin;
use git_mirror::document::ConfigDocument;
use git_mirror::output::{tag, OutputConfig};
use git_mirror::reconcile::reconcile;
use git_mirror::inventory;

/// Reconcile the gitolite config with on-disk mirrors
#[derive(Args, Debug)]
pub struct GitoliteSyncArgs {
    /// Base directory for mirrors
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// gitolite-admin repository URL
    #[arg(long, value_name = "URL")]
    pub admin_url: Option<String>,

    /// Local path for the gitolite-admin checkout
    #[arg(long, value_name = "DIR")]
    pub admin_dir: Option<PathBuf>,

    /// Readers group or user list applied to every stanza
    #[arg(long, default_value = "@all")]
    pub readers: String,

    /// Path prefix inside gitolite
    #[arg(long, default_value = "mirrors")]
    pub prefix: String,

    /// Included conf filename
    #[arg(long, value_name = "FILE", default_value = "mirrors.conf")]
    pub conf_file: String,

    /// Remove config entries whose mirrors are gone on disk
    #[arg(long)]
    pub prune: bool,
}

/// Execute the `gitolite-sync` command.
pub fn execute(args: GitoliteSyncArgs, output: &OutputConfig) -> Result<()> {
    let base_dir = super::resolve_base_dir(args.base_dir)?;
    let (admin_url, admin_dir) =
        super::resolve_admin(Some(&base_dir), args.admin_url, args.admin_dir)?;

    admin::ensure_admin_repo(&admin_url, &admin_dir)?;
    let document = admin::ensure_include(&admin_dir, &args.conf_file)?;

    // Materialize and sort the desired key set up front; identity failures
    // are isolated per mirror and never abort the run.
    let mut desired: BTreeSet<String> = BTreeSet::new();
    for mirror in inventory::scan(&base_dir) {
        match inventory::identity_for(&base_dir, &mirror) {
            Ok(rid) => {
                desired.insert(rid.config_key(&args.prefix));
            }
            Err(err) => warn!("skipping mirror with bad layout: {}", err),
        }
    }

    let mut doc = ConfigDocument::parse(&admin::read_document(&document)?);
    let changes = reconcile(&desired, &mut doc, &args.readers, args.prune);

    if !changes.is_empty() {
        admin::write_document(&document, &doc.render())?;
        admin::commit_and_push(&admin_dir, "Sync mirrors.conf with on-disk mirrors")?;
    }

    for key in &changes.added {
        println!("{} {}", tag(output, "[ADDED]", true), key);
    }
    for key in &changes.updated {
        println!("{} {}", tag(output, "[UPDATED]", true), key);
    }
    for key in &changes.pruned {
        println!("{} {}", tag(output, "[PRUNED]", false), key);
    }
    if changes.is_empty() {
        println!(
            "{} {} already in sync",
            tag(output, "[OK]", true),
            args.conf_file
        );
    }
    Ok(())
}
