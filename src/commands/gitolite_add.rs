//! The `gitolite-add` command: upsert one mirror's stanza in the gitolite
//! config, committing and pushing only when the document actually changed.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use git_mirror::admin;
use git_mirror::document::ConfigDocument;
use git_mirror::identity::RepoId;

/// Add a mirror's read-only stanza to the gitolite config
#[derive(Args, Debug)]
pub struct GitoliteAddArgs {
    /// Upstream Git URL (ssh or https)
    pub url: String,

    /// gitolite-admin repository URL
    #[arg(long, value_name = "URL")]
    pub admin_url: Option<String>,

    /// Local path for the gitolite-admin checkout
    #[arg(long, value_name = "DIR")]
    pub admin_dir: Option<PathBuf>,

    /// Readers group or user list for the stanza
    #[arg(long, default_value = "@all")]
    pub readers: String,

    /// Path prefix inside gitolite
    #[arg(long, default_value = "mirrors")]
    pub prefix: String,

    /// Included conf filename
    #[arg(long, value_name = "FILE", default_value = "mirrors.conf")]
    pub conf_file: String,
}

/// Execute the `gitolite-add` command.
pub fn execute(args: GitoliteAddArgs) -> Result<()> {
    let rid = RepoId::resolve(&args.url)?;
    let key = rid.config_key(&args.prefix);

    let settings_base = std::env::current_dir()
        .ok()
        .and_then(|cwd| git_mirror::settings::find_base_dir(&cwd));
    let (admin_url, admin_dir) =
        super::resolve_admin(settings_base.as_deref(), args.admin_url, args.admin_dir)?;

    admin::ensure_admin_repo(&admin_url, &admin_dir)?;
    let document = admin::ensure_include(&admin_dir, &args.conf_file)?;

    let mut doc = ConfigDocument::parse(&admin::read_document(&document)?);
    let changed = doc.upsert(&key, &args.readers);
    if changed {
        admin::write_document(&document, &doc.render())?;
        admin::commit_and_push(&admin_dir, &format!("Add mirror: {}", key))?;
    }

    println!(
        "{} {} in {}",
        if changed { "UPDATED" } else { "UNCHANGED" },
        key,
        document.display()
    );
    Ok(())
}
