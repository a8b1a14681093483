use anyhow::bail;
use chrono::{DateTime, Utc};
use colored::Colorize;
use silt_repo::Repository;
use silt_store::Commit;
use silt_types::ObjectId;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Init(args) => cmd_init(args),
        Command::Add(args) => cmd_add(args),
        Command::Rm(args) => cmd_rm(args),
        Command::Commit(args) => cmd_commit(args),
        Command::Log(_) => cmd_log(),
        Command::GlobalLog(_) => cmd_global_log(),
        Command::Find(args) => cmd_find(args),
        Command::Status(_) => cmd_status(),
        Command::Checkout(args) => cmd_checkout(args),
        Command::Branch(args) => cmd_branch(args),
        Command::RmBranch(args) => cmd_rm_branch(args),
        Command::Reset(args) => cmd_reset(args),
        Command::Merge(args) => cmd_merge(args),
        Command::Diff(args) => cmd_diff(args),
        Command::AddRemote(args) => cmd_add_remote(args),
        Command::RmRemote(args) => cmd_rm_remote(args),
        Command::Push(args) => cmd_push(args),
        Command::Fetch(args) => cmd_fetch(args),
        Command::Pull(args) => cmd_pull(args),
    }
}

fn open() -> anyhow::Result<Repository> {
    Ok(Repository::open(std::env::current_dir()?)?)
}

fn format_date(when: &DateTime<Utc>) -> String {
    when.format("%a %b %-d %H:%M:%S %Y %z").to_string()
}

fn print_commit(id: &ObjectId, commit: &Commit) {
    println!("===");
    println!("commit {}", id.to_hex().yellow());
    if let (Some(parent), Some(merge_parent)) = (&commit.parent, &commit.merge_parent) {
        println!("Merge: {} {}", parent.short_hex(), merge_parent.short_hex());
    }
    println!("Date: {}", format_date(&commit.timestamp));
    println!("{}", commit.message);
    println!();
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let path = match args.path {
        Some(path) => std::path::PathBuf::from(path),
        None => std::env::current_dir()?,
    };
    let repo = Repository::init(path)?;
    println!(
        "{} Initialized empty silt repository in {}",
        "✓".green().bold(),
        repo.root().display().to_string().bold()
    );
    println!("  Branch: {}", silt_repo::DEFAULT_BRANCH.yellow());
    Ok(())
}

fn cmd_add(args: AddArgs) -> anyhow::Result<()> {
    open()?.add(&args.file)?;
    Ok(())
}

fn cmd_rm(args: RmArgs) -> anyhow::Result<()> {
    open()?.rm(&args.file)?;
    Ok(())
}

fn cmd_commit(args: CommitArgs) -> anyhow::Result<()> {
    let id = open()?.commit(&args.message)?;
    println!("[{}] {}", id.short_hex().yellow(), args.message);
    Ok(())
}

fn cmd_log() -> anyhow::Result<()> {
    let repo = open()?;
    for (id, commit) in repo.log()? {
        print_commit(&id, &commit);
    }
    Ok(())
}

fn cmd_global_log() -> anyhow::Result<()> {
    let repo = open()?;
    for (id, commit) in repo.global_log()? {
        print_commit(&id, &commit);
    }
    Ok(())
}

fn cmd_find(args: FindArgs) -> anyhow::Result<()> {
    let ids = open()?.find(&args.message)?;
    if ids.is_empty() {
        println!("Found no commit with that message.");
        return Ok(());
    }
    for id in ids {
        println!("{}", id.to_hex());
    }
    Ok(())
}

fn cmd_status() -> anyhow::Result<()> {
    let report = open()?.status()?;

    println!("=== Branches ===");
    for branch in &report.branches {
        if report.current_branch.as_deref() == Some(branch) {
            println!("*{}", branch.green().bold());
        } else {
            println!("{branch}");
        }
    }

    println!("\n=== Staged Files ===");
    for name in &report.staged {
        println!("{}", name.green());
    }

    println!("\n=== Removed Files ===");
    for name in &report.removed {
        println!("{}", name.red());
    }

    println!("\n=== Modifications Not Staged For Commit ===");
    for (name, state) in &report.unstaged {
        println!("{name} ({state})");
    }

    println!("\n=== Untracked Files ===");
    for name in &report.untracked {
        println!("{name}");
    }

    Ok(())
}

fn cmd_checkout(args: CheckoutArgs) -> anyhow::Result<()> {
    let repo = open()?;
    match (args.branch, args.file) {
        (Some(branch), None) => {
            repo.checkout_branch(&branch)?;
            println!("Switched to {}", branch.yellow().bold());
        }
        (None, Some(file)) => match args.commit {
            Some(spec) => repo.checkout_file_at(&spec, &file)?,
            None => repo.checkout_file(&file)?,
        },
        _ => bail!("specify a branch to switch to, or --file to restore a file"),
    }
    Ok(())
}

fn cmd_branch(args: BranchArgs) -> anyhow::Result<()> {
    open()?.branch(&args.name)?;
    println!("Created branch {}", args.name.yellow());
    Ok(())
}

fn cmd_rm_branch(args: RmBranchArgs) -> anyhow::Result<()> {
    open()?.rm_branch(&args.name)?;
    println!("Deleted branch {}", args.name.yellow());
    Ok(())
}

fn cmd_reset(args: ResetArgs) -> anyhow::Result<()> {
    let id = open()?.reset(&args.commit)?;
    println!("HEAD is now at {}", id.short_hex().yellow());
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let repo = open()?;
    let outcome = repo.merge(&args.branch)?;
    if outcome.conflicts.is_empty() {
        println!(
            "{} {}",
            "✓".green().bold(),
            repo.read_commit(&outcome.commit_id)?.message
        );
    } else {
        println!("Encountered a merge conflict.");
        for name in &outcome.conflicts {
            println!("  {}", name.red());
        }
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let repo = open()?;

    let old = match &args.from {
        Some(spec) => {
            let commit = repo.read_commit(&repo.resolve_commit(spec)?)?;
            repo.blob_bytes_at(&commit, &args.file)?
        }
        None => repo.blob_bytes_at(&repo.head_commit()?, &args.file)?,
    };
    let new = match &args.to {
        Some(spec) => {
            let commit = repo.read_commit(&repo.resolve_commit(spec)?)?;
            repo.blob_bytes_at(&commit, &args.file)?
        }
        None => repo.working_bytes(&args.file)?,
    };

    let diff = silt_diff::diff_versions(old.as_deref(), new.as_deref());
    let text = silt_diff::unified(&diff, &format!("a/{}", args.file), &format!("b/{}", args.file));
    for line in text.lines() {
        if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
    Ok(())
}

fn cmd_add_remote(args: AddRemoteArgs) -> anyhow::Result<()> {
    let repo = open()?;
    silt_remote::add_remote(&repo, &args.name, std::path::Path::new(&args.path))?;
    println!("Added remote {} -> {}", args.name.bold(), args.path.blue());
    Ok(())
}

fn cmd_rm_remote(args: RmRemoteArgs) -> anyhow::Result<()> {
    let repo = open()?;
    silt_remote::rm_remote(&repo, &args.name)?;
    println!("Removed remote {}", args.name.bold());
    Ok(())
}

fn cmd_push(args: SyncArgs) -> anyhow::Result<()> {
    let repo = open()?;
    let tip = silt_remote::push(&repo, &args.remote, &args.branch)?;
    println!(
        "Pushed {} to {} ({})",
        args.branch.yellow(),
        args.remote.bold(),
        tip.short_hex()
    );
    Ok(())
}

fn cmd_fetch(args: SyncArgs) -> anyhow::Result<()> {
    let repo = open()?;
    let tip = silt_remote::fetch(&repo, &args.remote, &args.branch)?;
    println!(
        "Fetched {}/{} ({})",
        args.remote.bold(),
        args.branch.yellow(),
        tip.short_hex()
    );
    Ok(())
}

fn cmd_pull(args: SyncArgs) -> anyhow::Result<()> {
    let repo = open()?;
    let outcome = silt_remote::pull(&repo, &args.remote, &args.branch)?;
    if outcome.conflicts.is_empty() {
        println!(
            "{} Pulled {}/{}",
            "✓".green().bold(),
            args.remote.bold(),
            args.branch.yellow()
        );
    } else {
        println!("Encountered a merge conflict.");
        for name in &outcome.conflicts {
            println!("  {}", name.red());
        }
    }
    Ok(())
}
