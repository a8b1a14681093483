use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "silt",
    about = "silt — a content-addressed local version-control engine",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a new silt repository
    Init(InitArgs),
    /// Stage a file for the next commit
    Add(AddArgs),
    /// Stage a file for removal
    Rm(RmArgs),
    /// Commit the staged changes
    Commit(CommitArgs),
    /// Show first-parent history from HEAD
    Log(LogArgs),
    /// Show every commit in the repository
    #[command(name = "global-log")]
    GlobalLog(GlobalLogArgs),
    /// Find commits by message substring
    Find(FindArgs),
    /// Show branches, staged changes, and working-tree drift
    Status(StatusArgs),
    /// Switch branches, or restore a file's committed version
    Checkout(CheckoutArgs),
    /// Create a branch at the current head
    Branch(BranchArgs),
    /// Delete a branch pointer
    #[command(name = "rm-branch")]
    RmBranch(RmBranchArgs),
    /// Restore a commit's snapshot and move the current branch to it
    Reset(ResetArgs),
    /// Merge a branch into the current branch
    Merge(MergeArgs),
    /// Show line changes for a file
    Diff(DiffArgs),
    /// Record the path of another repository as a remote
    #[command(name = "add-remote")]
    AddRemote(AddRemoteArgs),
    /// Forget a remote
    #[command(name = "rm-remote")]
    RmRemote(RmRemoteArgs),
    /// Push a branch to a remote (fast-forward only)
    Push(SyncArgs),
    /// Fetch a remote branch into <remote>/<branch>
    Fetch(SyncArgs),
    /// Fetch, then merge the tracking branch
    Pull(SyncArgs),
}

#[derive(Args)]
pub struct InitArgs {
    pub path: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    pub file: String,
}

#[derive(Args)]
pub struct RmArgs {
    pub file: String,
}

#[derive(Args)]
pub struct CommitArgs {
    #[arg(short, long)]
    pub message: String,
}

#[derive(Args)]
pub struct LogArgs {}

#[derive(Args)]
pub struct GlobalLogArgs {}

#[derive(Args)]
pub struct FindArgs {
    pub message: String,
}

#[derive(Args)]
pub struct StatusArgs {}

#[derive(Args)]
pub struct CheckoutArgs {
    /// Branch to switch to
    #[arg(conflicts_with_all = ["file", "commit"])]
    pub branch: Option<String>,

    /// Restore this file instead of switching branches
    #[arg(long)]
    pub file: Option<String>,

    /// Take the file's version from this commit instead of HEAD
    #[arg(long, requires = "file")]
    pub commit: Option<String>,
}

#[derive(Args)]
pub struct BranchArgs {
    pub name: String,
}

#[derive(Args)]
pub struct RmBranchArgs {
    pub name: String,
}

#[derive(Args)]
pub struct ResetArgs {
    pub commit: String,
}

#[derive(Args)]
pub struct MergeArgs {
    pub branch: String,
}

#[derive(Args)]
pub struct DiffArgs {
    pub file: String,

    /// Old side: a commit id or prefix (defaults to HEAD)
    #[arg(long)]
    pub from: Option<String>,

    /// New side: a commit id or prefix (defaults to the working tree)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Args)]
pub struct AddRemoteArgs {
    pub name: String,
    pub path: String,
}

#[derive(Args)]
pub struct RmRemoteArgs {
    pub name: String,
}

#[derive(Args)]
pub struct SyncArgs {
    pub remote: String,
    pub branch: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["silt", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init(_)));
    }

    #[test]
    fn parse_add() {
        let cli = Cli::try_parse_from(["silt", "add", "notes.txt"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.file, "notes.txt");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_commit() {
        let cli = Cli::try_parse_from(["silt", "commit", "-m", "hello"]).unwrap();
        if let Command::Commit(args) = cli.command {
            assert_eq!(args.message, "hello");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn commit_requires_a_message() {
        assert!(Cli::try_parse_from(["silt", "commit"]).is_err());
    }

    #[test]
    fn parse_global_log() {
        let cli = Cli::try_parse_from(["silt", "global-log"]).unwrap();
        assert!(matches!(cli.command, Command::GlobalLog(_)));
    }

    #[test]
    fn parse_checkout_branch() {
        let cli = Cli::try_parse_from(["silt", "checkout", "side"]).unwrap();
        if let Command::Checkout(args) = cli.command {
            assert_eq!(args.branch, Some("side".into()));
            assert!(args.file.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_checkout_file_at_commit() {
        let cli =
            Cli::try_parse_from(["silt", "checkout", "--file", "x", "--commit", "abcd1234"])
                .unwrap();
        if let Command::Checkout(args) = cli.command {
            assert_eq!(args.file, Some("x".into()));
            assert_eq!(args.commit, Some("abcd1234".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn checkout_branch_and_file_conflict() {
        assert!(Cli::try_parse_from(["silt", "checkout", "side", "--file", "x"]).is_err());
    }

    #[test]
    fn checkout_commit_requires_file() {
        assert!(Cli::try_parse_from(["silt", "checkout", "--commit", "abcd1234"]).is_err());
    }

    #[test]
    fn parse_rm_branch() {
        let cli = Cli::try_parse_from(["silt", "rm-branch", "old"]).unwrap();
        if let Command::RmBranch(args) = cli.command {
            assert_eq!(args.name, "old");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_diff_between_commits() {
        let cli =
            Cli::try_parse_from(["silt", "diff", "x", "--from", "aaaa1111", "--to", "bbbb2222"])
                .unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.file, "x");
            assert_eq!(args.from, Some("aaaa1111".into()));
            assert_eq!(args.to, Some("bbbb2222".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_add_remote() {
        let cli = Cli::try_parse_from(["silt", "add-remote", "origin", "/repos/other"]).unwrap();
        if let Command::AddRemote(args) = cli.command {
            assert_eq!(args.name, "origin");
            assert_eq!(args.path, "/repos/other");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_push() {
        let cli = Cli::try_parse_from(["silt", "push", "origin", "master"]).unwrap();
        if let Command::Push(args) = cli.command {
            assert_eq!(args.remote, "origin");
            assert_eq!(args.branch, "master");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["silt", "--verbose", "status"]).unwrap();
        assert!(cli.verbose);
    }
}
