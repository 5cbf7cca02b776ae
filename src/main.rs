#![allow(dead_code)]

use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;
use anyhow::Result;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;

#[derive(Parser)]
#[command(
    name = "gitlite",
    version = "0.1.0",
    about = "A miniature snapshot-based version-control system",
    long_about = "Gitlite records snapshots of a working directory, organizes \
    them into a commit graph with named branches, reconstructs past states, \
    and synchronizes snapshots with peer repositories on the local filesystem."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Create a repository in the current directory")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(name = "commit", about = "Record a snapshot of the staged changes")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Stage a file for removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "log", about = "Show the current branch's history")]
    Log,
    #[command(name = "global-log", about = "Show every commit in the repository")]
    GlobalLog,
    #[command(name = "find", about = "Print ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to search for")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes, and untracked files")]
    Status,
    #[command(
        name = "checkout",
        about = "Check out a branch, or restore a file with `[<commit-id>] -- <file>`"
    )]
    Checkout {
        #[arg(help = "Branch name, or commit id when restoring a file")]
        target: Option<String>,
        #[arg(last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "reset", about = "Check out an arbitrary commit and move the branch to it")]
    Reset {
        #[arg(index = 1, help = "The commit id")]
        commit_id: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge from")]
        branch: String,
    },
    #[command(name = "add-remote", about = "Register a peer repository by path")]
    AddRemote {
        #[arg(index = 1, help = "The remote name")]
        name: String,
        #[arg(index = 2, help = "Path to the peer's working directory")]
        path: String,
    },
    #[command(name = "rm-remote", about = "Forget a registered peer")]
    RmRemote {
        #[arg(index = 1, help = "The remote name")]
        name: String,
    },
    #[command(name = "push", about = "Append local history to a peer's branch")]
    Push {
        #[arg(index = 1, help = "The remote name")]
        remote: String,
        #[arg(index = 2, help = "The branch name")]
        branch: String,
    },
    #[command(name = "fetch", about = "Copy a peer branch's history into this repository")]
    Fetch {
        #[arg(index = 1, help = "The remote name")]
        remote: String,
        #[arg(index = 2, help = "The branch name")]
        branch: String,
    },
    #[command(name = "pull", about = "Fetch a peer branch and merge it")]
    Pull {
        #[arg(index = 1, help = "The remote name")]
        remote: String,
        #[arg(index = 2, help = "The branch name")]
        branch: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        match error.downcast_ref::<UserError>() {
            Some(user_error) => println!("{user_error}"),
            None => eprintln!("{error:#}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let pwd = std::env::current_dir()?;
    let repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

    if !matches!(cli.command, Commands::Init) && !repository.is_initialized() {
        anyhow::bail!(UserError::NotInitialized);
    }

    match &cli.command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(file),
        Commands::Commit { message } => repository.commit(message),
        Commands::Rm { file } => repository.rm(file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(message),
        Commands::Status => repository.status(),
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => repository.checkout_file(file),
            (Some(commit_id), Some(file)) => repository.checkout_file_from_commit(commit_id, file),
            (Some(branch), None) => repository.checkout_branch(branch),
            (None, None) => anyhow::bail!("Incorrect operands."),
        },
        Commands::Branch { name } => repository.branch(name),
        Commands::RmBranch { name } => repository.rm_branch(name),
        Commands::Reset { commit_id } => repository.reset(commit_id),
        Commands::Merge { branch } => repository.merge(branch),
        Commands::AddRemote { name, path } => repository.add_remote(name, path),
        Commands::RmRemote { name } => repository.rm_remote(name),
        Commands::Push { remote, branch } => repository.push(remote, branch),
        Commands::Fetch { remote, branch } => repository.fetch(remote, branch),
        Commands::Pull { remote, branch } => repository.pull(remote, branch),
    }
}
