mod config;
mod github;
mod render;
mod tree;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use config::{ClientConfig, RenderOptions, RepoId};
use github::pulls::PullState;
use tree::{PrTree, UntrackedBase};

const ABOUT: &str = "Show a tree view of GitHub Pull Requests based on their merge targets";

const LONG_ABOUT: &str = "\
Show a tree view of GitHub Pull Requests based on their merge targets.

Optionally takes a GitHub access token from the environment variable \
'GITHUB_ACCESS_TOKEN' (or 'GITHUB_TOKEN') to have less strict rate limiting. \
This program only needs read-only access.";

#[derive(Parser)]
#[command(name = "pr-tree", version = env!("PR_TREE_VERSION"))]
#[command(about = ABOUT, long_about = LONG_ABOUT)]
struct Cli {
    /// The repository (e.g. NLnetLabs/domain)
    repository: String,

    /// Print URLs to the PRs
    #[arg(short, long)]
    urls: bool,

    /// Group PRs whose base branch has no PR under a node for that branch instead of failing
    #[arg(short, long)]
    attach_untracked: bool,

    /// Only list open PRs
    #[arg(long)]
    open_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    // ネットワークアクセスの前にリポジトリ指定を検証する
    let repo: RepoId = match cli.repository.parse() {
        Ok(repo) => repo,
        Err(e) => {
            println!("Error: {e}");
            std::process::exit(1);
        }
    };

    let client = github::client::create_client(&ClientConfig::from_env())?;
    eprintln!("Fetching pull requests for {repo}...");

    let info = github::repo::fetch_repo(&client, &repo.owner, &repo.name)
        .await
        .wrap_err_with(|| format!("Failed to fetch repository {repo}"))?;

    let state = if cli.open_only {
        PullState::Open
    } else {
        PullState::All
    };
    let pulls = github::pulls::fetch_pulls(&client, &repo.owner, &repo.name, state)
        .await
        .wrap_err_with(|| format!("Failed to fetch pull requests for {repo}"))?;
    eprintln!("Fetched {} pull requests", pulls.len());

    let untracked = if cli.attach_untracked {
        UntrackedBase::Attach
    } else {
        UntrackedBase::Fail
    };
    let tree = PrTree::assemble(
        format!("Pull Requests for {repo}"),
        &info.default_branch_label(),
        pulls,
        untracked,
    )?;
    log::debug!("assembled tree with {} nodes", tree.len());

    let mut stdout = std::io::stdout().lock();
    render::render_tree(&mut stdout, &tree, RenderOptions { print_urls: cli.urls })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["pr-tree", "NLnetLabs/domain", "-u", "--open-only"]).unwrap();
        assert_eq!(cli.repository, "NLnetLabs/domain");
        assert!(cli.urls);
        assert!(cli.open_only);
        assert!(!cli.attach_untracked);
    }

    #[test]
    fn test_cli_long_flags() {
        let cli =
            Cli::try_parse_from(["pr-tree", "owner/repo", "--urls", "--attach-untracked"]).unwrap();
        assert!(cli.urls);
        assert!(cli.attach_untracked);
    }

    #[test]
    fn test_cli_requires_repository() {
        assert!(Cli::try_parse_from(["pr-tree"]).is_err());
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
