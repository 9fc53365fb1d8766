// src/main.rs
// =============================================================================
// Entry point of codecommit-explorer.
//
// What happens here:
// 1. Set up logging (tracing, to stderr; RUST_LOG picks the level)
// 2. Load .env, then parse command-line arguments using clap
// 3. Build the application context with the AWS connector
// 4. Dispatch to the subcommand handler and print its output
// 5. Exit with 0 = success, 1 = selection warning, 2 = error
// =============================================================================

mod app;
mod cli;
mod codecommit;
mod config;
mod error;
mod explorer;
mod server;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use app::AppContext;
use cli::{Cli, Commands};
use codecommit::AwsConnector;
use explorer::{SelectionOutcome, TreeNode};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // A .env may set AWS_PROFILE / AWS_REGION before clap reads them
    config::load_env_file();
    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    let ctx = Arc::new(AppContext::new(
        Arc::new(AwsConnector),
        cli.connection_settings(),
    ));

    match cli.command {
        Commands::Repos { json } => handle_repos(&ctx, json).await,
        Commands::Tree { repository, json } => handle_tree(&ctx, &repository, json).await,
        Commands::Show { repository, paths } => handle_show(&ctx, &repository, &paths).await,
        Commands::Serve { bind } => {
            server::serve(ctx, bind).await?;
            Ok(0)
        }
    }
}

// The CLI has no form: it always connects with what clap collected
async fn connect(ctx: &AppContext) -> Result<()> {
    let settings = ctx.defaults().clone();
    ctx.connect(&settings)
        .await
        .context("could not connect to CodeCommit")
}

async fn handle_repos(ctx: &AppContext, json: bool) -> Result<i32> {
    connect(ctx).await?;
    let repositories = ctx.repositories().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(repositories.as_ref())?);
    } else {
        for repo in repositories.iter() {
            println!("{}", repo.name);
        }
    }

    Ok(0)
}

async fn handle_tree(ctx: &AppContext, repository: &str, json: bool) -> Result<i32> {
    connect(ctx).await?;
    let tree = ctx
        .explore(repository)
        .await
        .with_context(|| format!("could not walk repository '{}'", repository))?;

    if json {
        // the tree widget takes a list of roots
        println!("{}", serde_json::to_string_pretty(&[tree.as_ref()])?);
    } else {
        print!("{}", render_tree(&tree));
    }

    Ok(0)
}

async fn handle_show(ctx: &AppContext, repository: &str, paths: &[String]) -> Result<i32> {
    connect(ctx).await?;

    match ctx.select(repository, paths).await? {
        SelectionOutcome::Halt => Ok(0),
        SelectionOutcome::Warning { message } => {
            eprintln!("⚠️  {}", message);
            Ok(1)
        }
        SelectionOutcome::View(view) => {
            println!("# {} ({})", view.path, view.language);
            print!("{}", view.content);
            if !view.content.ends_with('\n') {
                println!();
            }
            Ok(0)
        }
    }
}

// Indented listing: two spaces per level, folders end with '/'
fn render_tree(root: &TreeNode) -> String {
    fn walk(node: &TreeNode, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.label);
        if node.is_folder() {
            out.push('/');
        }
        out.push('\n');

        for child in node.children.iter().flatten() {
            walk(child, depth + 1, out);
        }
    }

    let mut out = String::new();
    walk(root, 0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tree() {
        let tree = TreeNode::folder(
            "repo",
            "repo",
            vec![
                TreeNode::folder("src", "src", vec![TreeNode::file("main.rs", "src/main.rs")]),
                TreeNode::file("README.md", "README.md"),
            ],
        );

        assert_eq!(render_tree(&tree), "repo/\n  src/\n    main.rs\n  README.md\n");
    }
}
