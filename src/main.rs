//! Lumen command-line host.
//!
//! Resolves one query and prints the results; optionally runs one of them.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lumen::{executor, platform, Config, ExecutionAction, QueryEngine};

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Resolve launcher queries into actionable results", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/lumen/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Resolve an icon name to a file path and exit
    #[arg(long, value_name = "NAME")]
    icon: Option<String>,

    /// Run the Nth result (1-based) after resolving
    #[arg(long, value_name = "N")]
    run: Option<usize>,

    /// The query; words are joined with single spaces
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };
    let engine = QueryEngine::new(config).context("Failed to build query engine")?;
    engine.prefetch_rates();

    if let Some(name) = &cli.icon {
        match engine.icon_path(name) {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("No icon named {}", name),
        }
        return Ok(());
    }

    let query = cli.query.join(" ");
    let results = engine.resolve(&query).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for (i, item) in results.iter().enumerate() {
            println!("{:>2}. {}  ({})", i + 1, item.title, item.description);
        }
    }

    if let Some(n) = cli.run {
        let item = n
            .checked_sub(1)
            .and_then(|i| results.get(i))
            .with_context(|| format!("No result #{}", n))?;
        let action = ExecutionAction::from(item);
        tracing::debug!(?action, "Executing result");
        executor::execute(&action, platform::current().as_ref())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_may_start_with_a_hyphen() {
        let cli = Cli::try_parse_from(["lumen", "-5", "+", "3"]).unwrap();
        assert_eq!(cli.query, ["-5", "+", "3"]);
        assert!(!cli.json);
    }

    #[test]
    fn test_flags_before_query() {
        let cli = Cli::try_parse_from(["lumen", "--json", "--run", "2", "g", "rust"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.run, Some(2));
        assert_eq!(cli.query, ["g", "rust"]);

        // Once the query starts, later words belong to it
        let cli = Cli::try_parse_from(["lumen", "2", "--json"]).unwrap();
        assert!(!cli.json);
        assert_eq!(cli.query, ["2", "--json"]);
    }
}
