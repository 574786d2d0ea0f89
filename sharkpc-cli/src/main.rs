//! SharkPC CLI - browse parts, check builds and rank community builds from the command line.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use sharkpc::{
    format_price, Catalog, CatalogQuery, CompatibilityReport, ComponentType, Configurator,
    ConfiguratorOptions, RulesEngine, SortKey,
};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "sharkpc")]
#[command(about = "PC build configurator with compatibility checks", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file with configurator options
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON file replacing the built-in component catalog
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog components
    Catalog {
        /// Only show components of this type (cpu, gpu, motherboard, ...)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        component_type: Option<ComponentType>,

        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Check a set of components for compatibility
    Check {
        /// Component ids, e.g. cpu1 mb1 gpu1
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if any compatibility issue is found
        #[arg(long)]
        fail_on_issues: bool,

        /// Override the simulated check latency
        #[arg(long, value_name = "MS")]
        latency_ms: Option<u64>,
    },

    /// List community builds, most liked first
    Builds {
        /// Like a build before listing (repeatable)
        #[arg(long, value_name = "BUILD_ID")]
        like: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List compatibility rules
    Rules {
        /// Show rule severities
        #[arg(short, long)]
        details: bool,
    },

    /// List supported marketplaces
    Marketplaces,

    /// Prepare a marketplace search for a set of components
    Search {
        /// Marketplace id (ozon, wildberries, yandex, dns)
        #[arg(short, long)]
        marketplace: String,

        /// Component ids
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[derive(Clone, ValueEnum)]
enum SortArg {
    Price,
    Name,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Price => SortKey::Price,
            SortArg::Name => SortKey::Name,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut options = load_options(cli.config.as_deref())?;
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Catalog {
            component_type,
            search,
            sort,
            format,
        } => {
            let query = CatalogQuery {
                component_type,
                text: search,
                sort: sort.map(SortKey::from),
            };
            handle_catalog(&catalog, &query, &format)?;
            Ok(0)
        }
        Commands::Check {
            ids,
            format,
            fail_on_issues,
            latency_ms,
        } => {
            if let Some(ms) = latency_ms {
                options.check_latency_ms = ms;
            }
            let configurator = Configurator::with_catalog(catalog, options);
            handle_check(configurator, &ids, &format, fail_on_issues).await
        }
        Commands::Builds { like, format } => {
            let mut configurator = Configurator::with_catalog(catalog, options)
                .with_builtin_builds()
                .context("failed to load community builds")?;
            handle_builds(&mut configurator, &like, &format)?;
            Ok(0)
        }
        Commands::Rules { details } => {
            handle_rules(&options, details);
            Ok(0)
        }
        Commands::Marketplaces => {
            let configurator = Configurator::with_catalog(catalog, options);
            for marketplace in configurator.marketplaces() {
                println!("  {:<12} {}", marketplace.id, marketplace.name);
            }
            Ok(0)
        }
        Commands::Search { marketplace, ids } => {
            let mut configurator = Configurator::with_catalog(catalog, options);
            for id in &ids {
                configurator.pick(id)?;
            }
            configurator.choose_marketplace(&marketplace)?;
            let request = configurator.search_marketplace()?;
            println!("{}", request.label());
            for query in &request.queries {
                println!("  - {}", query);
            }
            println!("Marketplace search is not available yet.");
            Ok(0)
        }
    }
}

fn load_options(path: Option<&Path>) -> anyhow::Result<ConfiguratorOptions> {
    match path {
        Some(path) => ConfiguratorOptions::from_file(path)
            .with_context(|| format!("failed to load options from {}", path.display())),
        None => Ok(ConfiguratorOptions::default()),
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => Catalog::load_from_file(path)
            .with_context(|| format!("failed to load catalog from {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

fn handle_catalog(catalog: &Catalog, query: &CatalogQuery, format: &OutputFormat) -> anyhow::Result<()> {
    let components = catalog.query(query);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&components)?);
        }
        OutputFormat::Human => {
            if components.is_empty() {
                println!("No components found");
            }
            for component_type in ComponentType::ALL {
                let group: Vec<_> = components
                    .iter()
                    .filter(|c| c.component_type == component_type)
                    .collect();
                if group.is_empty() {
                    continue;
                }
                println!("\n{}:", component_type.label());
                for component in group {
                    println!(
                        "  {:<10} {:<28} {:>10}  {}",
                        component.id,
                        component.name,
                        format_price(component.price),
                        component.spec_line()
                    );
                }
            }
        }
    }
    Ok(())
}

async fn handle_check(
    mut configurator: Configurator,
    ids: &[String],
    format: &OutputFormat,
    fail_on_issues: bool,
) -> anyhow::Result<i32> {
    for id in ids {
        configurator.pick(id)?;
    }

    if matches!(format, OutputFormat::Human) {
        println!("Checking compatibility...");
    }
    let report = configurator.check_compatibility().await?;

    match format {
        OutputFormat::Human => output_human(&configurator, &report),
        OutputFormat::Json => output_json(&configurator, &report)?,
    }

    if fail_on_issues && !report.ok {
        return Ok(1);
    }
    Ok(0)
}

fn output_human(configurator: &Configurator, report: &CompatibilityReport) {
    println!("\nBuild");
    println!("{}", "─".repeat(60));
    for component in configurator.selection().iter() {
        println!(
            "  {:<14} {:<28} {:>10}",
            component.component_type.label(),
            component.name,
            format_price(component.price)
        );
    }
    println!("  {:<43} {:>10}", "Total", format_price(configurator.total_price()));

    if report.ok {
        println!("\n  All components are compatible");
        return;
    }

    println!("\n  PROBLEMS:");
    for issue in &report.issues {
        println!("    - {}", issue.message);
        if let Some(ref suggestion) = issue.suggestion {
            println!("      Suggestion: {}", suggestion);
        }
    }
}

fn output_json(configurator: &Configurator, report: &CompatibilityReport) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "components": configurator.selection().components(),
        "total_price": configurator.total_price(),
        "ok": report.ok,
        "issues": report.issues,
        "checked_at": report.checked_at,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn handle_builds(configurator: &mut Configurator, like: &[String], format: &OutputFormat) -> anyhow::Result<()> {
    for build_id in like {
        if configurator.like_build(build_id).is_none() {
            tracing::debug!("No build {} to like", build_id);
        }
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(configurator.builds())?);
        }
        OutputFormat::Human => {
            for build in configurator.builds() {
                let badge = if build.is_compatible { "compatible" } else { "problems" };
                println!("\n{} ({})", build.name, build.id);
                println!("  by {} · {} likes · {}", build.author, build.likes, badge);
                let (shown, rest) = build.preview(4);
                for component in shown {
                    println!("    {:<28} {:>10}", component.name, format_price(component.price));
                }
                if rest > 0 {
                    println!("    +{} more components", rest);
                }
                println!("  Total: {}", format_price(build.total_price));
            }
        }
    }
    Ok(())
}

fn handle_rules(options: &ConfiguratorOptions, details: bool) {
    println!("Available compatibility rules:\n");

    let engine = RulesEngine::with_power_margin(options.power_margin_watts);
    for rule in engine.rules() {
        println!("  {}", rule.id());
        println!("    {}", rule.name());
        if details {
            println!("    Severity: {:?}", rule.severity());
        }
        println!();
    }
}
