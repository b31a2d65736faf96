use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// Use library instead of local modules
use billionaire_insights::{
    dimension_summary, parse_top_n, run_query, selector_options, BucketScheme, Config,
    DashboardQuery, DashboardView, Dimension, GroupSummary, LoaderConfig, Record,
};

const USAGE: &str = "\
Usage: billionaire-insights [--config PATH] <command> [options]

Commands:
  top [GROUP]          Top billionaires overall or in an age group
  country COUNTRY      Top billionaires in a country
  summary DIMENSION    Group summary: age, country or gender
  groups               List age groups and countries

Options:
  --scheme fine|coarse Age bucket scheme (default from config)
  --n N                Number of rows to show
  --json               Print JSON instead of a table";

/// Parsed command line: positional words plus the shared flags
#[derive(Debug, Default)]
struct CliArgs {
    positional: Vec<String>,
    config: Option<PathBuf>,
    scheme: Option<String>,
    n: Option<String>,
    json: bool,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = CliArgs::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(PathBuf::from(next_value(&mut args, "--config")?)),
                "--scheme" => parsed.scheme = Some(next_value(&mut args, "--scheme")?),
                "--n" => parsed.n = Some(next_value(&mut args, "--n")?),
                "--json" => parsed.json = true,
                _ => parsed.positional.push(arg),
            }
        }

        Ok(parsed)
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().with_context(|| format!("{} needs a value", flag))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse(env::args().skip(1))?;
    let config = Config::load(args.config.as_deref())?;

    let scheme = match &args.scheme {
        Some(raw) => raw.parse::<BucketScheme>()?,
        None => config.dashboard.scheme,
    };
    let top_n = match &args.n {
        Some(raw) => parse_top_n(raw)?,
        None => config.dashboard.top_n,
    };

    let command = args.positional.first().map(String::as_str).unwrap_or("help");
    match command {
        "top" => {
            let records = load(&config)?;
            let group = args.positional.get(1).map(String::as_str).unwrap_or("All");
            let query = DashboardQuery::new(scheme, top_n).age_group(group);
            print_view(&run_query(&records, &query)?, args.json)?;
        }
        "country" => {
            let Some(country) = args.positional.get(1) else {
                bail!("country needs a COUNTRY argument\n\n{}", USAGE);
            };
            let records = load(&config)?;
            let query = DashboardQuery::new(scheme, top_n).country(country);
            print_view(&run_query(&records, &query)?, args.json)?;
        }
        "summary" => {
            let raw = args.positional.get(1).map(String::as_str).unwrap_or("age");
            let dimension: Dimension = raw.parse()?;
            let records = load(&config)?;
            let summary = dimension_summary(&records, dimension, scheme);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
        "groups" => {
            let records = load(&config)?;
            let options = selector_options(&records, scheme);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                println!("Age groups ({}): {}", scheme, options.age_groups.join(", "));
                println!("Countries: {}", options.countries.join(", "));
            }
        }
        "help" | "--help" | "-h" => println!("{}", USAGE),
        other => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }

    Ok(())
}

fn load(config: &Config) -> Result<Vec<Record>> {
    let loader = LoaderConfig::from(&config.dataset);
    let report = billionaire_insights::load_records(&config.dataset.path, &loader)?;
    if report.rows_dropped > 0 {
        tracing::info!(dropped = report.rows_dropped, "skipped incomplete rows");
    }
    Ok(report.records)
}

fn print_view(view: &DashboardView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    println!("📊 {}", view.title);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if view.rows.is_empty() {
        println!("No billionaires match this selection.");
        return Ok(());
    }

    println!("{:>5}  {:<36} {:>4}  {:>12}", "Rank", "Name", "Age", "NetWorth ($B)");
    for row in &view.rows {
        let age = row
            .record
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:<36} {:>4}  {:>12.1}",
            row.rank,
            row.record.name,
            age,
            row.net_worth()
        );
    }

    println!("\nBy age group ({} in scope):", view.matched);
    print_summary(&view.breakdown);
    Ok(())
}

fn print_summary(summary: &[GroupSummary]) {
    for group in summary {
        match group.total_net_worth {
            Some(total) => println!(
                "  {:<16} {:>5}  {:>6.2}%  ${:.1} B",
                group.label, group.count, group.percentage, total
            ),
            None => println!(
                "  {:<16} {:>5}  {:>6.2}%",
                group.label, group.count, group.percentage
            ),
        }
    }
}
