mod provenance;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use geofixture::bounds::Interval;
use geofixture::config::FixtureConfig;
use geofixture::count::CountRange;
use geofixture::registry::{Fixture, Registry, TypeKey};
use geofixture::sample::ReplayToken;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "geofixture")]
#[command(about = "Constrained random geometry fixtures as JSON")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the registered type keys
    Kinds,
    /// Generate fixtures of one kind as a JSON array
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Type key, e.g. `polygon` (see `kinds`)
    #[arg(long)]
    kind: TypeKey,
    #[arg(long, default_value_t = 1)]
    count: u64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// JSON file with session overrides; flags below win over it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_parser = parse_interval, allow_hyphen_values = true)]
    x_range: Option<Interval>,
    #[arg(long, value_parser = parse_interval, allow_hyphen_values = true)]
    y_range: Option<Interval>,
    #[arg(long, value_parser = parse_interval, allow_hyphen_values = true)]
    z_range: Option<Interval>,
    /// Measure range for `coordinate_xym` and `coordinate_xyzm`
    #[arg(long, value_parser = parse_interval, allow_hyphen_values = true)]
    m_range: Option<Interval>,
    /// `n` or `min,max`
    #[arg(long, value_parser = parse_count)]
    vertices: Option<CountRange>,
    /// `n` or `min,max`
    #[arg(long, value_parser = parse_count)]
    members: Option<CountRange>,
    #[arg(long, value_parser = parse_interval, allow_hyphen_values = true)]
    radius_range: Option<Interval>,
    /// Write here (plus a provenance sidecar) instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

impl GenerateArgs {
    fn overrides(&self) -> FixtureConfig {
        FixtureConfig {
            x_range: self.x_range,
            y_range: self.y_range,
            z_range: self.z_range,
            m_range: self.m_range,
            vertices: self.vertices,
            members: self.members,
            radius_range: self.radius_range,
            ..Default::default()
        }
    }

    fn resolved_config(&self) -> Result<FixtureConfig> {
        let base = match &self.config {
            Some(path) => load_config(path)?,
            None => FixtureConfig::default(),
        };
        Ok(base.merge(self.overrides()))
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Kinds => kinds(),
        Action::Generate(args) => generate(args),
    }
}

fn kinds() -> Result<()> {
    let registry = Registry::with_defaults();
    tracing::info!(registered = registry.len(), "kinds");
    for key in registry.keys() {
        println!("{key}");
    }
    Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = args.resolved_config()?;
    let registry = Registry::from_config(&config);
    tracing::info!(
        kind = %args.kind,
        count = args.count,
        seed = args.seed,
        out = ?args.out,
        "generate"
    );
    let fixtures = render(&registry, args.kind, args.seed, args.count)?;
    let body = serde_json::to_string_pretty(&fixtures)?;

    let Some(out) = &args.out else {
        println!("{body}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, body).with_context(|| format!("writing {}", out.display()))?;

    let params = serde_json::json!({
        "kind": args.kind,
        "seed": args.seed,
        "count": args.count,
        "config": config,
    });
    let replay = (0..args.count)
        .map(|index| ReplayToken {
            seed: args.seed,
            index,
        })
        .collect();
    write_sidecar(out, Payload::new(params).with_replay(replay))?;
    Ok(())
}

/// Fixture `i` is drawn from `ReplayToken { seed, index: i }`, so any single
/// fixture can be regenerated without the ones before it.
fn render(registry: &Registry, kind: TypeKey, seed: u64, count: u64) -> Result<Vec<Fixture>> {
    (0..count)
        .map(|index| {
            let mut rng = ReplayToken { seed, index }.rng();
            registry
                .generate(kind, &mut rng)
                .with_context(|| format!("no generator registered for `{kind}`"))?
                .with_context(|| format!("generating {kind} #{index}"))
        })
        .collect()
}

fn load_config(path: &Path) -> Result<FixtureConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn parse_pair<T: std::str::FromStr>(s: &str) -> Result<(T, T), String>
where
    T::Err: std::fmt::Display,
{
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `min,max`, got `{s}`"))?;
    let parse = |v: &str| v.trim().parse::<T>().map_err(|e| format!("`{v}`: {e}"));
    Ok((parse(a)?, parse(b)?))
}

fn parse_interval(s: &str) -> Result<Interval, String> {
    parse_pair::<f64>(s).map(|(low, high)| Interval::new(low, high))
}

fn parse_count(s: &str) -> Result<CountRange, String> {
    if !s.contains(',') {
        return s
            .trim()
            .parse()
            .map(CountRange::Fixed)
            .map_err(|e| format!("`{s}`: {e}"));
    }
    parse_pair::<usize>(s).map(|(min, max)| CountRange::between(min, max))
}
