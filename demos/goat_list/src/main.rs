//! goat_list — smallest example for the rust_ma mobile-agent framework.
//!
//! Four agents tour a three-stop goat-list app.  One only refreshes the list,
//! two add a goat (the first commit finds the store busy and revisits), and
//! the last tries to add a duplicate and fails.  Every relay is written to
//! `output/goat_list/journey_trace.csv`.
//!
//! Pass a JSON `RelayConfig` path as the first argument to enable mock
//! delays, e.g. `{"seed": 7, "hello_delay": {"base_ms": 20, "jitter_ms": 10}}`.
//! Set `RUST_LOG=ma_agent=debug` to log every relay.

mod stops;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use ma_agent::{MobileAgent, Relay, StopRegistry, TracingObserver};
use ma_core::{AgentId, RelayConfig};
use ma_output::{CsvTraceWriter, JourneyOutputObserver};

use stops::{AppShell, GoatListAgent, GoatListView, GoatStore};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:    &str = "output/goat_list";
const INITIAL_GOATS: [&str; 3] = ["Gruff", "Nanny", "Billy"];
const BUSY_COMMITS:  u32 = 2;

/// One journey per entry: `None` only refreshes, `Some(name)` adds a goat.
const ERRANDS: [Option<&str>; 4] = [None, Some("Pepper"), Some("Clover"), Some("Billy")];

fn load_config() -> Result<RelayConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(RelayConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: RelayConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    println!("=== goat_list — rust_ma mobile agents ===");
    println!("Journeys: {}  |  Seed: {}  |  Policy: {:?}", ERRANDS.len(), config.seed, config.violation_policy);
    println!();

    // 1. Stops.
    let mut stops = StopRegistry::new();
    let shell = stops.register(AppShell::default());
    let store = stops.register(GoatStore::new(INITIAL_GOATS, BUSY_COMMITS));
    let view = stops.register(GoatListView::default());

    // 2. Output.
    let mut trace = JourneyOutputObserver::new(CsvTraceWriter::new(Path::new(OUTPUT_DIR))?);

    // 3. Run every journey to completion, one after another.
    let t0 = Instant::now();
    let mut commit_attempts = Vec::with_capacity(ERRANDS.len());
    let relays = {
        let mut obs = (TracingObserver, &mut trace);
        let mut relay = Relay::with_config(&stops, &mut obs, &config);
        for (i, new_goat) in ERRANDS.iter().enumerate() {
            let behavior = GoatListAgent::new(store, view, new_goat.map(str::to_owned));
            let mut agent = MobileAgent::new(AgentId(i as u32), behavior).with_config(&config);
            agent.activate_at_stop(shell, Some(shell), &mut relay)?;
            commit_attempts.push(agent.behavior().commit_attempts());
        }
        relay.relays()
    };
    let elapsed = t0.elapsed();

    let rows = trace.rows_seen();
    trace.finish().context("writing journey trace")?;

    // 4. Summary.
    println!("Journeys complete in {:.3} s", elapsed.as_secs_f64());
    println!("  relays            : {relays}");
    println!("  journey_trace.csv : {rows} rows");
    println!();

    let outcomes = stops.get_as::<AppShell>(shell).context("app shell missing")?.outcomes();
    println!("{:<8} {:<10} {:<10} {:<8}", "Agent", "Goat", "Outcome", "Commits");
    println!("{}", "-".repeat(40));
    for ((agent, outcome), (new_goat, commits)) in
        outcomes.iter().zip(ERRANDS.iter().zip(&commit_attempts))
    {
        println!("{:<8} {:<10} {:<10} {:<8}", agent.0, new_goat.unwrap_or("-"), outcome, commits);
    }
    println!();

    let shown = stops.get_as::<GoatListView>(view).context("goat list view missing")?.shown();
    println!("Displayed goats: {}", shown.join(", "));

    Ok(())
}
