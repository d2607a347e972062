use std::io::Write;

use anyhow::Context;
use opennic_rank::{fetch, report, FnProgress, IcmpProbe, RankConfig, ServerPool};

struct Cli {
    config: RankConfig,
    json: bool,
}

const USAGE: &str = "\
rank - find the fastest OpenNIC tier-2 DNS servers

Options:
  -n <count>   pings to send per server (default: 4)
  -t <count>   servers to show (default: 10)
  -f           force report refetch and bypass saved results
  --json       print results as JSON
  -h, --help   show this help";

fn parse_args() -> anyhow::Result<Cli> {
    let mut cli = Cli {
        config: RankConfig::default(),
        json: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" => {
                cli.config.tries = args
                    .next()
                    .context("-n needs a value")?
                    .parse()
                    .context("-n expects an integer")?;
            }
            "-t" => {
                cli.config.top = args
                    .next()
                    .context("-t needs a value")?
                    .parse()
                    .context("-t expects an integer")?;
            }
            "-f" => cli.config.force_refresh = true,
            "--json" => cli.json = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument: {other}\n\n{USAGE}"),
        }
    }
    Ok(cli)
}

fn draw_progress(current: usize, total: usize, address: &str) {
    let bar_len = 60usize;
    let filled = bar_len * current / total.max(1);
    let percent = 100.0 * current as f64 / total.max(1) as f64;
    eprint!(
        "\r[{}{}] {:.1}% {:<40}",
        "#".repeat(filled),
        "-".repeat(bar_len - filled),
        percent,
        address
    );
    let _ = std::io::stderr().flush();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = parse_args()?;
    let cfg = &cli.config;

    let results_file = fetch::results_path(&cfg.cache_dir);
    let mut pool = ServerPool::new();

    if results_file.is_file() && !cfg.force_refresh {
        pool.restore_from_path(&results_file)
            .context("loading today's saved results")?;
        pool.rank_by_latency();
        pool.filter_unresponsive();
    } else {
        let client = reqwest::Client::new();
        let body = fetch::cached_report(&client, fetch::REPORT_URL, &cfg.cache_dir, cfg.force_refresh)
            .await
            .context("retrieving tier-2 report")?;

        report::populate_pool(&body, &mut pool);
        if pool.is_empty() {
            anyhow::bail!("no servers found in the tier-2 report");
        }

        let probe = IcmpProbe::new(cfg.probe_timeout);
        let mut progress = FnProgress(draw_progress);
        pool.probe_all(&probe, cfg.tries, &mut progress).await;
        eprintln!();

        pool.rank_by_latency();
        pool.persist_to_path(&results_file)
            .context("saving results")?;
        pool.filter_unresponsive();
    }

    let top = pool.top_n(cfg.top);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(top)?);
    } else {
        for server in top {
            println!("{server}");
        }
    }

    Ok(())
}
