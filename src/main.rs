use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use fx_pulse::{
    Cli, Command, HttpCalendarProvider, IntervalPacer, JsonFileStorage, RefreshOutcome,
    StrengthEngine, SystemClock, YahooQuoteProvider,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    let engine = StrengthEngine::new(
        Arc::new(JsonFileStorage::new(args.store_path.clone())),
        Arc::new(HttpCalendarProvider::new(args.calendar_url.clone())),
        Arc::new(YahooQuoteProvider::new()),
        Arc::new(SystemClock),
        Arc::new(IntervalPacer::default()),
    );

    match args.command {
        Command::Refresh { force } => {
            let outcome = if force {
                engine.refresh().await?
            } else {
                engine.refresh_if_stale().await?
            };
            match outcome {
                RefreshOutcome::Skipped => println!("refresh already running, dropped"),
                RefreshOutcome::UpToDate => println!("strength history is up to date"),
                RefreshOutcome::Corrected => println!("same-day correction applied"),
                RefreshOutcome::Backfilled { days } => println!("backfilled {days} day(s)"),
            }
        }
        Command::History => {
            let history = engine.strength_history().await?;
            for (currency, window) in history.iter() {
                let points: Vec<String> =
                    window.points().iter().map(|p| format!("{p:+.4}")).collect();
                println!("{currency}  [{}]", points.join(", "));
            }
        }
        Command::FairValue { pair } => {
            let result = engine.fair_value(&pair).await?;
            println!("{}", result.pair);
            println!("  current     {:.5}", result.current_price);
            println!("  anchor      {:.5}", result.anchor_price);
            println!(
                "  net score   {:+.4} (base {:+.4}, quote {:+.4})",
                result.net_score, result.base_score, result.quote_score
            );
            println!("  fair value  {:.5}", result.fair_value);
            println!(
                "  bands       1sd [{:.5}, {:.5}]  2sd [{:.5}, {:.5}] (ATR {})",
                result.sd1_lower, result.sd1_upper, result.sd2_lower, result.sd2_upper, result.atr
            );
            println!("  zone        {}", result.zone);
        }
    }

    Ok(())
}
