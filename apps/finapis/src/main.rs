use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use finapis_shared::Pair;
use tracing_subscriber::EnvFilter;
mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// AlphaVantage API key (defaults to $ALPHAVANTAGE_APIKEY)
    #[arg(long, global = true)]
    apikey: Option<String>,

    /// Make `intraday` request TIME_SERIES_INTRADAY instead of daily bars
    #[arg(long, global = true)]
    request_intraday: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Daily adjusted OHLC bars of a stock symbol
    Daily { symbol: String },

    /// Intraday OHLC bars of a stock symbol
    Intraday {
        symbol: String,

        /// Bar size in minutes: 1, 5, 15, 30 or 60
        #[arg(long, default_value = "60")]
        interval: u32,
    },

    /// Historical price, market cap and volume of a coin for each date (dd-mm-yyyy)
    History {
        coin: String,
        currency: String,
        #[arg(required = true)]
        dates: Vec<String>,

        /// Issue all date requests at once
        #[arg(long)]
        concurrent: bool,
    },

    /// Current prices of coin:currency pairs
    Prices {
        #[arg(required = true)]
        pairs: Vec<Pair>,
    },

    /// AAPL daily and hourly bars, then bitcoin/usd on two dates
    Demo,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    rt.block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<()> {
    let apikey = || {
        args.apikey
            .clone()
            .or_else(|| std::env::var("ALPHAVANTAGE_APIKEY").ok())
            .context("Fill $ALPHAVANTAGE_APIKEY or pass --apikey")
    };

    match &args.command {
        Command::Daily { symbol } => commands::daily(symbol, &apikey()?).await,
        Command::Intraday { symbol, interval } => {
            commands::intraday(symbol, &apikey()?, *interval, args.request_intraday).await
        }
        Command::History {
            coin,
            currency,
            dates,
            concurrent,
        } => commands::history(&Pair::new(coin, currency), dates, *concurrent).await,
        Command::Prices { pairs } => commands::prices(pairs).await,
        Command::Demo => commands::demo(&apikey()?, args.request_intraday).await,
    }
}
