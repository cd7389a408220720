use anyhow::{Context, Result};
use finapis_alphavantage::{AlphaVantageClient, AlphaVantageConfig};
use finapis_coingecko::CoinGeckoClient;
use finapis_shared::{HttpFetcher, Pair};

fn alphavantage(request_intraday: bool) -> Result<AlphaVantageClient> {
    let config = AlphaVantageConfig::builder()
        .request_intraday(request_intraday)
        .build();

    Ok(AlphaVantageClient::with_fetcher(HttpFetcher::new()?, config))
}

pub async fn daily(symbol: &str, apikey: &str) -> Result<()> {
    let frame = alphavantage(false)?
        .fetch_daily(symbol, apikey)
        .await
        .with_context(|| format!("Failed to fetch daily data for {symbol}"))?;

    println!("{frame}");
    Ok(())
}

pub async fn intraday(symbol: &str, apikey: &str, interval: u32, request_intraday: bool) -> Result<()> {
    let frame = alphavantage(request_intraday)?
        .fetch_intraday(symbol, apikey, interval)
        .await
        .with_context(|| format!("Failed to fetch {interval}min data for {symbol}"))?;

    println!("{frame}");
    Ok(())
}

pub async fn history(pair: &Pair, dates: &[String], concurrent: bool) -> Result<()> {
    let client = CoinGeckoClient::new()?;
    let frame = if concurrent {
        client.historical_prices_concurrent(pair, dates).await
    } else {
        client.historical_prices(pair, dates).await
    }
    .with_context(|| format!("Failed to fetch historical prices for {pair}"))?;

    println!("{frame}");
    Ok(())
}

pub async fn prices(pairs: &[Pair]) -> Result<()> {
    let prices = CoinGeckoClient::new()?
        .current_prices(pairs)
        .await
        .context("Failed to fetch current prices")?;

    for (pair, price) in pairs.iter().zip(prices) {
        println!("{pair}: {price}");
    }
    Ok(())
}

pub async fn demo(apikey: &str, request_intraday: bool) -> Result<()> {
    println!("AlphaVantage daily data:");
    daily("AAPL", apikey).await?;
    println!("\n");

    println!("AlphaVantage hourly data:");
    intraday("AAPL", apikey, 60, request_intraday).await?;
    println!("\n\n");

    println!("CoinGecko Historical Prices");
    let dates = ["12-10-2015".to_string(), "13-10-2015".to_string()];
    history(&Pair::new("bitcoin", "usd"), &dates, false).await
}
