//! Basic authentication example.
//!
//! This example demonstrates how to authenticate with the tastytrade API
//! and retrieve account information.
//!
//! Run with: cargo run --example basic_auth

use tasty_rs::{Environment, Error, TastyClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> tasty_rs::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Get credentials from environment variables
    let username = std::env::var("TASTYTRADE_USERNAME")
        .expect("TASTYTRADE_USERNAME environment variable required");
    let password = std::env::var("TASTYTRADE_PASSWORD")
        .expect("TASTYTRADE_PASSWORD environment variable required");
    let env: Environment = std::env::var("TASTYTRADE_ENV")
        .unwrap_or_else(|_| "sandbox".to_string())
        .parse()?;

    println!("Connecting to tastytrade {}...", env);

    let client = match TastyClient::login(&username, &password, env).await {
        Ok(client) => client,
        Err(Error::Api(err)) => {
            eprintln!("Login rejected ({}): {}", err.status_code, err.message);
            for detail in &err.errors {
                eprintln!("  {}: {}", detail.domain, detail.reason);
            }
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    println!("Successfully authenticated!");
    println!("Account streamer: {}", client.websocket_url());

    let customer = client.customers().me().await?;
    println!(
        "Customer: {}",
        customer.full_name().unwrap_or_else(|| "(no name on file)".to_string())
    );

    // List all accounts
    let accounts = client.accounts().list().await?;
    println!("\nFound {} account(s):", accounts.len());

    for item in &accounts {
        let account = &item.account;
        println!(
            "  - {} ({})",
            account.account_number,
            account.nickname.as_deref().unwrap_or("No nickname")
        );

        let live = client.orders().live(&account.account_number()).await?;
        println!("    Working orders: {}", live.len());
    }

    let results = client.symbols().search("BRK/B").await?;
    for result in results.iter().take(3) {
        println!("Search hit: {} {:?}", result.symbol, result.description);
    }

    client.sessions().destroy().await?;
    println!("\nDone!");
    Ok(())
}
