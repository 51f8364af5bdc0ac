use epg::{EpgClient, EpgConfig, EpgError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage:
  epg-client status <order_id> <transaction_code>
  epg-client balance <currency> <merchant_code>
  epg-client refund <order_id> <amount>";

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let config = match EpgConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("EPG endpoint: {}", config.base_url);

    let client = match EpgClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match args.as_slice() {
        ["status", order_id, code] => to_json(client.get_order_status(order_id, code).await),
        ["balance", currency, merchant] => match currency.parse::<u16>() {
            Ok(currency) => to_json(client.get_balance_status(currency, merchant).await),
            Err(_) => usage(),
        },
        ["refund", order_id, amount] => match amount.parse::<u64>() {
            Ok(amount) => to_json(client.refund_order(order_id, amount).await),
            Err(_) => usage(),
        },
        _ => usage(),
    };

    match result {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(body) = e.raw_body() {
                eprintln!("{body}");
            }
            std::process::exit(1);
        }
    }
}

fn to_json<T: serde::Serialize>(result: Result<T, EpgError>) -> Result<String, EpgError> {
    Ok(serde_json::to_string_pretty(&result?)?)
}

fn usage() -> ! {
    eprintln!("{USAGE}");
    std::process::exit(2);
}
