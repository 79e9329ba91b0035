use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mt4client::{ClientConfig, Mt4Client, NewOrder};
use mt4client_core::{AppliedPrice, OrderType, Ticket, Timeframe};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "mt4")]
#[command(about = "Query and trade through a MetaTrader 4 terminal")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// TOML file with client settings
    #[arg(short, long, env = "MT4_CONFIG")]
    config: Option<PathBuf>,

    /// Terminal endpoint, overrides the config file
    #[arg(short, long, env = "MT4_ADDRESS")]
    address: Option<String>,

    /// Reply timeout in milliseconds, overrides the config file
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show account details
    Account,

    /// List symbol names, or show the named symbols
    Symbols { names: Vec<String> },

    /// Show the latest quote of a symbol
    Tick { symbol: String },

    /// List open and pending orders
    Orders {
        /// Show closed orders instead
        #[arg(long)]
        history: bool,
    },

    /// Show a single order
    Order { ticket: Ticket },

    /// Fetch price bars
    Ohlcv {
        symbol: String,

        /// Bar width, e.g. 5m, 1h, 4h, 1d
        timeframe: Timeframe,

        /// Number of bars
        #[arg(long, default_value = "100")]
        limit: u32,

        /// Milliseconds to wait for the broker to deliver history
        #[arg(long, default_value = "5000")]
        history_timeout: u64,
    },

    /// List signal names, or show the named signals
    Signals { names: Vec<String> },

    /// Open a buy order
    Buy(OrderArgs),

    /// Open a sell order
    Sell(OrderArgs),

    /// Close an open order at market
    Close { ticket: Ticket },

    /// Delete a pending order
    Delete {
        ticket: Ticket,

        /// Fail instead of closing the order if it has already been filled
        #[arg(long)]
        keep_open: bool,
    },

    /// Evaluate a built-in indicator
    Indicator {
        #[command(subcommand)]
        indicator: IndicatorCommands,
    },
}

#[derive(Args)]
struct OrderArgs {
    symbol: String,
    lots: f64,

    /// Place a limit order at --price
    #[arg(long, conflicts_with = "stop")]
    limit: bool,

    /// Place a stop order at --price
    #[arg(long)]
    stop: bool,

    #[arg(long)]
    price: Option<f64>,

    /// Maximum slippage in points
    #[arg(long)]
    slippage: Option<i32>,

    #[arg(long)]
    sl: Option<f64>,

    #[arg(long)]
    tp: Option<f64>,

    /// Stop-loss distance in points
    #[arg(long)]
    sl_points: Option<i32>,

    /// Take-profit distance in points
    #[arg(long)]
    tp_points: Option<i32>,

    #[arg(long)]
    comment: Option<String>,
}

#[derive(Subcommand)]
enum IndicatorCommands {
    /// Relative Strength Index
    Rsi {
        symbol: String,
        timeframe: Timeframe,
        period: i32,

        /// Bars back from the current one
        #[arg(long, default_value = "0")]
        shift: i32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    debug!(address = %config.address, "Using terminal");
    let mut client = Mt4Client::connect(&config)
        .with_context(|| format!("Failed to connect to {}", config.address))?;

    match cli.command {
        Commands::Account => print(&client.account()?),
        Commands::Symbols { names } if names.is_empty() => print(&client.symbol_names()?),
        Commands::Symbols { names } => print(&client.symbols(&names)?),
        Commands::Tick { symbol } => print(&client.symbol_tick(&symbol)?),
        Commands::Orders { history: false } => print(&client.orders()?),
        Commands::Orders { history: true } => print(&client.orders_historical()?),
        Commands::Order { ticket } => print(&client.order(ticket)?),
        Commands::Ohlcv {
            symbol,
            timeframe,
            limit,
            history_timeout,
        } => print(&client.ohlcv(
            &symbol,
            timeframe,
            limit,
            Duration::from_millis(history_timeout),
        )?),
        Commands::Signals { names } if names.is_empty() => print(&client.signal_names()?),
        Commands::Signals { names } => print(&client.signals(&names)?),
        Commands::Buy(args) => print(&client.order_send(new_order(args, true)?)?),
        Commands::Sell(args) => print(&client.order_send(new_order(args, false)?)?),
        Commands::Close { ticket } => {
            client.order_close(ticket)?;
            println!("Closed order {ticket}");
            Ok(())
        }
        Commands::Delete { ticket, keep_open } => {
            client.order_delete(ticket, !keep_open)?;
            println!("Deleted order {ticket}");
            Ok(())
        }
        Commands::Indicator { indicator } => match indicator {
            IndicatorCommands::Rsi {
                symbol,
                timeframe,
                period,
                shift,
            } => {
                let rsi = mt4client_indicators::rsi(
                    &symbol,
                    timeframe,
                    period,
                    AppliedPrice::Close,
                    shift,
                );
                print(&client.run_indicator(&rsi)?)
            }
        },
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(address) = &cli.address {
        config.address = address.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.response_timeout_ms = timeout;
    }
    Ok(config)
}

fn new_order(args: OrderArgs, buy: bool) -> Result<NewOrder> {
    let order_type = match (buy, args.limit, args.stop) {
        (true, true, _) => OrderType::BuyLimit,
        (true, _, true) => OrderType::BuyStop,
        (true, _, _) => OrderType::Buy,
        (false, true, _) => OrderType::SellLimit,
        (false, _, true) => OrderType::SellStop,
        (false, _, _) => OrderType::Sell,
    };

    let mut order = NewOrder::builder()
        .symbol(args.symbol)
        .order_type(order_type)
        .lots(args.lots);
    if let Some(price) = args.price {
        order = order.price(price);
    }
    if let Some(slippage) = args.slippage {
        order = order.slippage(slippage);
    }
    if let Some(sl) = args.sl {
        order = order.sl(sl);
    }
    if let Some(tp) = args.tp {
        order = order.tp(tp);
    }
    if let Some(points) = args.sl_points {
        order = order.sl_points(points);
    }
    if let Some(points) = args.tp_points {
        order = order.tp_points(points);
    }
    if let Some(comment) = args.comment {
        order = order.comment(comment);
    }
    Ok(order.build()?)
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_pending_buy() {
        let cli = Cli::try_parse_from([
            "mt4", "buy", "EURUSD", "0.1", "--limit", "--price", "1.05", "--sl-points", "200",
        ])
        .unwrap();
        let Commands::Buy(args) = cli.command else {
            panic!("expected a buy command");
        };
        let order = new_order(args, true).unwrap();
        assert_eq!(order.order_type(), OrderType::BuyLimit);
        assert_eq!(order.price(), Some(1.05));
    }

    #[test]
    fn test_pending_order_without_price_fails() {
        let cli = Cli::try_parse_from(["mt4", "sell", "EURUSD", "1", "--stop"]).unwrap();
        let Commands::Sell(args) = cli.command else {
            panic!("expected a sell command");
        };
        assert!(new_order(args, false).is_err());
    }

    #[test]
    fn test_limit_and_stop_conflict() {
        assert!(Cli::try_parse_from(["mt4", "buy", "EURUSD", "1", "--limit", "--stop"]).is_err());
    }

    #[test]
    fn test_timeframe_argument() {
        let cli = Cli::try_parse_from(["mt4", "ohlcv", "EURUSD", "4h", "--limit", "10"]).unwrap();
        let Commands::Ohlcv { timeframe, limit, .. } = cli.command else {
            panic!("expected an ohlcv command");
        };
        assert_eq!(timeframe, Timeframe::H4);
        assert_eq!(limit, 10);
    }

    #[test]
    fn test_address_override() {
        let cli = Cli::try_parse_from(["mt4", "--address", "tcp://10.0.0.2:28282", "account"])
            .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.address, "tcp://10.0.0.2:28282");
        assert_eq!(config.request_timeout_ms, 10_000);
    }
}
