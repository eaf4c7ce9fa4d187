use anyhow::Context;
use holiday_search::commands::{parse_command, Command, HELP};
use holiday_search::filters::{year_options, COUNTRY_OPTIONS, MONTH_NAMES};
use holiday_search::render::render;
use holiday_search::{Config, HolidaySearchView, HolidayType, QueryClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the rendered screen
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "holiday_search=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let client = QueryClient::new(config.client_config()).context("creating holiday client")?;
    tracing::info!(endpoint = %client.endpoint(), "Configuration loaded");

    let mut view = HolidaySearchView::new(client);
    println!("{}", render(view.state()));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Apply(actions)) => {
                for action in actions {
                    view.dispatch(action).await;
                }
                println!("{}", render(view.state()));
            }
            Ok(Command::Options) => print_options(),
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => break,
            Err(e) => println!("{}", e),
        }
    }

    let stats = holiday_search::HolidayApi::stats(view.client());
    tracing::debug!(?stats, "Exiting");
    Ok(())
}

fn print_options() {
    println!("Countries:");
    for (code, label) in COUNTRY_OPTIONS {
        println!("  {:<4} {}", code, label);
    }
    println!("Years: {}", year_options().join(", "));
    println!("Months:");
    for (i, name) in MONTH_NAMES.iter().enumerate() {
        println!("  {:<4} {}", i + 1, name);
    }
    println!("Holiday types:");
    for holiday_type in HolidayType::ALL {
        println!("  {:<12} {}", holiday_type.as_str(), holiday_type.label());
    }
}
