use chrono::Local;
use facebook_ads::constants::ENV_AD_ACCOUNT_ID;
use facebook_ads::{report, Config, ConfigError, DateRange, FacebookClient};
use log::info;
use std::error::Error;
use std::io::Write;

fn init_logger() {
    let env = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info");
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.module_path().unwrap_or("<unnamed>"),
                &record.args()
            )
        })
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    let account_id = config
        .ad_account_id
        .clone()
        .ok_or_else(|| ConfigError::MissingEnv(ENV_AD_ACCOUNT_ID.to_string()))?;

    let client = FacebookClient::new(config);
    info!("Using Graph API at {}", client.base_uri());

    let lines = report::account_summary(&client, &account_id, DateRange::today()).await?;
    for line in lines {
        info!("{}", line);
    }

    Ok(())
}
