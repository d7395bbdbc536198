mod cli;
mod config;
mod gateways;
mod host;
mod settings;
mod store;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    cli::run()
}
