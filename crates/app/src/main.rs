use clap::Parser;

use cli::Cli;
use commands::Context;
use settings::Settings;

mod cli;
mod commands;
mod error;
mod render;
mod settings;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "eventzen={level},client={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let output = match Context::new(&settings, cli.json) {
        Ok(ctx) => ctx.run(cli.command).await,
        Err(err) => Err(err),
    };

    match output {
        Ok(text) => print!("{text}"),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
}
