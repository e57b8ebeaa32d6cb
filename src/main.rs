use clap::Parser;
use lightaudit::cli::{self, Cli};
use lightaudit::utils::{init_logging, Config};
use log::error;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // initialize logging before config so bad env values get reported
    init_logging(args.verbose);
    let config = Config::load();

    let code = match cli::run(args.command, &config).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };
    std::process::exit(code);
}
