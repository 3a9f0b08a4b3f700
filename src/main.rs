use clap::Parser;

use pdf_ocr_mock::cli::{self, Cli, Commands, ServeArgs};
use pdf_ocr_mock::{server, Config};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve(args)) => serve(args),
        None => serve(ServeArgs::default()),
        Some(Commands::VerifyUpload { file, url }) => {
            init_logger("info");
            cli::handle_verify_upload(&file, &url)
        }
    }
}

fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.apply(Config::new());
    init_logger(config.log_level());
    actix_web::rt::System::new().block_on(server::run(config))?;
    Ok(())
}

fn init_logger(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}
