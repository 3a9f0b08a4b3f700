use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{http::header, web, App, HttpServer};
use log::info;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::constants::STATIC_ROUTE;
use crate::error::AppResult;
use crate::handlers;
use crate::services::{OcrService, PageStore, PopplerRasterizer, RandomAnnotator};

pub async fn run(config: Config) -> std::io::Result<()> {
    let host = config.host.clone();
    let port = config.port;

    let ocr_service = build_ocr_service(&config).map_err(std::io::Error::other)?;

    print_banner(&host, port);
    info!("Server running at http://{}:{}/", host, port);
    match &config.poppler_path {
        Some(dir) => info!("Using poppler from {:?}", dir),
        None => info!("Using pdftoppm from PATH"),
    }

    let startup_time = Instant::now();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(ocr_service.clone()))
            .configure(|cfg| configure_routes(cfg, &config))
    })
    .bind((host, port))?
    .run()
    .await?;

    info!("Server stopped. Uptime: {:?}", startup_time.elapsed());
    Ok(())
}

/// Production pipeline: poppler rendering plus random mock annotations.
pub fn build_ocr_service(config: &Config) -> AppResult<OcrService> {
    let store = PageStore::open(config.static_dir.clone())?;
    Ok(OcrService::new(
        store,
        Arc::new(PopplerRasterizer::new(
            config.poppler_path.clone(),
            config.render_dpi,
        )),
        Arc::new(RandomAnnotator::new()),
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(
        web::scope("/api")
            .wrap(api_cors(&config.allowed_origins))
            .route("/ocr", web::post().to(handlers::upload_pdf)),
    )
    .route("/healthz", web::get().to(|| async { "OK" }))
    .service(Files::new(STATIC_ROUTE, &config.static_dir));
}

/// Cross-origin access for the `/api` scope, limited to the configured origins.
pub fn api_cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(3600)
}

fn print_banner(host: &str, port: u16) {
    let banner = r#"
  ___   ___ ___   __  __         _
 / _ \ / __| _ \ |  \/  |___  __| |__
| (_) | (__|   / | |\/| / _ \/ _| / /
 \___/ \___|_|_\ |_|  |_\___/\__|_\_\
"#;
    println!("{}", banner);
    println!("         OCR mock server started at: http://{}:{}\n", host, port);
}
