mod config;
mod error;
mod notes;
mod provisioning;
mod services;
mod state;
mod submitter;

use crate::config::{mask, AppConfig};
use crate::state::AppState;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{info, warn};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let url = format!("http://{}:{}", config.host, config.port);

    match (&config.api_key, &config.collection_id) {
        (Some(_), Some(id)) => info!(
            "notes target: collection {} ({})",
            mask(&id.value),
            id.format.as_str()
        ),
        _ => warn!("notes credentials incomplete; saving quotes will fail until they are set"),
    }

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    let bind = (config.host.clone(), config.port);
    let state = web::Data::new(AppState::from_config(config).map_err(std::io::Error::other)?);

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(services::cors_headers())
            .configure(services::configure)
            .default_service(web::route().to(serve_embedded))
    })
    .bind(bind)?
    .run()
    .await
}
