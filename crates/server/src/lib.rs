//! Reversi Service Facade
//!
//! Maps the RPC surface onto the lobby and room operations: unary
//! routes for session management and moves, WebSocket routes for the
//! chat and game-event streams.

pub mod handlers;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use rvs_hosting::Lobby;

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let lobby = web::Data::new(Lobby::new());
    log::info!("starting reversi server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(lobby.clone())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/session")
                    .route("/create", web::post().to(handlers::create))
                    .route("/{session_id}/join", web::post().to(handlers::join))
                    .route("/{session_id}/move", web::post().to(handlers::submit))
                    .route("/{session_id}/board", web::get().to(handlers::board))
                    .route("/{session_id}/state", web::get().to(handlers::state))
                    .route("/{session_id}/chat", web::get().to(handlers::chat))
                    .route("/{session_id}/events", web::get().to(handlers::events)),
            )
    })
    .workers(6)
    .bind(std::env::var("BIND_ADDR").expect("BIND_ADDR must be set"))?
    .run()
    .await
}
