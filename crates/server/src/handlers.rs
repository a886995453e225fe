use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use rvs_board::Square;
use rvs_core::ID;
use rvs_core::Unique;
use rvs_gameroom::Channel;
use rvs_gameroom::Event;
use rvs_gameroom::GameError;
use rvs_hosting::Lobby;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct JoinBody {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveBody {
    pub player_id: uuid::Uuid,
    pub row: u8,
    pub col: u8,
}

/// Maps the failure taxonomy onto HTTP, with the structured kind and a
/// human-readable message in the body. `IllegalMove` never reaches
/// this on the move route (valid=false contract); elsewhere it is a
/// conflict like the other turn errors.
fn failure(error: &GameError) -> HttpResponse {
    let body = serde_json::json!({ "error": error.kind(), "message": error.to_string() });
    match error {
        GameError::SessionNotFound => HttpResponse::NotFound().json(body),
        GameError::Internal(detail) => {
            log::error!("invariant violation: {}", detail);
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::Conflict().json(body),
    }
}

pub async fn create(lobby: web::Data<Lobby>) -> impl Responder {
    let id = lobby.open().await;
    HttpResponse::Ok().json(serde_json::json!({ "session_id": id.to_string() }))
}

pub async fn join(
    lobby: web::Data<Lobby>,
    path: web::Path<uuid::Uuid>,
    body: web::Json<JoinBody>,
) -> impl Responder {
    match lobby.join(ID::from(path.into_inner()), &body.name).await {
        Ok(player) => HttpResponse::Ok().json(serde_json::json!({
            "player_id": player.id().to_string(),
            "color": player.color(),
        })),
        Err(e) => failure(&e),
    }
}

pub async fn submit(
    lobby: web::Data<Lobby>,
    path: web::Path<uuid::Uuid>,
    body: web::Json<MoveBody>,
) -> impl Responder {
    let id = ID::from(path.into_inner());
    // an out-of-range coordinate is just an illegal move, not a 4xx
    let result = match Square::new(body.row, body.col) {
        Some(square) => lobby.submit(id, ID::from(body.player_id), square).await,
        None => Err(GameError::IllegalMove),
    };
    match result {
        Ok(Event::Moved {
            board,
            current,
            outcome,
            ..
        }) => HttpResponse::Ok().json(serde_json::json!({
            "valid": true,
            "board": board.rows(),
            "current": current,
            "outcome": outcome.map(|o| o.to_string()),
        })),
        Ok(event) => failure(&GameError::Internal(format!(
            "move produced unexpected event: {}",
            event
        ))),
        Err(GameError::IllegalMove) => match lobby.glance(id).await {
            Ok(glance) => HttpResponse::Ok().json(serde_json::json!({
                "valid": false,
                "error": GameError::IllegalMove.kind(),
                "board": glance.board,
                "current": glance.current,
            })),
            Err(e) => failure(&e),
        },
        Err(e) => failure(&e),
    }
}

pub async fn board(lobby: web::Data<Lobby>, path: web::Path<uuid::Uuid>) -> impl Responder {
    match lobby.glance(ID::from(path.into_inner())).await {
        Ok(glance) => HttpResponse::Ok().json(serde_json::json!({ "rows": glance.board })),
        Err(e) => failure(&e),
    }
}

pub async fn state(lobby: web::Data<Lobby>, path: web::Path<uuid::Uuid>) -> impl Responder {
    match lobby.glance(ID::from(path.into_inner())).await {
        Ok(glance) => HttpResponse::Ok().json(serde_json::json!({
            "state": glance.phase.to_string(),
            "winner": glance.winner.map(|w| w.to_string()),
        })),
        Err(e) => failure(&e),
    }
}

pub async fn chat(
    lobby: web::Data<Lobby>,
    path: web::Path<uuid::Uuid>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    upgrade(lobby, path, Channel::Chat, body, req).await
}

pub async fn events(
    lobby: web::Data<Lobby>,
    path: web::Path<uuid::Uuid>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    upgrade(lobby, path, Channel::Game, body, req).await
}

async fn upgrade(
    lobby: web::Data<Lobby>,
    path: web::Path<uuid::Uuid>,
    kind: Channel,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let id = ID::from(path.into_inner());
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            match lobby.into_inner().bridge(id, kind, session, stream).await {
                Ok(()) => response.map_into_left_body(),
                Err(e) => HttpResponse::NotFound()
                    .body(e.to_string())
                    .map_into_right_body(),
            }
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}
