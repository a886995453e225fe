use rvs_board::Color;
use rvs_board::Outcome;
use rvs_board::Square;
use rvs_core::ID;
use rvs_gameroom::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;
use tokio::sync::mpsc::channel;

/// Consistent per-session view taken in one critical section.
#[derive(Debug, Clone)]
pub struct Glance {
    pub phase: Phase,
    pub current: Color,
    pub board: [String; 8],
    pub winner: Option<Outcome>,
}

/// Manages active sessions and their lifecycles.
///
/// The identifier map has its own lock, independent of per-room locks,
/// so session creation and lookup never wait on any game's critical
/// section. Each room's mutex is the session-level unit of mutual
/// exclusion: moves, chat, and subscription churn on one session are
/// serialized; different sessions proceed fully in parallel.
pub struct Lobby {
    rooms: RwLock<HashMap<ID<Room>, Arc<Mutex<Room>>>>,
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new()
    }
}

impl Lobby {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a new session in the waiting state with the standard
    /// four-disc center setup, and returns its identifier.
    pub async fn open(&self) -> ID<Room> {
        let id = ID::default();
        let room = Arc::new(Mutex::new(Room::new(id)));
        self.rooms.write().await.insert(id, room);
        log::info!("[lobby] opened session {}", id);
        id
    }

    /// Removes a session from the lobby.
    pub async fn close(&self, id: ID<Room>) -> Result<(), GameError> {
        self.rooms
            .write()
            .await
            .remove(&id)
            .map(|_| log::info!("[lobby] closed session {}", id))
            .ok_or(GameError::SessionNotFound)
    }

    async fn room(&self, id: ID<Room>) -> Result<Arc<Mutex<Room>>, GameError> {
        self.rooms
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(GameError::SessionNotFound)
    }

    /// Seats a player; the second join starts the game.
    pub async fn join(&self, id: ID<Room>, name: &str) -> Result<Player, GameError> {
        self.room(id).await?.lock().await.join(name)
    }

    /// Submits one move under the session lock; the resulting event is
    /// fanned out before the lock is released, so concurrent callers
    /// observe moves and broadcasts in the same order.
    pub async fn submit(
        &self,
        id: ID<Room>,
        player: ID<Player>,
        square: Square,
    ) -> Result<Event, GameError> {
        self.room(id).await?.lock().await.submit(player, square)
    }

    /// Consistent snapshot for response construction.
    pub async fn glance(&self, id: ID<Room>) -> Result<Glance, GameError> {
        let room = self.room(id).await?;
        let room = room.lock().await;
        let table = room.table();
        Ok(Glance {
            phase: table.phase(),
            current: table.current(),
            board: table.board().rows(),
            winner: table.winner(),
        })
    }

    /// Spawns the WebSocket bridge between one connection and one
    /// session channel. Subscribes under the room lock, forwards hub
    /// frames to the socket, relays inbound chat lines, and cleans the
    /// subscription up when the peer goes away. Transport failures are
    /// never surfaced to the game layer; they only end the bridge.
    pub async fn bridge(
        self: &Arc<Self>,
        id: ID<Room>,
        kind: Channel,
        mut session: actix_ws::Session,
        mut streams: actix_ws::MessageStream,
    ) -> anyhow::Result<()> {
        use futures::StreamExt;
        let room = self.room(id).await?;
        // bounded mailbox: the hub disconnects this subscription rather
        // than queue without limit for a socket that stops draining
        let (tx, mut rx) = channel::<String>(MAILBOX);
        let sub = room.lock().await.subscribe(kind, tx);
        session
            .text(ServerMessage::connected(&id.to_string(), &kind.to_string()).to_json())
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        log::debug!("[bridge {}] connected to {}", id, kind);
        let lobby = self.clone();
        actix_web::rt::spawn(async move {
            'sesh: loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Some(frame) => if session.text(frame).await.is_err() { break 'sesh },
                        None => break 'sesh,
                    },
                    msg = streams.next() => match msg {
                        Some(Ok(actix_ws::Message::Text(text))) => {
                            if kind == Channel::Chat {
                                if let Err(e) = lobby.relay(&room, sub, &text).await {
                                    let _ = session.text(ServerMessage::error(&e).to_json()).await;
                                }
                            }
                        }
                        Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                        Some(Err(_)) => break 'sesh,
                        None => break 'sesh,
                        _ => continue 'sesh,
                    },
                }
            }
            let mut guard = room.lock().await;
            guard.unsubscribe(kind, sub);
            let gone = guard.deserted() && guard.table().phase().terminal();
            drop(guard);
            if gone {
                let _ = lobby.close(id).await;
            }
            log::debug!("[bridge {}] disconnected from {}", id, kind);
        });
        Ok(())
    }

    /// Parses and publishes one inbound chat frame.
    async fn relay(
        &self,
        room: &Arc<Mutex<Room>>,
        sub: ID<Subscription>,
        frame: &str,
    ) -> Result<(), GameError> {
        let ClientMessage::Chat { from, text } = match Protocol::decode(frame) {
            Ok(message) => message,
            Err(e) => {
                // malformed traffic is dropped silently, not answered
                log::debug!("[lobby] dropping malformed chat frame: {}", e);
                return Ok(());
            }
        };
        let from = uuid::Uuid::parse_str(&from)
            .map(ID::from)
            .map_err(|_| GameError::PlayerNotInSession)?;
        room.lock().await.chat(from, &text, Some(sub)).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvs_core::Unique;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[tokio::test]
    async fn create_join_move_scenario() {
        let lobby = Lobby::new();
        let id = lobby.open().await;
        let black = lobby.join(id, "ada").await.unwrap();
        assert_eq!(black.color(), Color::Black);
        let white = lobby.join(id, "bob").await.unwrap();
        assert_eq!(white.color(), Color::White);
        assert_eq!(lobby.glance(id).await.unwrap().phase, Phase::Playing);
        // out-of-turn move by white before black has opened
        assert_eq!(
            lobby.submit(id, white.id(), sq(2, 4)).await.unwrap_err(),
            GameError::NotYourTurn
        );
        let event = lobby.submit(id, black.id(), sq(2, 3)).await.unwrap();
        assert_eq!(event.seq(), 3); // the two joins took 1 and 2
        let glance = lobby.glance(id).await.unwrap();
        assert_eq!(glance.current, Color::White);
        assert_eq!(glance.board[2], "...X....");
        assert_eq!(glance.board[3], "...XX...");
    }

    #[tokio::test]
    async fn unknown_session_is_reported() {
        let lobby = Lobby::new();
        assert_eq!(
            lobby.join(ID::default(), "ada").await.unwrap_err(),
            GameError::SessionNotFound
        );
        assert_eq!(
            lobby.glance(ID::default()).await.unwrap_err(),
            GameError::SessionNotFound
        );
    }

    #[tokio::test]
    async fn close_frees_the_identifier() {
        let lobby = Lobby::new();
        let id = lobby.open().await;
        lobby.close(id).await.unwrap();
        assert_eq!(lobby.close(id).await.unwrap_err(), GameError::SessionNotFound);
        assert_eq!(
            lobby.join(id, "ada").await.unwrap_err(),
            GameError::SessionNotFound
        );
    }

    #[tokio::test]
    async fn conflicting_moves_admit_exactly_one_winner() {
        let lobby = Arc::new(Lobby::new());
        let id = lobby.open().await;
        let black = lobby.join(id, "ada").await.unwrap();
        lobby.join(id, "bob").await.unwrap();
        let tasks = (0..8)
            .map(|_| {
                let lobby = lobby.clone();
                let player = black.id();
                tokio::spawn(async move { lobby.submit(id, player, sq(2, 3)).await })
            })
            .collect::<Vec<_>>();
        let results = futures::future::join_all(tasks).await;
        let mut won = 0;
        for result in results {
            match result.unwrap() {
                Ok(_) => won += 1,
                Err(e) => assert!(
                    matches!(e, GameError::NotYourTurn | GameError::IllegalMove),
                    "unexpected error {:?}",
                    e
                ),
            }
        }
        assert_eq!(won, 1);
        // final board matches the single successful move
        let glance = lobby.glance(id).await.unwrap();
        assert_eq!(glance.board[2], "...X....");
        assert_eq!(glance.board[3], "...XX...");
        assert_eq!(glance.board[4], "...XO...");
        assert_eq!(glance.current, Color::White);
    }

    #[tokio::test]
    async fn broadcasts_arrive_in_publish_order() {
        let lobby = Arc::new(Lobby::new());
        let id = lobby.open().await;
        let black = lobby.join(id, "ada").await.unwrap();
        let white = lobby.join(id, "bob").await.unwrap();
        let (tx, mut rx) = channel(MAILBOX);
        {
            let room = lobby.room(id).await.unwrap();
            room.lock().await.subscribe(Channel::Game, tx);
        }
        lobby.submit(id, black.id(), sq(2, 3)).await.unwrap();
        lobby.submit(id, white.id(), sq(2, 2)).await.unwrap();
        let first: serde_json::Value =
            serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
        let second: serde_json::Value =
            serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
        assert_eq!(first["seq"], 3);
        assert_eq!(second["seq"], 4);
    }

    #[tokio::test]
    async fn sessions_do_not_block_each_other() {
        let lobby = Arc::new(Lobby::new());
        let left = lobby.open().await;
        let right = lobby.open().await;
        // hold one session's lock while operating on the other
        let held = lobby.room(left).await.unwrap();
        let _guard = held.lock().await;
        let player = lobby.join(right, "ada").await.unwrap();
        assert_eq!(player.color(), Color::Black);
    }
}
