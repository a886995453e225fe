use super::*;
use rvs_board::Square;
use rvs_core::*;
use tokio::sync::mpsc::Sender;

/// Live session coordinator.
/// Imperative shell that owns the Table (functional core) and the Hub,
/// so every mutation and its fan-out share one critical section. The
/// session store wraps each Room in its own async mutex; rooms never
/// lock anything themselves.
#[derive(Debug)]
pub struct Room {
    id: ID<Room>,
    table: Table,
    hub: Hub,
    chats: Seq,
}

impl Room {
    pub fn new(id: ID<Room>) -> Self {
        Self {
            id,
            table: Table::default(),
            hub: Hub::default(),
            chats: 0,
        }
    }
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Seats a player and announces the join on the game channel.
    pub fn join(&mut self, name: &str) -> Result<Player, GameError> {
        let (player, event) = self.table.join(name)?;
        log::info!("[room {}] {} joined", self.id, player);
        self.publish(Channel::Game, &event, None);
        Ok(player)
    }

    /// Applies one move and fans the authoritative snapshot out to the
    /// game channel; a terminal move additionally publishes game over.
    pub fn submit(&mut self, player: ID<Player>, square: Square) -> Result<Event, GameError> {
        let event = self.table.submit(player, square)?;
        log::debug!("[room {}] {}", self.id, event);
        self.publish(Channel::Game, &event, None);
        if let Some(outcome) = event.outcome() {
            self.hub
                .publish(Channel::Game, &ServerMessage::game_over(outcome).to_json(), None);
        }
        Ok(event)
    }

    /// Relays a chat line to every chat subscriber except the sender.
    pub fn chat(
        &mut self,
        from: ID<Player>,
        text: &str,
        sender: Option<ID<Subscription>>,
    ) -> Result<Event, GameError> {
        let name = self
            .table
            .player(from)
            .map(|p| p.name().to_string())
            .ok_or(GameError::PlayerNotInSession)?;
        self.chats += 1;
        let event = Event::Chat {
            seq: self.chats,
            at: now_millis(),
            from,
            name,
            text: text.to_string(),
        };
        self.publish(Channel::Chat, &event, sender);
        Ok(event)
    }

    pub fn subscribe(&mut self, kind: Channel, tx: Sender<String>) -> ID<Subscription> {
        self.hub.subscribe(kind, tx)
    }

    /// Drops a subscription; when the last connection of a live game
    /// leaves, the session is terminally abandoned.
    pub fn unsubscribe(&mut self, kind: Channel, sub: ID<Subscription>) {
        self.hub.unsubscribe(kind, sub);
        if self.hub.deserted() {
            if let Some(event) = self.table.abandon() {
                log::info!("[room {}] all players gone, abandoning", self.id);
                self.publish(Channel::Game, &event, None);
            }
        }
    }

    /// True when no connection subscribes to either channel.
    pub fn deserted(&self) -> bool {
        self.hub.deserted()
    }

    fn publish(&mut self, kind: Channel, event: &Event, skip: Option<ID<Subscription>>) {
        self.hub.publish(kind, &Protocol::encode(event).to_json(), skip);
    }
}

impl Unique for Room {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
