use rvs_board::Color;
use rvs_core::ID;
use rvs_core::Unique;

/// A seated player. Created at join with a fresh opaque id; the id is
/// the token the client presents on every subsequent move.
#[derive(Debug, Clone)]
pub struct Player {
    id: ID<Player>,
    name: String,
    color: Color,
}

impl Player {
    pub fn new(name: &str, color: Color) -> Self {
        Self {
            id: ID::default(),
            name: name.to_string(),
            color,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn color(&self) -> Color {
        self.color
    }
}

impl Unique for Player {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.color)
    }
}
