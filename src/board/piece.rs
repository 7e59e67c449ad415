//! Players, owners, orientations and piece instances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::shape::{ShapeId, ALL_SHAPES};

/// One of the two competing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Player {
    Light,
    Dark,
}

/// Both players in turn order.
pub const ALL_PLAYERS: [Player; 2] = [Player::Light, Player::Dark];

impl Player {
    pub const fn opponent(self) -> Player {
        match self {
            Player::Light => Player::Dark,
            Player::Dark => Player::Light,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Player::Light => "LIGHT",
            Player::Dark => "DARK",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner of a piece: a player, or nobody for the shared hub piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Owner {
    Light,
    Dark,
    Neutral,
}

impl Owner {
    /// Returns the owning player, or `None` for neutral pieces.
    pub const fn player(self) -> Option<Player> {
        match self {
            Owner::Light => Some(Player::Light),
            Owner::Dark => Some(Player::Dark),
            Owner::Neutral => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Owner::Light => "LIGHT",
            Owner::Dark => "DARK",
            Owner::Neutral => "NEUTRAL",
        }
    }
}

impl From<Player> for Owner {
    fn from(p: Player) -> Owner {
        match p {
            Player::Light => Owner::Light,
            Player::Dark => Owner::Dark,
        }
    }
}

/// Error returned when a rotation is not a multiple of 90 in `0..360`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid rotation: {0} (expected 0, 90, 180 or 270)")]
pub struct InvalidRotation(pub u16);

/// Clockwise quarter-turn applied to a base shape.
///
/// Serialized as its degree value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// All rotations in generation order.
pub const ALL_ROTATIONS: [Rotation; 4] =
    [Rotation::Deg0, Rotation::Deg90, Rotation::Deg180, Rotation::Deg270];

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn from_degrees(deg: u16) -> Option<Rotation> {
        ALL_ROTATIONS.iter().copied().find(|r| r.degrees() == deg)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(deg: u16) -> Result<Self, Self::Error> {
        Rotation::from_degrees(deg).ok_or(InvalidRotation(deg))
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> u16 {
        r.degrees()
    }
}

/// One physical game piece.
///
/// `piece_id` names the shape type only; the instance key lives in the
/// game's piece map (see [`instance_id`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceInstance {
    pub piece_id: ShapeId,
    pub owner: Owner,
    pub placed: bool,
    pub rotation: Rotation,
    pub reflected: bool,
    /// Board cell index of the variant origin once placed.
    pub anchor: Option<usize>,
    pub captured: bool,
}

impl PieceInstance {
    /// Creates an unplaced, uncaptured piece in canonical orientation.
    pub fn new(piece_id: ShapeId, owner: Owner) -> Self {
        PieceInstance {
            piece_id,
            owner,
            placed: false,
            rotation: Rotation::Deg0,
            reflected: false,
            anchor: None,
            captured: false,
        }
    }

    /// True while the piece still counts on the board.
    pub fn is_active(&self) -> bool {
        self.placed && !self.captured
    }
}

/// Unique key of a piece instance, e.g. `"LIGHT_WALL3"`.
pub fn instance_id(owner: Owner, shape: ShapeId) -> String {
    format!("{}_{}", owner.as_str(), shape.as_str())
}

/// Builds the full starting complement of pieces.
///
/// Each player gets one instance of every non-neutral shape; the neutral
/// hub shape gets a single shared instance.
pub fn generate_initial_pieces() -> BTreeMap<String, PieceInstance> {
    let mut pieces = BTreeMap::new();
    for shape in ALL_SHAPES {
        if shape.is_neutral() {
            pieces.insert(instance_id(Owner::Neutral, shape), PieceInstance::new(shape, Owner::Neutral));
            continue;
        }
        for owner in [Owner::Light, Owner::Dark] {
            pieces.insert(instance_id(owner, shape), PieceInstance::new(shape, owner));
        }
    }
    pieces
}
