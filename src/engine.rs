//! Engine context.
//!
//! Owns the rules configuration, the shape catalog cache, and the game id
//! counter. Every game operation goes through an [`Engine`] so that no rules
//! state lives in globals; games themselves are plain [`GameState`] values
//! owned by the caller.

use std::sync::Arc;

use tracing::debug;

use crate::board::GameState;
use crate::catalog::{Catalog, CatalogCache};
use crate::config::EngineConfig;
use crate::movegen;
use crate::resolve::{apply_placement, validate_placement, Placement, PlacementIntent, RejectReason};

/// Rules engine context.
///
/// Not internally synchronized: callers serving several games from threads
/// must serialize mutating calls per game themselves.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
    cache: CatalogCache,
    game_seq: u64,
}

impl Engine {
    /// Creates an engine with the default rules and the standard shapes.
    pub fn new() -> Self {
        Engine::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Engine { config, ..Engine::default() }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// The catalog cache, for editing shapes or forcing a rebuild.
    pub fn cache_mut(&mut self) -> &mut CatalogCache {
        &mut self.cache
    }

    /// The catalog for the configured reflection setting.
    pub fn catalog(&mut self) -> Arc<Catalog> {
        self.cache.build(self.config.allow_reflection)
    }

    /// Starts a new game. Without an explicit id, one is generated from the
    /// engine's counter (`game_1`, `game_2`, ...).
    pub fn new_game(&mut self, id: Option<&str>) -> GameState {
        self.game_seq += 1;
        let id = match id {
            Some(id) => id.to_string(),
            None => format!("game_{}", self.game_seq),
        };
        debug!(game = %id, "new game");
        GameState::new(id)
    }

    /// Checks a placement without changing the game.
    pub fn validate(&mut self, state: &GameState, intent: &PlacementIntent) -> Result<Placement, RejectReason> {
        let catalog = self.catalog();
        validate_placement(state, &catalog, &self.config, intent)
    }

    /// Validates `intent` and, if legal, applies it to `state`.
    ///
    /// Rejections leave `state` untouched.
    pub fn attempt_placement(
        &mut self,
        state: &mut GameState,
        intent: &PlacementIntent,
    ) -> Result<Placement, RejectReason> {
        let catalog = self.catalog();
        let placement = match validate_placement(state, &catalog, &self.config, intent) {
            Ok(p) => p,
            Err(reason) => {
                debug!(game = %state.id, piece = %intent.piece_id, reason = reason.code(), "placement rejected");
                return Err(reason);
            }
        };
        apply_placement(state, &catalog, intent, &placement);
        debug!(
            game = %state.id,
            piece = %intent.piece_id,
            anchor = intent.anchor,
            captures = placement.captures.len(),
            territories = placement.new_territories.len(),
            "placement applied"
        );
        Ok(placement)
    }

    /// Every placement of `instance` that would currently be accepted.
    pub fn legal_placements(&mut self, state: &GameState, instance: &str) -> Vec<PlacementIntent> {
        let catalog = self.catalog();
        movegen::legal_placements(state, &catalog, &self.config, instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Player, Rotation};

    #[test]
    fn generated_ids_are_unique() {
        let mut engine = Engine::new();
        let a = engine.new_game(None);
        let b = engine.new_game(None);
        assert_ne!(a.id, b.id);
        assert_eq!(engine.new_game(Some("named")).id, "named");
    }

    #[test]
    fn catalog_follows_reflection_setting() {
        let mut engine = Engine::new();
        assert!(engine.catalog().allow_reflection());
        engine.config_mut().allow_reflection = false;
        assert!(!engine.catalog().allow_reflection());
    }

    #[test]
    fn catalog_is_reused_between_calls() {
        let mut engine = Engine::new();
        let a = engine.catalog();
        let b = engine.catalog();
        assert!(Arc::ptr_eq(&a, &b));
        engine.cache_mut().invalidate();
        assert!(!Arc::ptr_eq(&a, &engine.catalog()));
    }

    #[test]
    fn rejection_leaves_state_untouched() {
        let mut engine = Engine::new();
        let mut state = engine.new_game(Some("r"));
        let before = state.clone();
        let r = engine.attempt_placement(&mut state, &PlacementIntent::new("LIGHT_WALL3", 9, Rotation::Deg0, false));
        assert_eq!(r, Err(RejectReason::OutOfBounds));
        assert_eq!(state, before);
    }

    #[test]
    fn validate_does_not_mutate() {
        let mut engine = Engine::new();
        let state = engine.new_game(Some("v"));
        let intent = PlacementIntent::new("LIGHT_WALL3", 0, Rotation::Deg0, false);
        assert!(engine.validate(&state, &intent).is_ok());
        assert!(state.board.is_empty());
        assert_eq!(state.turn, Player::Light);
    }

    #[test]
    fn turn_alternates_on_success() {
        let mut engine = Engine::new();
        let mut state = engine.new_game(None);
        engine
            .attempt_placement(&mut state, &PlacementIntent::new("LIGHT_WALL3", 0, Rotation::Deg0, false))
            .unwrap();
        assert_eq!(state.turn, Player::Dark);
        engine
            .attempt_placement(&mut state, &PlacementIntent::new("DARK_WALL3", 90, Rotation::Deg0, false))
            .unwrap();
        assert_eq!(state.turn, Player::Light);
        assert_eq!(state.history.len(), 2);
    }
}
