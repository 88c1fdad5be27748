use crate::phase::CombatPhase;
use crate::player::{Position, Side};

/// Side that acts first in `phase`.
///
/// Heads-up order: the small blind opens pre-flop and on the flop, the big
/// blind opens the turn and river. Phases without betting have no actor.
pub fn get_active_player(phase: CombatPhase, small_blind: Side) -> Option<Side> {
    let opener = match phase {
        CombatPhase::SpellPet | CombatPhase::Faith => Position::SmallBlind,
        CombatPhase::Foresight | CombatPhase::Destiny => Position::BigBlind,
        CombatPhase::FirstStrike | CombatPhase::Mulligan | CombatPhase::Resolution => {
            return None
        }
    };
    Some(opener.holder(small_blind))
}
