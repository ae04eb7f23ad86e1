//! Round simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters through `tick(state, elapsed)`
//! - Randomness only through the state's `RandomSource`
//! - No rendering or scene-graph dependencies

pub mod grid;
pub mod random;
pub mod state;
pub mod tick;
pub mod timer;

pub use grid::{Buttons, Direction, GridSelector, step};
pub use random::RandomSource;
pub use state::{
    Coffin, Cross, EndReason, GamePhase, GameState, LifeSlot, RoundResult,
};
pub use tick::tick;
pub use timer::RoundTimer;
