pub mod error;
pub mod types;

pub use error::{AttackError, BattleError};
pub use types::ActorId;
