pub use actions::*;
pub use agreement::*;
pub use board::*;
pub use errors::*;
pub use events::*;
pub use game::*;
pub use phase::*;
pub use players::*;
pub use roster::*;
pub use visualization::*;

mod actions;
mod agreement;
#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod events;
mod game;
mod phase;
mod players;
mod roster;
mod visualization;
