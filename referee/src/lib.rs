mod recording;
mod selfplay;
pub use recording::*;
pub use selfplay::*;
