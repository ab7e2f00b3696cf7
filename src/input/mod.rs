mod key;
mod mouse;

pub use key::{Key, Modifiers};
pub use mouse::Mouse;
