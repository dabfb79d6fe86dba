pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod keys;
pub mod listener;
pub mod press;
pub mod state;
pub mod view;
// cmd and reports belong to the binary (main.rs).

pub use config::{KeyColor, PianoConfig, ShowPressMode};
pub use error::{PianoError, PkResult};
pub use geometry::{KeyRect, Layout};
pub use gesture::{Pointer, PointerEvent};
pub use keys::KeyIndex;
pub use listener::{KeyEvent, PianoListener};
pub use press::PressedKeys;
pub use state::SavedState;
pub use view::PianoView;
