//! Game vocabulary: colours, gestures and the colour sequence.

mod color;
mod gesture;
mod sequence;

pub use color::{Color, UnknownColor};
pub use gesture::{challenge_vocabulary, Gesture, GestureDebouncer, GestureRole, GESTURE_ROLES};
pub use sequence::Sequence;
