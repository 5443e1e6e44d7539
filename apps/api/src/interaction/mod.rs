// Slider Interaction Model
// Pure geometry (pointer → position → clip/handle) and the drag gesture state machine.
// The artifact generator derives its embedded script from these definitions.

pub mod geometry;
pub mod gesture;
pub mod labels;

