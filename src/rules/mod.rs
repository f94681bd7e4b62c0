mod board;
pub use board::BoardGeometry;

mod dice;
pub use dice::Roll;
pub use dice::MAX_REVEAL_FRAMES;
pub use dice::roll_sequence;

mod facing;
pub use facing::Facing;
pub use facing::facing_after_move;

mod jumps;
pub use jumps::JumpIssue;
pub use jumps::JumpKind;
pub use jumps::JumpMap;
pub use jumps::ValidationMode;
pub use jumps::check_jumps;
pub use jumps::validate_jumps;

mod layout;
pub use layout::DEFAULT_MAX_ATTEMPTS;
pub use layout::GameLayout;

mod moves;
pub use moves::MoveOutcome;
pub use moves::resolve_move;

mod player;
pub use player::Player;
