use std::fmt;

/// The robot's fixed action set. `ALL` lists actions in the canonical order;
/// policy extraction breaks value ties toward the earlier-listed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Vacuum,
}

impl Action {
    /// Every action, in tie-breaking order.
    pub const ALL: [Action; 5] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Vacuum,
    ];

    /// True for the four movement actions.
    pub fn is_movement(&self) -> bool {
        !matches!(self, Action::Vacuum)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Vacuum => "vacuum",
        })
    }
}
