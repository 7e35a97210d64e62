//! Per-tick input snapshots delivered by the host

use serde::{Deserialize, Serialize};

/// Buttons the host reports, with the host's bit values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Duck,
    Sprint,
    Use,
    FirePrimary,
    FireSecondary,
    Reload,
    FireThird,
}

impl Button {
    pub const fn bit(self) -> u32 {
        match self {
            Self::Forward => 1 << 1,
            Self::Backward => 1 << 2,
            Self::Left => 1 << 3,
            Self::Right => 1 << 4,
            Self::Jump => 1 << 5,
            Self::Duck => 1 << 6,
            Self::Sprint => 1 << 7,
            Self::Use => 1 << 8,
            Self::FirePrimary => 1 << 10,
            Self::FireSecondary => 1 << 11,
            Self::Reload => 1 << 13,
            Self::FireThird => 1 << 27,
        }
    }
}

/// Set of held buttons; serialized as a list of button names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Button>", into = "Vec<Button>")]
pub struct ButtonSet(u32);

impl ButtonSet {
    pub const EMPTY: Self = Self(0);

    pub fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn with(self, button: Button) -> Self {
        Self(self.0 | button.bit())
    }
}

const ALL_BUTTONS: [Button; 12] = [
    Button::Forward,
    Button::Backward,
    Button::Left,
    Button::Right,
    Button::Jump,
    Button::Duck,
    Button::Sprint,
    Button::Use,
    Button::FirePrimary,
    Button::FireSecondary,
    Button::Reload,
    Button::FireThird,
];

impl From<Vec<Button>> for ButtonSet {
    fn from(buttons: Vec<Button>) -> Self {
        buttons.into_iter().collect()
    }
}

impl From<ButtonSet> for Vec<Button> {
    fn from(set: ButtonSet) -> Self {
        ALL_BUTTONS.into_iter().filter(|b| set.contains(*b)).collect()
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, ButtonSet::with)
    }
}

/// Buttons held this tick and the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputState {
    #[serde(default)]
    pub current: ButtonSet,
    #[serde(default)]
    pub previous: ButtonSet,
}

impl InputState {
    #[cfg(test)]
    pub fn new(current: ButtonSet, previous: ButtonSet) -> Self {
        Self { current, previous }
    }

    pub fn is_down(&self, button: Button) -> bool {
        self.current.contains(button)
    }

    pub fn was_down(&self, button: Button) -> bool {
        self.previous.contains(button)
    }

    /// Held last tick, released this tick
    pub fn was_just_released(&self, button: Button) -> bool {
        self.was_down(button) && !self.is_down(button)
    }
}
