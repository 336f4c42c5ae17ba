use crate::constants::{DEFAULT_GESTURE_MARGIN_PX, DEFAULT_THREE_BUTTON_MARGIN_PX};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// System navigation input scheme.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    #[default]
    NoButton,
    TwoButtons,
    ThreeButtons,
}

impl FromStr for NavigationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_button" | "gesture" => Ok(Self::NoButton),
            "two_buttons" => Ok(Self::TwoButtons),
            "three_buttons" => Ok(Self::ThreeButtons),
            _ => Err(format!(
                "unknown navigation mode `{s}` (expected gesture, no_button, two_buttons or three_buttons)"
            )),
        }
    }
}

/// Device-specific layout constants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceGeometry {
    /// Bottom margin when navigating with gestures.
    pub gesture_margin_px: i32,
    /// Bottom margin when the three-button navigation bar is shown.
    pub three_button_margin_px: i32,
}

impl Default for DeviceGeometry {
    fn default() -> Self {
        Self {
            gesture_margin_px: DEFAULT_GESTURE_MARGIN_PX,
            three_button_margin_px: DEFAULT_THREE_BUTTON_MARGIN_PX,
        }
    }
}

impl DeviceGeometry {
    pub fn bottom_margin(&self, mode: NavigationMode) -> i32 {
        match mode {
            NavigationMode::ThreeButtons => self.three_button_margin_px,
            NavigationMode::NoButton | NavigationMode::TwoButtons => self.gesture_margin_px,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HorizontalGravity {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VerticalGravity {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Gravity {
    pub horizontal: HorizontalGravity,
    pub vertical: VerticalGravity,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Placement of an element inside its parent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutParams {
    pub margins: Margins,
    pub gravity: Gravity,
}
