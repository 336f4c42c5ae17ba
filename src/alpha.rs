use crate::constants::{ALPHA_CHANNEL_COUNT, ALPHA_CUTOFF_THRESHOLD};
use std::array;
use std::cell::Cell;

/// Independently driven contributions to the label's opacity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlphaChannel {
    /// Driven by state transition animations of the containing screen.
    StateControl = 0,
    /// Driven by the label's own fade in/out progress.
    FadeProgress = 1,
}

impl AlphaChannel {
    pub const ALL: [Self; ALPHA_CHANNEL_COUNT] = [Self::StateControl, Self::FadeProgress];
}

/// Whether a composed opacity should show or hide its element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VisibilityHint {
    Show,
    Hide,
}

/// A fixed set of opacity channels, composed by multiplication.
pub struct MultiValueAlpha {
    values: [Cell<f32>; ALPHA_CHANNEL_COUNT],
    update_visibility: Cell<bool>,
}

impl Default for MultiValueAlpha {
    fn default() -> Self {
        Self {
            values: array::from_fn(|_| Cell::new(1.0)),
            update_visibility: Cell::new(false),
        }
    }
}

impl MultiValueAlpha {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one channel, clamped to [0, 1]. NaN is ignored.
    pub fn set(&self, channel: AlphaChannel, value: f32) {
        if value.is_nan() {
            log::warn!("Ignoring NaN alpha for {channel:?}");
            return;
        }
        let clamped = value.clamp(0.0, 1.0);
        if clamped != value {
            log::warn!("Clamping alpha {value} for {channel:?} to {clamped}");
        }
        self.values[channel as usize].set(clamped);
    }

    pub fn get(&self, channel: AlphaChannel) -> f32 {
        self.values[channel as usize].get()
    }

    /// The opacity actually rendered: the product of all channels.
    pub fn composed(&self) -> f32 {
        self.values.iter().map(Cell::get).product()
    }

    pub fn set_update_visibility(&self, update_visibility: bool) {
        self.update_visibility.set(update_visibility);
    }

    pub fn updates_visibility(&self) -> bool {
        self.update_visibility.get()
    }

    /// What visibility the composed opacity implies, if this compositor drives visibility.
    ///
    /// Exactly at the cutoff nothing is implied, so the element keeps whatever it has.
    pub fn visibility_hint(&self) -> Option<VisibilityHint> {
        if !self.updates_visibility() {
            return None;
        }
        let composed = self.composed();
        if composed < ALPHA_CUTOFF_THRESHOLD {
            Some(VisibilityHint::Hide)
        } else if composed > ALPHA_CUTOFF_THRESHOLD {
            Some(VisibilityHint::Show)
        } else {
            None
        }
    }
}
