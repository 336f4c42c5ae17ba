use crate::alpha::{AlphaChannel, MultiValueAlpha, VisibilityHint};
use crate::constants::POLL_INTERVAL;
use crate::geometry::{
    DeviceGeometry, Gravity, HorizontalGravity, LayoutParams, Margins, NavigationMode,
    VerticalGravity,
};
use crate::memory::{MemoryInfo, MemorySample};
use crate::panic;
use std::cell::{Cell, RefCell};
use std::panic::AssertUnwindSafe;
use std::rc::Rc;
use tokio::sync::watch;
use tokio::task::{self, JoinHandle};
use tokio::time;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Invisible,
    Gone,
}

/// State shared with the poll task.
struct Poller {
    memory: Box<dyn MemoryInfo>,
    text: watch::Sender<String>,
}

impl Poller {
    fn poll(&self) {
        let fetched = panic::handle_unwind(
            "memory fetch",
            AssertUnwindSafe(|| self.memory.fetch()),
        );
        match fetched {
            Ok(Ok(status)) => {
                let sample = MemorySample::from(status);
                log::trace!("Fetched memory: {sample:?}");
                let text = sample.to_string();
                self.text.send_if_modified(|current| {
                    if *current == text {
                        return false;
                    }
                    *current = text;
                    true
                });
            }
            Ok(Err(e)) => log::error!("Failed to fetch memory: {e}"),
            Err(()) => {}
        }
    }
}

async fn poll_loop(poller: Rc<Poller>) {
    loop {
        poller.poll();
        // The interval starts once this tick is done, so the period drifts by the cost of a tick.
        time::sleep(POLL_INTERVAL).await;
    }
}

/// Text label showing available/total memory, refreshed every second while visible.
///
/// Polling runs as a local task, so the label must live inside a `tokio::task::LocalSet`.
pub struct MemoryLabel {
    visibility: Cell<Visibility>,
    alpha: MultiValueAlpha,
    geometry: Cell<Option<DeviceGeometry>>,
    layout: Cell<LayoutParams>,
    poller: Rc<Poller>,
    poll_task: RefCell<Option<JoinHandle<()>>>,
}

impl MemoryLabel {
    /// Creates a hidden label. Nothing is polled until it becomes visible.
    pub fn new(memory: Box<dyn MemoryInfo>) -> Self {
        let alpha = MultiValueAlpha::new();
        alpha.set_update_visibility(true);
        let (text, _) = watch::channel(String::new());
        Self {
            visibility: Cell::new(Visibility::Invisible),
            alpha,
            geometry: Cell::new(None),
            layout: Default::default(),
            poller: Rc::new(Poller { memory, text }),
            poll_task: RefCell::new(None),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility.get()
    }

    /// The only place visibility changes, so polling starts and stops exactly with it.
    ///
    /// # Panics
    ///
    /// Becoming visible outside a `LocalSet` panics.
    pub fn set_visibility(&self, visibility: Visibility) {
        let prev = self.visibility.replace(visibility);
        if prev != visibility {
            log::debug!("Visibility {prev:?} -> {visibility:?}");
        }

        let mut poll_task = self.poll_task.borrow_mut();
        if visibility == Visibility::Visible {
            if poll_task.as_ref().is_none_or(JoinHandle::is_finished) {
                log::trace!("Starting memory poll");
                *poll_task = Some(task::spawn_local(poll_loop(self.poller.clone())));
            }
        } else if let Some(handle) = poll_task.take() {
            log::trace!("Stopping memory poll");
            handle.abort();
        }
    }

    /// Whether a poll task is outstanding.
    pub fn is_polling(&self) -> bool {
        self.poll_task
            .borrow()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn set_geometry(&self, geometry: DeviceGeometry) {
        self.geometry.set(Some(geometry));
    }

    pub fn set_alpha(&self, channel: AlphaChannel, value: f32) {
        self.alpha.set(channel, value);

        match self.alpha.visibility_hint() {
            Some(VisibilityHint::Hide) if self.visibility() != Visibility::Invisible => {
                self.set_visibility(Visibility::Invisible)
            }
            Some(VisibilityHint::Show) if self.visibility() != Visibility::Visible => {
                self.set_visibility(Visibility::Visible)
            }
            _ => {}
        }
    }

    pub fn get_alpha(&self, channel: AlphaChannel) -> f32 {
        self.alpha.get(channel)
    }

    /// Rendered opacity, composed from all alpha channels.
    pub fn opacity(&self) -> f32 {
        self.alpha.composed()
    }

    pub fn update_margin(&self, mode: NavigationMode) {
        let Some(geometry) = self.geometry.get() else {
            log::warn!("Ignoring margin update for {mode:?}: no geometry set");
            return;
        };

        let bottom = geometry.bottom_margin(mode);
        log::debug!("Bottom margin {bottom}px for {mode:?}");
        self.layout.set(LayoutParams {
            margins: Margins {
                bottom,
                ..Default::default()
            },
            gravity: Gravity {
                horizontal: HorizontalGravity::Center,
                vertical: VerticalGravity::Bottom,
            },
        });
    }

    pub fn layout(&self) -> LayoutParams {
        self.layout.get()
    }

    pub fn text(&self) -> String {
        self.poller.text.borrow().clone()
    }

    /// Notified whenever the displayed text changes.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.poller.text.subscribe()
    }
}

impl Drop for MemoryLabel {
    fn drop(&mut self) {
        if let Some(handle) = self.poll_task.get_mut().take() {
            handle.abort();
        }
    }
}
