use crate::alpha::AlphaChannel;
use crate::constants::FADE_FRAME_INTERVAL;
use crate::geometry::{DeviceGeometry, NavigationMode};
use crate::label::{MemoryLabel, Visibility};
use crate::memory::MemoryInfo;
use std::cell::RefCell;
use std::future;
use std::io::Write;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};

pub struct OverlaySettings {
    pub geometry: DeviceGeometry,
    pub navigation_mode: NavigationMode,
    pub fade: Duration,
    /// How long to stay up once faded in; `None` stays up forever.
    pub dismiss_after: Option<Duration>,
}

/// Hosts a memory label the way a task switcher screen would: fades it in, shows it, fades it out.
///
/// The fade in drives `FadeProgress`, and dismissal drives `StateControl`,
/// so the label's own visibility handling starts and stops polling.
pub struct Overlay<W: Write> {
    label: MemoryLabel,
    fade: Duration,
    dismiss_after: Option<Duration>,
    output: RefCell<W>,
}

impl<W: Write> Overlay<W> {
    pub fn new(memory: Box<dyn MemoryInfo>, settings: OverlaySettings, output: W) -> Self {
        let label = MemoryLabel::new(memory);
        label.set_geometry(settings.geometry);
        label.update_margin(settings.navigation_mode);
        // Fade first, so the label never looks opaque enough to start polling here.
        label.set_alpha(AlphaChannel::FadeProgress, 0.0);
        label.set_alpha(AlphaChannel::StateControl, 1.0);

        Self {
            label,
            fade: settings.fade,
            dismiss_after: settings.dismiss_after,
            output: RefCell::new(output),
        }
    }

    pub fn label(&self) -> &MemoryLabel {
        &self.label
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    /// Fade in, render every text change, then fade out once dismissed.
    ///
    /// Must run inside a `tokio::task::LocalSet`. Returns once faded out.
    pub async fn run(&self) {
        log::info!("Showing overlay");
        let mut text = self.label.subscribe();

        let lifecycle = async {
            self.animate(AlphaChannel::FadeProgress, 0.0, 1.0).await;
            match self.dismiss_after {
                Some(after) => time::sleep(after).await,
                None => future::pending().await,
            }
            log::debug!("Dismissing overlay");
            self.animate(AlphaChannel::StateControl, 1.0, 0.0).await;
            log::info!("Overlay dismissed");
        };

        let render = async {
            while text.changed().await.is_ok() {
                let frame = text.borrow_and_update().clone();
                self.render(&frame);
            }
            // The label owns the sender, so this is unreachable while we hold it.
            future::pending::<()>().await
        };

        tokio::select! {
            () = lifecycle => {}
            () = render => {}
        }
    }

    async fn animate(&self, channel: AlphaChannel, from: f32, to: f32) {
        log::debug!("Animating {channel:?} {from} -> {to} over {:?}", self.fade);
        let started = Instant::now();
        let mut frames = time::interval(FADE_FRAME_INTERVAL);
        frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            frames.tick().await;
            let progress = if self.fade.is_zero() {
                1.0
            } else {
                (started.elapsed().as_secs_f32() / self.fade.as_secs_f32()).min(1.0)
            };
            self.label.set_alpha(channel, from + (to - from) * progress);
            if progress >= 1.0 {
                break;
            }
        }
        log::debug!("Finished animating {channel:?}");
    }

    fn render(&self, text: &str) {
        if self.label.visibility() != Visibility::Visible || text.is_empty() {
            return;
        }

        let layout = self.label.layout();
        if let Err(e) = writeln!(
            self.output.borrow_mut(),
            "{text} (opacity {:.2}, bottom margin {}px)",
            self.label.opacity(),
            layout.margins.bottom
        ) {
            log::error!("Failed to write frame: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeMemory;
    use tokio::task::LocalSet;

    fn settings(dismiss_after: Option<Duration>) -> OverlaySettings {
        OverlaySettings {
            geometry: DeviceGeometry {
                gesture_margin_px: 20,
                three_button_margin_px: 80,
            },
            navigation_mode: NavigationMode::ThreeButtons,
            fade: Duration::from_millis(100),
            dismiss_after,
        }
    }

    #[test]
    fn starts_hidden_and_placed() {
        let overlay = Overlay::new(Box::new(FakeMemory::new(0, 0)), settings(None), Vec::new());

        assert_eq!(overlay.label().visibility(), Visibility::Invisible);
        assert!(!overlay.label().is_polling());
        assert_eq!(overlay.label().get_alpha(AlphaChannel::FadeProgress), 0.0);
        assert_eq!(overlay.label().get_alpha(AlphaChannel::StateControl), 1.0);
        assert_eq!(overlay.label().layout().margins.bottom, 80);
    }

    #[tokio::test(start_paused = true)]
    async fn fades_in_polls_and_dismisses() {
        LocalSet::new()
            .run_until(async {
                let memory = FakeMemory::new(2_147_483_648, 4_294_967_296);
                let calls = memory.calls();
                let overlay = Overlay::new(
                    Box::new(memory),
                    settings(Some(Duration::from_millis(2500))),
                    Vec::new(),
                );
                let start = Instant::now();

                overlay.run().await;

                // Visible from the second fade in frame (16ms) until StateControl drops
                // under the cutoff, 2500ms after the fade in ended.
                assert!(start.elapsed() >= Duration::from_millis(2700));
                assert_eq!(calls.borrow().len(), 3);
                assert_eq!(overlay.label().visibility(), Visibility::Invisible);
                assert!(!overlay.label().is_polling());
                assert_eq!(overlay.label().get_alpha(AlphaChannel::StateControl), 0.0);
                assert_eq!(overlay.label().get_alpha(AlphaChannel::FadeProgress), 1.0);

                let output = String::from_utf8(overlay.into_output()).unwrap();
                let lines = output.lines().collect::<Vec<_>>();
                assert_eq!(lines.len(), 1);
                assert!(lines[0].starts_with("RAM: 2560/4096 MB (opacity "));
                assert!(lines[0].ends_with("bottom margin 80px)"));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn zero_length_fade_jumps() {
        LocalSet::new()
            .run_until(async {
                let overlay = Overlay::new(
                    Box::new(FakeMemory::new(0, 0)),
                    OverlaySettings {
                        fade: Duration::ZERO,
                        ..settings(None)
                    },
                    Vec::new(),
                );

                let still_up = time::timeout(Duration::from_millis(10), overlay.run()).await;
                assert!(still_up.is_err());
                assert_eq!(overlay.label().get_alpha(AlphaChannel::FadeProgress), 1.0);
                assert_eq!(overlay.label().visibility(), Visibility::Visible);
                assert!(overlay.label().is_polling());

                let output = String::from_utf8(overlay.into_output()).unwrap();
                assert_eq!(output, "RAM: 512/0 MB (opacity 1.00, bottom margin 80px)\n");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn stays_up_without_dismiss() {
        LocalSet::new()
            .run_until(async {
                let memory = FakeMemory::new(0, 0);
                let calls = memory.calls();
                let overlay = Overlay::new(Box::new(memory), settings(None), Vec::new());

                let still_up = time::timeout(Duration::from_secs(10), overlay.run()).await;
                assert!(still_up.is_err());
                assert_eq!(overlay.label().visibility(), Visibility::Visible);
                assert_eq!(overlay.label().opacity(), 1.0);
                // Polled at 16ms, then once a second.
                assert_eq!(calls.borrow().len(), 10);
            })
            .await;
    }
}
