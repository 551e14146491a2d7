use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default length of the show/hide visual transition.
pub const DEFAULT_TRANSITION_MS: u64 = 300;

/// Well-known id of the prompt element in the host document.
pub const PROMPT_ELEMENT_ID: &str = "consent-prompt";

/// Class name signaling the open state to the stylesheet.
pub const OPEN_CLASS: &str = "consent-open";

/// Phase of the prompt's visual transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVisibility {
    Hidden,
    Opening,
    Open,
    Closing,
}

/// Handle to the prompt element in the host document.
pub trait PromptSurface: Send + Sync {
    /// Toggle the element's hidden flag.
    fn set_hidden(&self, hidden: bool);

    /// Toggle the styling marker that drives the visual transition.
    fn set_open_marker(&self, on: bool);
}

/// Show/hide operations over the prompt element.
///
/// A missing element turns every operation into a no-op. The end of
/// the transition is a scheduled callback with a fixed delay, not an
/// animation-completion event: the engine may skip the animation
/// entirely and the event would never fire.
pub struct UiBridge {
    surface: Option<Arc<dyn PromptSurface>>,
    transition: Duration,
    visibility: Arc<Mutex<PromptVisibility>>,
}

impl UiBridge {
    pub fn new(surface: Option<Arc<dyn PromptSurface>>) -> Self {
        Self::with_transition(surface, Duration::from_millis(DEFAULT_TRANSITION_MS))
    }

    pub fn with_transition(surface: Option<Arc<dyn PromptSurface>>, transition: Duration) -> Self {
        Self {
            surface,
            transition,
            visibility: Arc::new(Mutex::new(PromptVisibility::Hidden)),
        }
    }

    pub fn visibility(&self) -> PromptVisibility {
        *self.visibility.lock()
    }

    /// Unhide immediately; the styling marker lands on the next
    /// scheduled turn so the stylesheet transition can run.
    pub fn show(&self) {
        let Some(surface) = &self.surface else {
            debug!("prompt element absent, show is a no-op");
            return;
        };
        surface.set_hidden(false);
        *self.visibility.lock() = PromptVisibility::Opening;

        let surface = Arc::clone(surface);
        let visibility = Arc::clone(&self.visibility);
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            surface.set_open_marker(true);
            let mut vis = visibility.lock();
            if *vis == PromptVisibility::Opening {
                *vis = PromptVisibility::Open;
            }
        });
    }

    /// Remove the marker now; mark the element hidden once the
    /// declared transition time has passed.
    pub fn hide(&self) {
        let Some(surface) = &self.surface else {
            debug!("prompt element absent, hide is a no-op");
            return;
        };
        surface.set_open_marker(false);
        *self.visibility.lock() = PromptVisibility::Closing;

        let surface = Arc::clone(surface);
        let visibility = Arc::clone(&self.visibility);
        let transition = self.transition;
        tokio::spawn(async move {
            tokio::time::sleep(transition).await;
            surface.set_hidden(true);
            let mut vis = visibility.lock();
            if *vis == PromptVisibility::Closing {
                *vis = PromptVisibility::Hidden;
            }
        });
    }
}
