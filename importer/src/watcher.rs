use extractors::{contains_profile_markup, CompiledSelectors};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

pub type DomChangedCallback = Arc<dyn Fn() + Send + Sync>;

/// Debounced "page changed" subscription. Whoever observes the page feeds
/// added markup into `notify`; subscribers run once per relevant change,
/// after the debounce delay.
pub struct DomWatcher {
    selectors: CompiledSelectors,
    debounce: Duration,
    subscribers: Arc<Mutex<Vec<DomChangedCallback>>>,
}

impl DomWatcher {
    pub fn new(selectors: CompiledSelectors, debounce: Duration) -> Self {
        Self {
            selectors,
            debounce,
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn on_dom_changed<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Arc::new(callback));
        }
    }

    /// Schedules the subscribers when any added fragment holds profile-like
    /// markup. Fire-and-forget: a scheduled run cannot be cancelled. Must be
    /// called from within a tokio runtime.
    pub fn notify<S: AsRef<str>>(&self, added_fragments: &[S]) -> bool {
        let relevant = added_fragments
            .iter()
            .any(|fragment| contains_profile_markup(fragment.as_ref(), &self.selectors));
        if !relevant {
            return false;
        }

        let subscribers = self.subscribers.clone();
        let delay = self.debounce;
        debug!("Profile markup added, re-scanning in {:?}", delay);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let callbacks: Vec<DomChangedCallback> = match subscribers.lock() {
                Ok(list) => list.clone(),
                Err(_) => return,
            };
            for callback in callbacks {
                callback();
            }
        });

        true
    }
}
