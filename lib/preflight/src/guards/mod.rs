//! Default guards and after-hook.
//!
//! Registered by [`PipelineBuilder::with_default_guards`](crate::PipelineBuilder::with_default_guards)
//! in this fixed order:
//!
//! 1. [`LoadingGuard`] - shows the loading indicator, never blocks
//! 2. [`TokenGuard`] - blocks when a token is required but not cached
//! 3. [`NetworkGuard`] - blocks when the network is unreachable
//!
//! followed by the [`HideLoadingHook`] after-hook.

mod hide_loading;
mod loading;
mod network;
mod token;

pub use hide_loading::HideLoadingHook;
pub use loading::LoadingGuard;
pub use network::NetworkGuard;
pub use token::TokenGuard;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use preflight_core::{Indicator, Navigator};

    /// Indicator recording every call.
    #[derive(Debug, Default)]
    pub struct RecordingIndicator {
        pub events: Mutex<Vec<String>>,
    }

    impl RecordingIndicator {
        pub fn events(&self) -> Vec<String> {
            self.events.lock().expect("lock").clone()
        }
    }

    impl Indicator for RecordingIndicator {
        fn show_loading(&self) {
            self.events.lock().expect("lock").push("show_loading".to_string());
        }

        fn hide_loading(&self) {
            self.events.lock().expect("lock").push("hide_loading".to_string());
        }

        fn show_toast(&self, message: &str) {
            self.events.lock().expect("lock").push(format!("toast:{message}"));
        }
    }

    /// Navigator recording every redirect.
    #[derive(Debug, Default)]
    pub struct RecordingNavigator {
        pub paths: Mutex<Vec<String>>,
    }

    impl RecordingNavigator {
        pub fn paths(&self) -> Vec<String> {
            self.paths.lock().expect("lock").clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn redirect_to(&self, path: &str) {
            self.paths.lock().expect("lock").push(path.to_string());
        }
    }
}
