//! Outbound navigation primitive

/// Receives the scoped browser paths the shell wants to navigate to.
///
/// Pushes are fire-and-forget: the shell does not wait for them and expects
/// the router to report the new location back via
/// `ShellController::handle_path_change`.
pub trait Navigator {
    fn push(&mut self, href: &str);
}

impl<F> Navigator for F
where
    F: FnMut(&str),
{
    fn push(&mut self, href: &str) {
        self(href)
    }
}

/// Keeps every pushed path, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingNavigator {
    pushed: Vec<String>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pushed(&self) -> &[String] {
        &self.pushed
    }

    pub fn last(&self) -> Option<&str> {
        self.pushed.last().map(String::as_str)
    }

    /// Hand over the recorded paths, leaving the recorder empty
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pushed)
    }
}

impl Navigator for RecordingNavigator {
    fn push(&mut self, href: &str) {
        log::debug!("navigate -> {}", href);
        self.pushed.push(href.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator() {
        let mut nav = RecordingNavigator::new();
        nav.push("/acme/eng/dashboard");
        nav.push("/acme/eng/calendar");
        assert_eq!(nav.last(), Some("/acme/eng/calendar"));
        assert_eq!(nav.take().len(), 2);
        assert!(nav.pushed().is_empty());
    }

    #[test]
    fn test_closure_navigator() {
        let mut seen = Vec::new();
        {
            let mut nav = |href: &str| seen.push(href.to_string());
            nav.push("/a/b/c");
        }
        assert_eq!(seen, vec!["/a/b/c"]);
    }
}
