//! The status banner: the single line the pet is currently saying.
use bevy::prelude::Resource;

/// Holds at most one visible line with an absolute expiry deadline.
/// A newer line simply replaces the old one.
#[derive(Resource, Debug, Default)]
pub struct StatusBanner {
    text: String,
    until_ms: u64,
}

impl StatusBanner {
    pub fn show(&mut self, text: impl Into<String>, now_ms: u64, duration_ms: u64) {
        self.text = text.into();
        self.until_ms = now_ms + duration_ms;
    }

    pub fn clear_expired(&mut self, now_ms: u64) {
        if !self.text.is_empty() && now_ms >= self.until_ms {
            self.text.clear();
        }
    }

    /// The visible line, if any.
    pub fn text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_shows_until_its_deadline() {
        let mut banner = StatusBanner::default();
        assert_eq!(banner.text(), None);

        banner.show("hello", 1000, 4200);
        banner.clear_expired(5199);
        assert_eq!(banner.text(), Some("hello"));

        banner.clear_expired(5200);
        assert_eq!(banner.text(), None);
    }

    #[test]
    fn newer_lines_replace_and_extend() {
        let mut banner = StatusBanner::default();
        banner.show("first", 0, 1000);
        banner.show("second", 500, 1000);

        banner.clear_expired(1100);
        assert_eq!(banner.text(), Some("second"));
        banner.clear_expired(1500);
        assert_eq!(banner.text(), None);
    }
}
