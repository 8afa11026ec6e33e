use anyhow::Result;
use chrono::NaiveDate;
use shared::domain::Event;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub url: Url,
    pub text: String,
}

/// Something that can hand a link to the user: a native share sheet, the
/// clipboard, or plain output.
pub trait ShareTarget {
    fn name(&self) -> &'static str;
    fn share(&mut self, link: &ShareLink) -> Result<()>;
}

/// `Thu, Nov 20, 2025`
pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

pub fn share_link(event: &Event, base_url: &Url) -> ShareLink {
    let mut url = base_url.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("event", event.id.as_str());
    ShareLink {
        url,
        text: format!(
            "Check out {} on {}!",
            event.title,
            format_event_date(event.date)
        ),
    }
}

/// Tries each target in order and returns the name of the first that succeeded.
/// Failures are logged and never propagated.
pub fn share_with_fallback(
    link: &ShareLink,
    targets: &mut [&mut dyn ShareTarget],
) -> Option<&'static str> {
    for target in targets.iter_mut() {
        match target.share(link) {
            Ok(()) => {
                tracing::debug!(via = target.name(), url = %link.url, "shared event link");
                return Some(target.name());
            }
            Err(error) => {
                tracing::warn!(via = target.name(), %error, "share target failed; falling back");
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use chrono::NaiveTime;
    use shared::domain::{Category, EventId, Location};

    use super::*;

    fn event() -> Event {
        Event {
            id: EventId::new("42"),
            title: "Rust Night".into(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 11, 20).expect("date"),
            time: NaiveTime::from_hms_opt(18, 0, 0).expect("time"),
            location: Location::Online,
            category: Category::Meetup,
            photo: String::new(),
        }
    }

    struct Recording {
        name: &'static str,
        fail: bool,
        received: Vec<String>,
    }

    impl ShareTarget for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn share(&mut self, link: &ShareLink) -> Result<()> {
            if self.fail {
                return Err(anyhow!("{} unavailable", self.name));
            }
            self.received.push(link.url.to_string());
            Ok(())
        }
    }

    #[test]
    fn link_carries_event_query_and_readable_date() {
        let base = Url::parse("https://campus.example/app/?stale=1").expect("url");
        let link = share_link(&event(), &base);
        assert_eq!(link.url.as_str(), "https://campus.example/app/?event=42");
        assert_eq!(link.text, "Check out Rust Night on Thu, Nov 20, 2025!");
    }

    #[test]
    fn falls_back_to_next_target_on_failure() {
        let link = share_link(&event(), &Url::parse("http://localhost/").expect("url"));
        let mut native = Recording {
            name: "native",
            fail: true,
            received: Vec::new(),
        };
        let mut clipboard = Recording {
            name: "clipboard",
            fail: false,
            received: Vec::new(),
        };

        let used = share_with_fallback(&link, &mut [&mut native, &mut clipboard]);
        assert_eq!(used, Some("clipboard"));
        assert!(native.received.is_empty());
        assert_eq!(clipboard.received, vec!["http://localhost/?event=42"]);
    }

    #[test]
    fn reports_none_when_every_target_fails() {
        let link = share_link(&event(), &Url::parse("http://localhost/").expect("url"));
        let mut only = Recording {
            name: "native",
            fail: true,
            received: Vec::new(),
        };
        assert_eq!(share_with_fallback(&link, &mut [&mut only]), None);
    }
}
