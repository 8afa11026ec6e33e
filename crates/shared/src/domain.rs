use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(EventId);
id_newtype!(RequesterId);

/// Normalizes user-typed enum names so `on-campus`, `on_campus` and
/// `On Campus` all resolve to the same variant.
fn normalize_label(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! labelled_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let wanted = normalize_label(raw);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| normalize_label(candidate.as_str()) == wanted)
                    .ok_or_else(|| CoreError::validation(format!("unknown {}: {raw}", $kind)))
            }
        }
    };
}

labelled_enum!(Category, "category", {
    Workshop => "Workshop",
    Hackathon => "Hackathon",
    Meetup => "Meetup",
    Lecture => "Lecture",
});

labelled_enum!(Location, "location", {
    OnCampus => "On Campus",
    OffCampus => "Off Campus",
    Online => "Online",
});

labelled_enum!(TimeFilter, "time filter", {
    Today => "today",
    Week => "week",
    Month => "month",
    Upcoming => "upcoming",
});

labelled_enum!(View, "view", {
    Events => "events",
    EventDetails => "eventDetails",
    MyEvents => "myEvents",
    Calendar => "calendar",
    Profile => "profile",
});

impl Default for View {
    fn default() -> Self {
        Self::Events
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub location: Location,
    pub category: Category,
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub hobbies: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            username: "User".into(),
            about: String::new(),
            course: String::new(),
            specialty: String::new(),
            hobbies: String::new(),
            interests: Vec::new(),
        }
    }
}

/// Editable text fields of the profile form. Interests are managed separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub username: String,
    pub about: String,
    pub course: String,
    pub specialty: String,
    pub hobbies: String,
}

impl From<&Profile> for ProfileFields {
    fn from(profile: &Profile) -> Self {
        Self {
            username: profile.username.clone(),
            about: profile.about.clone(),
            course: profile.course.clone(),
            specialty: profile.specialty.clone(),
            hobbies: profile.hobbies.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub photo: Option<String>,
    pub location: Location,
    pub category: Category,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Time-of-day stored as `HH:MM`; `HH:MM:SS` is accepted on read.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_display_labels_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&Location::OnCampus).expect("json"),
            "\"On Campus\""
        );
        assert_eq!(
            serde_json::to_string(&View::EventDetails).expect("json"),
            "\"eventDetails\""
        );
        let parsed: Category = serde_json::from_str("\"Hackathon\"").expect("category");
        assert_eq!(parsed, Category::Hackathon);
    }

    #[test]
    fn parses_loose_cli_labels() {
        assert_eq!("on-campus".parse::<Location>().expect("loc"), Location::OnCampus);
        assert_eq!("Off Campus".parse::<Location>().expect("loc"), Location::OffCampus);
        assert_eq!("MEETUP".parse::<Category>().expect("cat"), Category::Meetup);
        assert_eq!("my_events".parse::<View>().expect("view"), View::MyEvents);
        assert!("party".parse::<Category>().is_err());
    }

    #[test]
    fn event_time_is_stored_as_hours_and_minutes() {
        let event = Event {
            id: EventId::new("1"),
            title: "Meetup".into(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 11, 20).expect("date"),
            time: NaiveTime::from_hms_opt(18, 0, 0).expect("time"),
            location: Location::OnCampus,
            category: Category::Meetup,
            photo: String::new(),
        };
        let json = serde_json::to_value(&event).expect("json");
        assert_eq!(json["date"], "2025-11-20");
        assert_eq!(json["time"], "18:00");

        let with_seconds = hh_mm::parse("09:30:00").expect("seconds accepted");
        assert_eq!(with_seconds, NaiveTime::from_hms_opt(9, 30, 0).expect("time"));
    }

    #[test]
    fn profile_defaults_missing_fields() {
        let profile: Profile = serde_json::from_str(r#"{"username":"sam"}"#).expect("profile");
        assert_eq!(profile.username, "sam");
        assert!(profile.interests.is_empty());
        assert_eq!(Profile::default().username, "User");
    }
}
