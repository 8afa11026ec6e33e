use chrono::{NaiveDate, NaiveTime};
use shared::domain::{Category, Event, EventId, Location};

pub const DEFAULT_PHOTO: &str =
    "https://images.unsplash.com/photo-1540575467063-178a50c2df87?w=800&h=400&fit=crop";

struct SampleEvent {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    date: (i32, u32, u32),
    time: (u32, u32),
    location: Location,
    category: Category,
    photo: &'static str,
}

const SAMPLE_EVENTS: &[SampleEvent] = &[
    SampleEvent {
        id: "1",
        title: "Web3 Developer Meetup",
        description: "Join us for an evening of networking and learning about the latest in Web3 development. We'll have talks from industry experts, hands-on workshops, and plenty of time to connect with fellow developers.",
        date: (2025, 11, 20),
        time: (18, 0),
        location: Location::OnCampus,
        category: Category::Meetup,
        photo: DEFAULT_PHOTO,
    },
    SampleEvent {
        id: "2",
        title: "Blockchain Hackathon",
        description: "A 48-hour hackathon focused on building innovative blockchain solutions. Form teams, build projects, and compete for prizes. Mentors and resources provided.",
        date: (2025, 11, 25),
        time: (9, 0),
        location: Location::OffCampus,
        category: Category::Hackathon,
        photo: "https://images.unsplash.com/photo-1505373877841-8d25f7d46678?w=800&h=400&fit=crop",
    },
    SampleEvent {
        id: "3",
        title: "NFT Art Exhibition",
        description: "Explore the intersection of art and technology at our NFT exhibition. Featuring works from emerging digital artists, live minting sessions, and panel discussions.",
        date: (2025, 11, 28),
        time: (14, 0),
        location: Location::Online,
        category: Category::Workshop,
        photo: "https://images.unsplash.com/photo-1561998338-13ad7883b20f?w=800&h=400&fit=crop",
    },
    SampleEvent {
        id: "4",
        title: "DeFi Workshop",
        description: "Learn about decentralized finance protocols, yield farming, and liquidity provision. Hands-on session with real protocols.",
        date: (2025, 11, 16),
        time: (15, 0),
        location: Location::OnCampus,
        category: Category::Workshop,
        photo: "https://images.unsplash.com/photo-1639762681485-074b7f938ba0?w=800&h=400&fit=crop",
    },
    SampleEvent {
        id: "5",
        title: "Crypto Art Fair",
        description: "Annual crypto art fair featuring digital artists from around the world. Live auctions and artist meetups.",
        date: (2025, 11, 30),
        time: (10, 0),
        location: Location::OffCampus,
        category: Category::Meetup,
        photo: "https://images.unsplash.com/photo-1620641788421-7a1c342ea42e?w=800&h=400&fit=crop",
    },
    SampleEvent {
        id: "6",
        title: "Smart Contract Security Lecture",
        description: "Deep dive into smart contract security best practices, common vulnerabilities, and audit techniques.",
        date: (2025, 11, 18),
        time: (13, 0),
        location: Location::Online,
        category: Category::Lecture,
        photo: "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?w=800&h=400&fit=crop",
    },
];

/// The default event catalogue used when the store holds no events.
pub fn sample_events() -> Vec<Event> {
    SAMPLE_EVENTS
        .iter()
        .filter_map(|sample| {
            let (year, month, day) = sample.date;
            let (hour, minute) = sample.time;
            Some(Event {
                id: EventId::new(sample.id),
                title: sample.title.to_string(),
                description: sample.description.to_string(),
                date: NaiveDate::from_ymd_opt(year, month, day)?,
                time: NaiveTime::from_hms_opt(hour, minute, 0)?,
                location: sample.location,
                category: sample.category,
                photo: sample.photo.to_string(),
            })
        })
        .collect()
}
