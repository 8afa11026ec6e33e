//! Placeholder "find company" matching against a fixed roster of sample users.
//! It does not look at who actually requested company for an event.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedUser {
    pub username: String,
    pub interests: Vec<String>,
    pub shared_interests: Vec<String>,
}

const SAMPLE_USERS: &[(&str, &[&str])] = &[
    ("Alice_Dev", &["Web3", "React", "Design"]),
    ("Bob_Builder", &["Blockchain", "Solidity", "Web3"]),
    ("Charlie_Code", &["NFT", "Art", "Design"]),
];

/// Matching only kicks in once an event has at least this many requesters.
pub const MIN_REQUESTERS_FOR_MATCHING: usize = 2;

pub fn matched_users(requester_count: usize, profile_interests: &[String]) -> Vec<MatchedUser> {
    if requester_count < MIN_REQUESTERS_FOR_MATCHING {
        return Vec::new();
    }

    let own: Vec<String> = profile_interests
        .iter()
        .map(|interest| interest.to_lowercase())
        .collect();

    SAMPLE_USERS
        .iter()
        .map(|(username, interests)| {
            let interests: Vec<String> = interests.iter().map(|i| (*i).to_string()).collect();
            let mut shared: Vec<String> = interests
                .iter()
                .filter(|interest| overlaps(&own, &interest.to_lowercase()))
                .cloned()
                .collect();
            if shared.is_empty() {
                shared = interests.iter().take(2).cloned().collect();
            }
            MatchedUser {
                username: (*username).to_string(),
                interests,
                shared_interests: shared,
            }
        })
        .filter(|user| !user.shared_interests.is_empty())
        .collect()
}

fn overlaps(own: &[String], candidate: &str) -> bool {
    own.iter()
        .any(|mine| mine.contains(candidate) || candidate.contains(mine.as_str()))
}
