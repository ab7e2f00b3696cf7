use super::{Candidate, MentionSet};

/// Candidates to show for `query`, in directory order.
///
/// Already-mentioned candidates are excluded. A non-empty query matches
/// any display name that contains it case-insensitively.
pub fn filter(all: &[Candidate], query: &str, mentions: &MentionSet) -> Vec<Candidate> {
    let query = query.to_lowercase();
    all.iter()
        .filter(|c| !mentions.contains(&c.id))
        .filter(|c| query.is_empty() || c.display_name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
