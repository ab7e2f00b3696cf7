use serde::{Deserialize, Serialize};

/// An entity that can be mentioned, as issued by the directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(rename = "name", alias = "displayName", alias = "display_name")]
    pub display_name: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Literal text a committed mention of this candidate occupies
    pub fn token_text(&self) -> String {
        format!("@{}", self.display_name)
    }
}

/// Built-in directory used when the real one cannot be reached
pub fn fallback_candidates() -> Vec<Candidate> {
    vec![
        Candidate::new("1", "Abdulraheem Fareed"),
        Candidate::new("2", "Carole Mutemi"),
        Candidate::new("3", "Carole Wanjiku"),
        Candidate::new("4", "Carole Kim"),
        Candidate::new("5", "Caroline Njeri"),
    ]
}

/// Candidates currently mentioned in the note, in insertion order.
///
/// Ids are unique: inserting a candidate that is already present keeps the
/// first-seen entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionSet {
    entries: Vec<Candidate>,
}

impl MentionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate. Returns false if its id was already present.
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        if self.contains(&candidate.id) {
            return false;
        }
        self.entries.push(candidate);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|c| c.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Candidate> {
        let idx = self.entries.iter().position(|c| c.id == id)?;
        Some(self.entries.remove(idx))
    }

    /// Keep only the entries for which `keep` returns true, preserving order
    pub fn retain<F: FnMut(&Candidate) -> bool>(&mut self, keep: F) {
        self.entries.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn to_refs(&self) -> Vec<MentionRef> {
        self.entries.iter().map(MentionRef::from).collect()
    }
}

/// A mention as reported in a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionRef {
    pub id: String,
    pub name: String,
}

impl From<&Candidate> for MentionRef {
    fn from(c: &Candidate) -> Self {
        Self {
            id: c.id.clone(),
            name: c.display_name.clone(),
        }
    }
}

/// Payload handed to the submission sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub text: String,
    pub mentions: Vec<MentionRef>,
}
