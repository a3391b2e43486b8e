//! Pet records and the list filter

use serde::{Deserialize, Serialize};

/// Pet identifier, assigned by the store
pub type PetId = i64;

/// A stored pet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// A pet that has not been stored yet and so has no id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPet {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl NewPet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub(crate) fn into_pet(self, id: PetId) -> Pet {
        Pet {
            id,
            name: self.name,
            tag: self.tag,
        }
    }
}

/// Filter applied by [`PetStore::list`](super::PetStore::list)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetFilter {
    pub tags: Option<Vec<String>>,
    pub limit: Option<u32>,
}

impl PetFilter {
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// A pet passes when no tags were requested, or when its tag equals one of them.
    pub fn matches(&self, pet: &Pet) -> bool {
        match (&self.tags, &pet.tag) {
            (None, _) => true,
            (Some(wanted), Some(tag)) => wanted.iter().any(|t| t == tag),
            (Some(_), None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(id: PetId, tag: Option<&str>) -> Pet {
        Pet {
            id,
            name: format!("pet-{id}"),
            tag: tag.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = PetFilter::default();
        assert!(filter.matches(&pet(1, None)));
        assert!(filter.matches(&pet(2, Some("dog"))));
    }

    #[test]
    fn test_tag_filter_skips_untagged_pets() {
        let filter = PetFilter::default().with_tags(["dog", "cat"]);
        assert!(filter.matches(&pet(1, Some("cat"))));
        assert!(!filter.matches(&pet(2, Some("bird"))));
        assert!(!filter.matches(&pet(3, None)));
    }

    #[test]
    fn test_empty_tag_list_matches_nothing() {
        let filter = PetFilter::default().with_tags(Vec::<String>::new());
        assert!(!filter.matches(&pet(1, Some("dog"))));
    }

    #[test]
    fn test_tag_is_omitted_from_json_when_absent() {
        let json = serde_json::to_value(pet(1000, None)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1000, "name": "pet-1000"}));
    }
}
