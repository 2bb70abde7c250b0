// src/graph/edges.rs
//
// Edge extraction: (movie, other, relation) triples from the director and
// tag fields of normalized records.

use crate::datatypes::records::fields;
use crate::datatypes::{MovieRecord, Value};
use crate::graph::schema::{NodeId, Relation};

/// Known tag misspellings and variants → canonical spelling.
const TAG_SYNONYMS: &[(&str, &str)] = &[
    ("Religion & the Occult", "Religion & The Occult"),
    ("Religion / The Occult", "Religion & The Occult"),
    ("Montsers & Mutants", "Monsters & Mutants"),
    ("Creepy Child", "Creepy Children"),
];

/// Maps a raw tag to its canonical spelling. Unknown tags are their own
/// canonical form.
pub fn canonicalize_tag(tag: &str) -> &str {
    TAG_SYNONYMS
        .iter()
        .find(|(variant, _)| *variant == tag)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(tag)
}

/// One inferred relation between a movie and a director or tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub subject: String,
    pub object: String,
    pub relation: Relation,
}

impl Triple {
    pub fn new(subject: &str, object: &str, relation: Relation) -> Self {
        Triple {
            subject: subject.to_string(),
            object: object.to_string(),
            relation,
        }
    }

    pub fn subject_id(&self) -> NodeId {
        NodeId::movie(self.subject.as_str())
    }

    pub fn object_id(&self) -> NodeId {
        NodeId::new(self.relation.object_kind(), self.object.as_str())
    }
}

pub fn director_triples(record: &MovieRecord) -> Vec<Triple> {
    let mut names: Vec<&str> = Vec::new();
    if let Some(director) = record.get(fields::DIRECTOR).and_then(Value::as_string) {
        names.push(director);
    }
    if let Some(directors) = record.get(fields::DIRECTORS).and_then(Value::as_string) {
        names.extend(directors.split(','));
    }
    names
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| Triple::new(&record.title, name, Relation::Director))
        .collect()
}

pub fn tag_triples(record: &MovieRecord) -> Vec<Triple> {
    record
        .get(fields::TAGS)
        .and_then(Value::as_list)
        .unwrap_or_default()
        .iter()
        .map(|tag| Triple::new(&record.title, canonicalize_tag(tag), Relation::Tag))
        .collect()
}

pub fn extract_triples(records: &[MovieRecord]) -> Vec<Triple> {
    let mut triples: Vec<Triple> = records.iter().flat_map(director_triples).collect();
    triples.extend(records.iter().flat_map(tag_triples));
    tracing::debug!(triples = triples.len(), "extracted triples");
    triples
}
