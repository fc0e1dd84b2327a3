//! Footnote resolution.
//!
//! Footnotes are numbered by their position among all footnote definitions on
//! the page. Named footnotes collect every `footnote_reference` whose `refname`
//! matches; anonymous footnotes pair positionally with references that carry no
//! `refname` (the nth anonymous footnote with the nth anonymous reference).

use std::collections::HashMap;

use guides_ast::{AstNode, find_all};

/// Node type of footnote definitions.
const FOOTNOTE: &str = "footnote";
/// Node type of footnote references.
const FOOTNOTE_REFERENCE: &str = "footnote_reference";

/// A resolved footnote.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FootnoteEntry {
    /// 1-based position of the definition among all footnotes on the page.
    pub label: usize,
    /// Ids of the reference nodes pointing at this footnote, in document order.
    pub references: Vec<String>,
}

/// Footnotes of a page keyed by identity (`name`, or `id` for anonymous footnotes).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct FootnoteIndex {
    entries: HashMap<String, FootnoteEntry>,
}

impl FootnoteIndex {
    /// Resolve every footnote on the page.
    ///
    /// Anonymous footnotes without a matching anonymous reference get an empty
    /// reference list; surplus anonymous references are ignored. Two footnotes
    /// sharing a name collide and the later definition wins.
    ///
    /// # Example
    ///
    /// ```
    /// use guides_ast::AstNode;
    /// use guides_renderer::FootnoteIndex;
    ///
    /// let nodes = vec![
    ///     AstNode::new("footnote_reference").with_id("ref-1").with_refname("disclaimer"),
    ///     AstNode::new("footnote").with_id("fn-1").with_name("disclaimer"),
    /// ];
    ///
    /// let index = FootnoteIndex::resolve(&nodes);
    /// let entry = index.get("disclaimer").unwrap();
    /// assert_eq!(entry.label, 1);
    /// assert_eq!(entry.references, vec!["ref-1"]);
    /// ```
    #[must_use]
    pub fn resolve(nodes: &[AstNode]) -> Self {
        let footnotes = find_all(nodes, "type", FOOTNOTE);
        let reference_nodes = find_all(nodes, "type", FOOTNOTE_REFERENCE);

        let mut anonymous_references = reference_nodes
            .iter()
            .filter(|node| node.refname.is_none())
            .map(|node| node.id.clone());

        let mut entries = HashMap::with_capacity(footnotes.len());
        for (position, footnote) in footnotes.iter().enumerate() {
            let label = position + 1;

            let (key, references) = if let Some(name) = &footnote.name {
                let named = reference_nodes
                    .iter()
                    .filter(|node| node.refname.as_deref() == Some(name.as_str()))
                    .filter_map(|node| node.id.clone())
                    .collect();
                (name.clone(), named)
            } else {
                // Consumes the next anonymous reference even when this footnote
                // can't be keyed, so later pairs stay aligned.
                let paired = anonymous_references.next().flatten();
                let Some(id) = &footnote.id else {
                    tracing::warn!(label, "Skipping anonymous footnote without an id");
                    continue;
                };
                (id.clone(), paired.into_iter().collect())
            };

            if entries.contains_key(&key) {
                tracing::warn!(footnote = %key, label, "Duplicate footnote name, later definition wins");
            }
            entries.insert(key, FootnoteEntry { label, references });
        }

        tracing::debug!(count = entries.len(), "Resolved footnotes");
        Self { entries }
    }

    /// Get the footnote with the given identity.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FootnoteEntry> {
        self.entries.get(key)
    }

    /// Find the footnote a reference node points at.
    ///
    /// Returns the footnote identity together with its entry.
    #[must_use]
    pub fn for_reference(&self, reference_id: &str) -> Option<(&str, &FootnoteEntry)> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.references.iter().any(|id| id == reference_id))
            .map(|(key, entry)| (key.as_str(), entry))
    }

    /// Number of resolved footnotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the page has no footnotes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over footnotes ordered by label.
    pub fn iter_by_label(&self) -> impl Iterator<Item = (&str, &FootnoteEntry)> {
        let mut sorted: Vec<_> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.as_str(), entry))
            .collect();
        sorted.sort_by_key(|(_, entry)| entry.label);
        sorted.into_iter()
    }
}
