//! Multi-hop relationship narratives from the knowledge graph.

use futures::future;
use tracing::{debug, warn};

use super::embedder::Embedder;
use super::extractor::EntityExtractor;
use crate::config::{Config, ADMIN_RELATIONSHIP_TYPES};
use crate::graph::{GraphStore, PathDirection, PathRecord};
use crate::integrations::OllamaClient;
use crate::{Error, Result};

/// Builds a human-readable relationship narrative for a query.
///
/// Entities extracted from the query are matched to their nearest indexed
/// nodes, each matched node is used as a traversal root, and every resulting
/// path is rendered edge by edge in subject/object order.
pub struct GraphRetriever {
    extractor: EntityExtractor,
    embedder: Embedder,
    store: GraphStore,
    max_hops: usize,
}

impl GraphRetriever {
    pub fn new(llm: OllamaClient, store: GraphStore, config: &Config) -> Self {
        Self {
            extractor: EntityExtractor::from_config(llm.clone(), config),
            embedder: Embedder::from_config(llm, config),
            store,
            max_hops: config.max_hops,
        }
    }

    /// Build the relationship narrative for `query`.
    ///
    /// Returns an empty string when matching succeeded but the graph holds
    /// no non-administrative paths for any matched node.
    pub async fn retrieve(&self, query: &str) -> Result<String> {
        let extraction = self.extractor.extract(query).await?;
        debug!("Extracted entities: {:?}", extraction.entities);

        let ids = self.match_entities(&extraction.entities).await?;

        let mut context = String::new();
        for id in &ids {
            let paths = self
                .store
                .entity_paths(id, self.max_hops, ADMIN_RELATIONSHIP_TYPES)
                .await?;

            for path in &paths {
                if !path.is_consistent() {
                    warn!("Skipping inconsistent path rooted at '{}'", path.start);
                    continue;
                }
                context.push_str(&format_path(path));
                context.push('\n');
            }
        }

        Ok(context)
    }

    /// Map each extracted entity to its nearest indexed node id.
    ///
    /// Lookups run concurrently; result order follows entity order so the
    /// assembled narrative stays reproducible. Entities without any match
    /// are skipped, and duplicates are kept so repeated mentions keep their
    /// weight in the narrative. Zero matches overall is an error: the query
    /// had no foothold in the graph at all.
    async fn match_entities(&self, entities: &[String]) -> Result<Vec<String>> {
        let lookups = entities.iter().map(|entity| async move {
            let embedding = self.embedder.embed(entity).await?;
            let matches = self.store.vector_search(&embedding, 1).await?;
            Ok::<_, Error>(matches.into_iter().next().map(|m| m.id))
        });

        let results = future::try_join_all(lookups).await?;
        let ids: Vec<String> = results.into_iter().flatten().collect();

        if ids.is_empty() {
            return Err(Error::NoMatch(
                "no extracted entity matched an indexed node".to_string(),
            ));
        }

        debug!("Matched {} of {} entities", ids.len(), entities.len());
        Ok(ids)
    }
}

/// Render one traversal path left to right, one token per edge.
///
/// Outgoing edges render source before target, incoming edges swap them,
/// undirected edges keep positional order. Tokens are comma-terminated.
pub fn format_path(path: &PathRecord) -> String {
    let mut rendered = String::new();

    for (i, step) in path.steps.iter().enumerate() {
        let (source, target) = match step.direction {
            PathDirection::Outgoing | PathDirection::Undirected => {
                (&path.nodes[i], &path.nodes[i + 1])
            }
            PathDirection::Incoming => (&path.nodes[i + 1], &path.nodes[i]),
        };
        rendered.push_str(&format!(" {} {} {},", source, step.rel_type, target));
    }

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PathStep;

    fn step(rel_type: &str, direction: PathDirection) -> PathStep {
        PathStep {
            rel_type: rel_type.to_string(),
            direction,
        }
    }

    #[test]
    fn formats_single_outgoing_edge() {
        let path = PathRecord {
            start: "hypertension".to_string(),
            steps: vec![step("TREATED_BY", PathDirection::Outgoing)],
            nodes: vec!["hypertension".to_string(), "lisinopril".to_string()],
        };

        assert_eq!(format_path(&path), " hypertension TREATED_BY lisinopril,");
    }

    #[test]
    fn formats_two_hop_outgoing_chain() {
        let path = PathRecord {
            start: "A".to_string(),
            steps: vec![
                step("KNOWS", PathDirection::Outgoing),
                step("TREATS", PathDirection::Outgoing),
            ],
            nodes: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        };

        assert_eq!(format_path(&path), " A KNOWS B, B TREATS C,");
    }

    #[test]
    fn incoming_edge_swaps_subject_and_object() {
        // A -[KNOWS]-> B <-[CAUSES]- C
        let path = PathRecord {
            start: "A".to_string(),
            steps: vec![
                step("KNOWS", PathDirection::Outgoing),
                step("CAUSES", PathDirection::Incoming),
            ],
            nodes: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        };

        assert_eq!(format_path(&path), " A KNOWS B, C CAUSES B,");
    }

    #[test]
    fn undirected_edge_keeps_positional_order() {
        let path = PathRecord {
            start: "A".to_string(),
            steps: vec![step("RELATED_TO", PathDirection::Undirected)],
            nodes: vec!["A".to_string(), "B".to_string()],
        };

        assert_eq!(format_path(&path), " A RELATED_TO B,");
    }

    #[test]
    fn incoming_first_edge_renders_neighbor_first() {
        // A <-[TREATS]- B
        let path = PathRecord {
            start: "A".to_string(),
            steps: vec![step("TREATS", PathDirection::Incoming)],
            nodes: vec!["A".to_string(), "B".to_string()],
        };

        assert_eq!(format_path(&path), " B TREATS A,");
    }
}
