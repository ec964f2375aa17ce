//! Records returned by the graph store.

/// Node id with similarity score from the vector index, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredNode {
    pub id: String,
    pub score: f64,
}

/// Document chunk attached to an entity node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRecord {
    pub file_name: String,
    pub text: String,
}

impl ChunkRecord {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }
}

/// Direction of one edge relative to its own position in the path.
///
/// `Outgoing` means the stored edge points from the node at position i to the
/// node at position i+1; `Incoming` means it points the other way. Direction
/// can change mid-path, so it is carried per edge, never per path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDirection {
    Outgoing,
    Incoming,
    Undirected,
}

impl PathDirection {
    /// Parse the direction token returned by the traversal query.
    pub fn parse(value: &str) -> Self {
        match value {
            "outgoing" => PathDirection::Outgoing,
            "incoming" => PathDirection::Incoming,
            _ => PathDirection::Undirected,
        }
    }
}

/// One edge in a traversal path.
#[derive(Debug, Clone)]
pub struct PathStep {
    pub rel_type: String,
    pub direction: PathDirection,
}

/// A simple path from a traversal root to another entity node.
#[derive(Debug, Clone)]
pub struct PathRecord {
    /// Id of the traversal root node.
    pub start: String,
    /// Ordered relationship descriptors, one per edge.
    pub steps: Vec<PathStep>,
    /// Ordered node ids, root first.
    pub nodes: Vec<String>,
}

impl PathRecord {
    /// A well-formed path has exactly one more node than it has edges.
    pub fn is_consistent(&self) -> bool {
        !self.nodes.is_empty() && self.steps.len() == self.nodes.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_direction_tokens() {
        assert_eq!(PathDirection::parse("outgoing"), PathDirection::Outgoing);
        assert_eq!(PathDirection::parse("incoming"), PathDirection::Incoming);
        assert_eq!(
            PathDirection::parse("undirected"),
            PathDirection::Undirected
        );
        assert_eq!(PathDirection::parse("garbage"), PathDirection::Undirected);
    }

    #[test]
    fn path_consistency_requires_one_more_node_than_edge() {
        let path = PathRecord {
            start: "a".to_string(),
            steps: vec![PathStep {
                rel_type: "KNOWS".to_string(),
                direction: PathDirection::Outgoing,
            }],
            nodes: vec!["a".to_string(), "b".to_string()],
        };
        assert!(path.is_consistent());

        let broken = PathRecord {
            start: "a".to_string(),
            steps: vec![],
            nodes: vec!["a".to_string(), "b".to_string()],
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn chunk_record_constructor() {
        let chunk = ChunkRecord::new("doc1.txt", "some text");
        assert_eq!(chunk.file_name, "doc1.txt");
        assert_eq!(chunk.text, "some text");
    }
}
