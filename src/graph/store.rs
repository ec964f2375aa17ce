//! Graph database integration with Neo4j
//!
//! The store owns every Cypher query the retrieval pipeline needs: vector
//! index DDL, similarity search, chunk lookup, and k-hop entity traversal.

use neo4rs::{query, Graph};
use tracing::{debug, info};

use super::models::{ChunkRecord, PathDirection, PathRecord, PathStep, ScoredNode};
use crate::config::Config;
use crate::Result;

/// Graph store backed by Neo4j, read-only from the retrieval core's
/// perspective except for vector index creation.
#[derive(Clone)]
pub struct GraphStore {
    graph: Graph,
    index_name: String,
}

impl GraphStore {
    /// Connect to Neo4j server
    pub async fn new(
        uri: &str,
        user: &str,
        password: &str,
        index_name: impl Into<String>,
    ) -> Result<Self> {
        let graph = Graph::new(uri, user, password).await?;

        Ok(Self {
            graph,
            index_name: index_name.into(),
        })
    }

    /// Connect using the loaded configuration
    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.neo4j_uri,
            &config.neo4j_user,
            &config.neo4j_password,
            config.index_name.clone(),
        )
        .await
    }

    /// Name of the vector index this store queries.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// (Re)create the vector index over entity embeddings.
    ///
    /// Idempotent: an existing index of the same name is dropped first.
    pub async fn create_vector_index(&self, dimension: usize) -> Result<()> {
        info!("Creating vector index '{}'...", self.index_name);

        let drop_existing = format!("DROP INDEX `{}` IF EXISTS", self.index_name);
        self.graph.run(query(&drop_existing)).await?;

        let create = format!(
            "CREATE VECTOR INDEX `{}`
             FOR (a:`__Entity__`) ON (a.embedding)
             OPTIONS {{
               indexConfig: {{
                 `vector.dimensions`: {},
                 `vector.similarity_function`: 'cosine'
               }}
             }}",
            self.index_name, dimension
        );
        self.graph.run(query(&create)).await?;

        info!(
            "Vector index '{}' created ({} dimensions, cosine)",
            self.index_name, dimension
        );
        Ok(())
    }

    /// Find the k nearest entity nodes to a query embedding.
    ///
    /// Results are distinct node ids ordered by descending similarity.
    pub async fn vector_search(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredNode>> {
        let vector: Vec<f64> = embedding.iter().map(|v| f64::from(*v)).collect();

        let q = query(
            "CALL db.index.vector.queryNodes($index, $k, $embedding)
             YIELD node, score
             RETURN DISTINCT node.id AS id, score
             ORDER BY score DESC
             LIMIT $k",
        )
        .param("index", self.index_name.as_str())
        .param("k", k as i64)
        .param("embedding", vector);

        let mut result = self.graph.execute(q).await?;
        let mut matches = Vec::new();

        while let Some(row) = result.next().await? {
            if let (Ok(id), Ok(score)) = (row.get::<String>("id"), row.get::<f64>("score")) {
                matches.push(ScoredNode { id, score });
            }
        }

        debug!("Vector search returned {} matches", matches.len());
        Ok(matches)
    }

    /// Fetch document chunks attached to an entity node, in store order.
    pub async fn chunks_for_node(&self, node_id: &str, cap: usize) -> Result<Vec<ChunkRecord>> {
        let q = query(
            "MATCH (c:Chunk)-[]->(e:`__Entity__` {id: $id})
             RETURN c.fileName AS fileName, c.text AS text
             LIMIT $cap",
        )
        .param("id", node_id)
        .param("cap", cap as i64);

        let mut result = self.graph.execute(q).await?;
        let mut chunks = Vec::new();

        while let Some(row) = result.next().await? {
            if let (Ok(file_name), Ok(text)) =
                (row.get::<String>("fileName"), row.get::<String>("text"))
            {
                chunks.push(ChunkRecord { file_name, text });
            }
        }

        debug!("Found {} chunks for node '{}'", chunks.len(), node_id);
        Ok(chunks)
    }

    /// All simple paths of 1..=max_hops from a root node to other entity
    /// nodes, skipping the excluded relationship types.
    ///
    /// Direction is resolved per edge against that edge's position in the
    /// path, so a path that changes direction mid-traversal keeps the
    /// subject/object order of every relationship.
    pub async fn entity_paths(
        &self,
        node_id: &str,
        max_hops: usize,
        excluded: &[&str],
    ) -> Result<Vec<PathRecord>> {
        // The hop bound cannot be a Cypher parameter, so it is formatted in.
        let cypher = format!(
            "MATCH path = (n:`__Entity__` {{id: $id}})-[*1..{}]-(m:`__Entity__`)
             WHERE ALL(rel IN relationships(path) WHERE NOT type(rel) IN $excluded)
             RETURN n.id AS startNode,
                    [rel IN relationships(path) | type(rel)] AS relTypes,
                    [i IN range(0, size(relationships(path)) - 1) |
                        CASE
                            WHEN startNode(relationships(path)[i]) = nodes(path)[i] THEN 'outgoing'
                            WHEN endNode(relationships(path)[i]) = nodes(path)[i] THEN 'incoming'
                            ELSE 'undirected'
                        END] AS relDirections,
                    [node IN nodes(path) | node.id] AS pathNodes",
            max_hops
        );

        let excluded: Vec<String> = excluded.iter().map(|s| s.to_string()).collect();
        let q = query(&cypher).param("id", node_id).param("excluded", excluded);

        let mut result = self.graph.execute(q).await?;
        let mut paths = Vec::new();

        while let Some(row) = result.next().await? {
            let (Ok(start), Ok(types), Ok(directions), Ok(nodes)) = (
                row.get::<String>("startNode"),
                row.get::<Vec<String>>("relTypes"),
                row.get::<Vec<String>>("relDirections"),
                row.get::<Vec<String>>("pathNodes"),
            ) else {
                debug!("Skipping malformed traversal row for node '{}'", node_id);
                continue;
            };

            let steps = types
                .into_iter()
                .zip(directions.iter())
                .map(|(rel_type, direction)| PathStep {
                    rel_type,
                    direction: PathDirection::parse(direction),
                })
                .collect();

            paths.push(PathRecord {
                start,
                steps,
                nodes,
            });
        }

        debug!("Found {} paths from node '{}'", paths.len(), node_id);
        Ok(paths)
    }

    /// Get graph statistics
    pub async fn stats(&self) -> Result<GraphStats> {
        let counts = query(
            "MATCH (e:`__Entity__`) WITH count(e) as entities
             MATCH (c:Chunk) WITH entities, count(c) as chunks
             MATCH ()-[r]->() WITH entities, chunks, count(r) as relations
             RETURN entities, chunks, relations",
        );

        let mut result = self.graph.execute(counts).await?;

        if let Some(row) = result.next().await? {
            return Ok(GraphStats {
                entity_count: row.get::<i64>("entities").unwrap_or(0) as u64,
                chunk_count: row.get::<i64>("chunks").unwrap_or(0) as u64,
                relation_count: row.get::<i64>("relations").unwrap_or(0) as u64,
            });
        }

        Ok(GraphStats::default())
    }
}

/// Graph statistics
#[derive(Debug, Default)]
pub struct GraphStats {
    pub entity_count: u64,
    pub chunk_count: u64,
    pub relation_count: u64,
}
