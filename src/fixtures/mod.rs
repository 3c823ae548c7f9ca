//! Test fixtures: pre-built documents and rankings for use in tests.

use crate::ranker::RankedPassage;
use crate::types::Document;
use serde_json::json;

/// Five sample documents with distinct content and metadata.
pub fn sample_documents() -> Vec<Document> {
    vec![
        Document::new("Paris is the capital of France.")
            .meta("source", "geo/europe")
            .meta("page", 1),
        Document::new("London is the capital of England.")
            .meta("source", "geo/europe")
            .meta("page", 2),
        Document::new("The Eiffel Tower is in Paris.")
            .meta("source", "geo/landmarks")
            .meta("page", 3),
        Document::new("Berlin is the capital of Germany.")
            .meta("source", "geo/europe")
            .meta("page", 4),
        Document::new("France borders Spain and Italy.")
            .meta("source", "geo/borders")
            .meta("page", 5),
    ]
}

/// A descending ranking over the five sample documents: ids `[2, 0, 4, 1, 3]`
/// with scores `[0.9, 0.8, 0.4, 0.3, 0.1]`.
pub fn descending_ranking() -> Vec<RankedPassage> {
    vec![
        RankedPassage::new(2, "The Eiffel Tower is in Paris.", 0.9),
        RankedPassage::new(0, "Paris is the capital of France.", 0.8),
        RankedPassage::new(4, "France borders Spain and Italy.", 0.4),
        RankedPassage::new(1, "London is the capital of England.", 0.3),
        RankedPassage::new(3, "Berlin is the capital of Germany.", 0.1),
    ]
}

/// A wire-shaped rerank API response body matching [`descending_ranking`].
pub fn rerank_api_response() -> serde_json::Value {
    json!({
        "id": "rerank-123",
        "results": [
            {"index": 2, "relevance_score": 0.9},
            {"index": 0, "relevance_score": 0.8},
            {"index": 4, "relevance_score": 0.4},
            {"index": 1, "relevance_score": 0.3},
            {"index": 3, "relevance_score": 0.1},
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_consistent() {
        let documents = sample_documents();
        let ranking = descending_ranking();

        assert_eq!(documents.len(), 5);
        assert_eq!(ranking.len(), 5);
        for ranked in &ranking {
            assert_eq!(documents[ranked.id].content, ranked.text);
        }
    }
}
