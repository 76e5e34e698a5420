//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use fusegate::{CandidateSignals, ScalarScores};

pub const TEST_DIM: usize = 8;

/// Deterministic unit-ish embedding derived from a seed.
pub fn embedding(seed: u32) -> Vec<f32> {
    (0..TEST_DIM)
        .map(|i| (((seed as usize + 1) * (i + 3)) % 17) as f32 / 17.0)
        .collect()
}

/// Builder for raw candidate signals.
pub struct SignalsBuilder {
    id: String,
    scalars: ScalarScores,
    query_embedding: Vec<f32>,
    document_embedding: Vec<f32>,
}

impl SignalsBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            scalars: ScalarScores::default(),
            query_embedding: embedding(0),
            document_embedding: embedding(1),
        }
    }

    pub fn lexical(mut self, value: f32) -> Self {
        self.scalars.lexical = value;
        self
    }

    pub fn vector(mut self, value: f32) -> Self {
        self.scalars.vector = value;
        self
    }

    pub fn title(mut self, value: f32) -> Self {
        self.scalars.title = value;
        self
    }

    pub fn document_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.document_embedding = embedding;
        self
    }

    pub fn build(self) -> CandidateSignals {
        CandidateSignals {
            id: self.id,
            scalars: self.scalars,
            query_embedding: self.query_embedding,
            document_embedding: self.document_embedding,
        }
    }
}

/// Passage text keyed by candidate id.
pub fn passage_for(id: &str) -> &'static str {
    match id {
        "runbook" => "To rotate credentials run scripts/rotate_keys.sh on the bastion host.",
        "faq" => "Credentials expire every ninety days.",
        "changelog" => "Version 2.3 removed the legacy importer.",
        "glossary" => "A bastion host is the only machine reachable from outside.",
        _ => "Unrelated filler text about office plants.",
    }
}
