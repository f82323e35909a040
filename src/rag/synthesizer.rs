//! Persona-conditioned answer synthesis
//!
//! Builds either a context-grounded QA prompt with numbered source
//! citations or a context-free conversational prompt, then asks the
//! completion service for the answer. Grounded answers use a low
//! temperature (near-deterministic for factual QA); direct answers get a
//! higher one for conversational tone.

use std::sync::Arc;

use crate::errors::DocRagError;
use crate::errors::Result;
use crate::llm::CompletionService;
use crate::persona::Persona;
use crate::rag::AnswerMode;
use crate::rag::ScoredChunk;

/// Temperature for context-grounded factual answers.
pub const GROUNDED_TEMPERATURE: f32 = 0.2;

/// Temperature for direct conversational answers.
pub const DIRECT_TEMPERATURE: f32 = 0.7;

/// Bound on generated answer length.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Builds prompts and requests completions for both answer modes.
pub struct AnswerSynthesizer {
    completion: Arc<dyn CompletionService>,
    max_tokens: u32,
}

impl AnswerSynthesizer {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(completion: Arc<dyn CompletionService>, max_tokens: u32) -> Self {
        Self {
            completion,
            max_tokens,
        }
    }

    /// Synthesize an answer in the requested mode.
    ///
    /// # Errors
    /// Completion failures surface as [`DocRagError::Synthesis`]; no
    /// silent empty-string answers, the caller decides fallback behavior.
    pub async fn synthesize(
        &self,
        query: &str,
        mode: AnswerMode,
        retrieved: &[ScoredChunk],
        persona: Persona,
    ) -> Result<String> {
        let (system_prompt, user_prompt, temperature) = match mode {
            AnswerMode::Grounded => (
                grounded_system_prompt(persona),
                grounded_user_prompt(query, retrieved),
                GROUNDED_TEMPERATURE,
            ),
            AnswerMode::Direct => (
                direct_system_prompt(persona),
                query.to_string(),
                DIRECT_TEMPERATURE,
            ),
        };

        self.completion
            .complete(&system_prompt, &user_prompt, temperature, self.max_tokens)
            .await
            .map_err(|e| DocRagError::Synthesis(format!("completion failed: {e}")))
    }
}

/// Numbered context block: `[1] From <source>: <content>` per chunk.
pub fn build_context_block(retrieved: &[ScoredChunk]) -> String {
    retrieved
        .iter()
        .enumerate()
        .map(|(idx, chunk)| {
            format!("[{}] From {}: {}", idx + 1, chunk.metadata.source, chunk.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// System prompt for grounded mode: persona voice plus citation rules.
pub fn grounded_system_prompt(persona: Persona) -> String {
    format!(
        "{}\n\n\
         Answer the question using only the numbered context excerpts provided. \
         Cite the excerpts you rely on by their number, like [1] or [2]. \
         If the context does not answer the question, say so explicitly \
         instead of guessing.",
        persona.system_prompt()
    )
}

/// System prompt for direct mode: persona voice, general conversation.
pub fn direct_system_prompt(persona: Persona) -> String {
    format!(
        "{}\n\n\
         No document context is available for this question. General \
         conversation is fine - answer from your own knowledge and make it \
         clear when you are unsure.",
        persona.system_prompt()
    )
}

/// User prompt for grounded mode: context block plus the question.
pub fn grounded_user_prompt(query: &str, retrieved: &[ScoredChunk]) -> String {
    format!(
        "Context:\n\n{}\n\nQuestion: {}",
        build_context_block(retrieved),
        query
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::ChunkMetadata;

    fn scored(source: &str, content: &str, similarity: f32) -> ScoredChunk {
        ScoredChunk {
            content: content.to_string(),
            metadata: ChunkMetadata {
                source: source.to_string(),
                chunk_index: 0,
                total_chunks: 1,
                char_length: content.len(),
            },
            similarity,
        }
    }

    #[test]
    fn context_block_numbers_sources() {
        let chunks = vec![
            scored("guide.pdf", "First excerpt.", 0.9),
            scored("notes.txt", "Second excerpt.", 0.8),
        ];
        let block = build_context_block(&chunks);
        assert!(block.contains("[1] From guide.pdf: First excerpt."));
        assert!(block.contains("[2] From notes.txt: Second excerpt."));
    }

    #[test]
    fn grounded_prompt_contains_context_and_question() {
        let chunks = vec![scored("guide.pdf", "Refunds take 5 days.", 0.9)];
        let prompt = grounded_user_prompt("How long do refunds take?", &chunks);
        assert!(prompt.contains("[1] From guide.pdf"));
        assert!(prompt.contains("Question: How long do refunds take?"));
    }

    #[test]
    fn system_prompts_carry_persona_voice() {
        for persona in Persona::ALL {
            assert!(grounded_system_prompt(persona).contains(persona.signature()));
            assert!(direct_system_prompt(persona).contains(persona.signature()));
        }
    }

    #[test]
    fn grounded_runs_cooler_than_direct() {
        assert!(GROUNDED_TEMPERATURE < DIRECT_TEMPERATURE);
    }
}
