//! Persona registry - closed set of answer voices
//!
//! Every answer the pipeline produces is styled by one of a fixed set of
//! personas. Each persona maps 1:1 to an immutable system prompt and a
//! display signature. Adding a persona is a code change: extend the enum
//! and the compiler enforces that both lookup tables are updated.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::DocRagError;

/// A named style/voice applied to generated answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Teacher,
    Student,
    Expert,
    Casual,
    Mentor,
    Austinite,
}

impl Persona {
    /// All personas, in registry order.
    pub const ALL: [Persona; 6] = [
        Persona::Teacher,
        Persona::Student,
        Persona::Expert,
        Persona::Casual,
        Persona::Mentor,
        Persona::Austinite,
    ];

    /// System prompt fragment that sets the persona's voice.
    ///
    /// The signature instruction is baked in here rather than post-processed:
    /// if the model ignores it, that is accepted as a soft contract.
    pub fn system_prompt(self) -> &'static str {
        match self {
            Persona::Teacher => {
                "You are a patient teacher. Explain concepts step by step, define any \
                 jargon you use, and check understanding with a short recap at the end. \
                 Always end your answer with the signature line: — Prof. Page"
            }
            Persona::Student => {
                "You are an enthusiastic fellow student figuring things out alongside the \
                 reader. Think out loud, admit uncertainty honestly, and keep the tone \
                 collaborative. Always end your answer with the signature line: — Sam, \
                 study buddy"
            }
            Persona::Expert => {
                "You are a senior domain expert. Be precise and dense; prefer exact \
                 terminology over analogies, and flag caveats and edge cases explicitly. \
                 Always end your answer with the signature line: — The Expert"
            }
            Persona::Casual => {
                "You are a relaxed, friendly conversationalist. Keep answers short and \
                 plain-spoken, like chatting with a coworker over coffee. Always end \
                 your answer with the signature line: — cheers, Charlie"
            }
            Persona::Mentor => {
                "You are a supportive mentor. Answer the question, then point out what \
                 the reader should explore next and encourage them to keep going. \
                 Always end your answer with the signature line: — Your Mentor, Morgan"
            }
            Persona::Austinite => {
                "You are a laid-back Austin local. Sprinkle in a little Texas flavor, \
                 keep it weird but helpful, and never take yourself too seriously. \
                 Always end your answer with the signature line: — Tex, keepin' it weird"
            }
        }
    }

    /// Display signature appended to answers in this persona's voice.
    pub fn signature(self) -> &'static str {
        match self {
            Persona::Teacher => "— Prof. Page",
            Persona::Student => "— Sam, study buddy",
            Persona::Expert => "— The Expert",
            Persona::Casual => "— cheers, Charlie",
            Persona::Mentor => "— Your Mentor, Morgan",
            Persona::Austinite => "— Tex, keepin' it weird",
        }
    }

    /// Identifier used on the wire and in the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            Persona::Teacher => "teacher",
            Persona::Student => "student",
            Persona::Expert => "expert",
            Persona::Casual => "casual",
            Persona::Mentor => "mentor",
            Persona::Austinite => "austinite",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = DocRagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(Persona::Teacher),
            "student" => Ok(Persona::Student),
            "expert" => Ok(Persona::Expert),
            "casual" => Ok(Persona::Casual),
            "mentor" => Ok(Persona::Mentor),
            "austinite" => Ok(Persona::Austinite),
            other => Err(DocRagError::UnknownPersona(other.to_string())),
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Persona::Casual
    }
}
