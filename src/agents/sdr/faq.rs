//! Company FAQ and keyword scoring.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::store;

const STOP_WORDS: &[&str] = &[
    "about", "and", "are", "can", "could", "does", "for", "from", "have", "how", "into", "our", "tell", "that", "the",
    "there", "this", "what", "when", "where", "which", "who", "why", "will", "with", "would", "you", "your",
];

/// Lowercase word tokens worth matching on: alphanumeric runs of 3+ chars,
/// stop words removed, deduplicated.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() >= 3 && !STOP_WORDS.contains(&t.as_str()))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl FaqEntry {
    fn vocabulary(&self) -> BTreeSet<String> {
        let mut vocab = tokenize(&self.question);
        vocab.extend(self.keywords.iter().map(|k| k.trim().to_lowercase()));
        vocab
    }

    fn score(&self, query: &BTreeSet<String>) -> usize {
        let vocab = self.vocabulary();
        query.iter().filter(|t| vocab.contains(*t)).count()
    }
}

/// On-disk layouts accepted for the FAQ file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FaqFile {
    Bare(Vec<FaqEntry>),
    Full {
        #[serde(default)]
        company: Map<String, Value>,
        #[serde(default)]
        faqs: Vec<FaqEntry>,
    },
}

impl Default for FaqFile {
    fn default() -> Self {
        FaqFile::Full {
            company: Map::new(),
            faqs: Vec::new(),
        }
    }
}

/// Company profile plus its FAQ entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaqBook {
    pub company: Map<String, Value>,
    pub entries: Vec<FaqEntry>,
}

impl FaqBook {
    /// Load the FAQ file; a missing file yields an empty book.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(store::load_or_default::<FaqFile>(path, "FAQ")?.into())
    }

    /// Parse any accepted layout from a JSON value.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        Ok(serde_json::from_value::<FaqFile>(value)?.into())
    }

    /// Best-scoring entry with at least one keyword overlap. Ties go to the
    /// entry listed first.
    pub fn find(&self, question: &str) -> Option<(&FaqEntry, usize)> {
        let query = tokenize(question);
        if query.is_empty() {
            return None;
        }

        let mut best: Option<(&FaqEntry, usize)> = None;
        for entry in &self.entries {
            let score = entry.score(&query);
            if score > 0 && best.is_none_or(|(_, top)| score > top) {
                best = Some((entry, score));
            }
        }
        best
    }
}

impl From<FaqFile> for FaqBook {
    fn from(file: FaqFile) -> Self {
        match file {
            FaqFile::Full { company, faqs } => FaqBook { company, entries: faqs },
            FaqFile::Bare(entries) => FaqBook {
                company: Map::new(),
                entries,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book() -> FaqBook {
        FaqBook::from_value(json!({
            "company": {"name": "Acme Voice", "description": "Voice AI for support teams"},
            "faqs": [
                {
                    "question": "What does Acme Voice do?",
                    "answer": "We build voice agents for support teams.",
                    "keywords": ["product", "services", "offer"]
                },
                {
                    "question": "How much does it cost?",
                    "answer": "Plans start at $49 per month.",
                    "keywords": ["pricing", "price", "plans", "cost"]
                },
                {
                    "question": "Is there a free trial?",
                    "answer": "Yes, 14 days.",
                    "keywords": ["trial", "free", "plans"]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("What's your PRICING, and do you have a free-trial?");
        assert!(tokens.contains("pricing"));
        assert!(tokens.contains("free"));
        assert!(tokens.contains("trial"));
        assert!(!tokens.contains("your"));
        assert!(!tokens.contains("do"));
    }

    #[test]
    fn test_find_best_match() {
        let book = book();
        let (entry, score) = book.find("Tell me about your pricing plans and cost").unwrap();
        assert_eq!(entry.answer, "Plans start at $49 per month.");
        assert_eq!(score, 3);
    }

    #[test]
    fn test_find_tie_goes_to_first() {
        let book = book();
        // "plans" is a keyword of both the pricing and the trial entry
        let (entry, score) = book.find("plans").unwrap();
        assert_eq!(score, 1);
        assert_eq!(entry.question, "How much does it cost?");
    }

    #[test]
    fn test_find_no_overlap() {
        assert!(book().find("Do you sell bicycles?").is_none());
        assert!(book().find("").is_none());
        assert!(FaqBook::default().find("pricing").is_none());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let book = FaqBook::load(&dir.path().join("company_faq.json")).unwrap();
        assert_eq!(book, FaqBook::default());
    }

    #[test]
    fn test_bare_array_layout() {
        let book = FaqBook::from_value(json!([
            {"question": "Where are you based?", "answer": "Pune."}
        ]))
        .unwrap();
        assert!(book.company.is_empty());
        assert_eq!(book.find("based").unwrap().0.answer, "Pune.");
    }
}
