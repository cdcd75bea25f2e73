use once_cell::sync::Lazy;

use crate::extractor::ExtractedDocument;

const FALLBACK_CONTENT: &str = "\
# Fallback Content: Introduction to Artificial Intelligence

Artificial Intelligence (AI) refers to the simulation of human intelligence in machines that are programmed to think like humans and mimic their actions. The term may also be applied to any machine that exhibits traits associated with a human mind such as learning and problem-solving.

## History of AI

The field of AI research was founded at a workshop held on the campus of Dartmouth College during the summer of 1956. The attendees, including John McCarthy, Marvin Minsky, Allen Newell, and Herbert Simon, became the leaders of AI research for decades.

## Machine Learning

Machine learning is a subset of AI that provides systems the ability to automatically learn and improve from experience without being explicitly programmed. Machine learning focuses on the development of computer programs that can access data and use it to learn for themselves.

## Deep Learning

Deep learning is a subset of machine learning that uses neural networks with many layers (hence \"deep\") to analyze various factors of data. Deep learning is making major advances in solving problems that have resisted the best attempts of the artificial intelligence community for many years.

## Applications of AI

AI has been used in various fields including:
- Healthcare: for medical diagnosis and drug discovery
- Finance: for fraud detection and algorithmic trading
- Transportation: for autonomous vehicles and traffic management
- Customer Service: for chatbots and virtual assistants
- Entertainment: for personalized content recommendations";

/// Static document served when every live strategy fails.
pub static FALLBACK_DOCUMENT: Lazy<ExtractedDocument> =
    Lazy::new(|| ExtractedDocument::new(FALLBACK_CONTENT));

pub fn fallback_document() -> ExtractedDocument {
    FALLBACK_DOCUMENT.clone()
}
