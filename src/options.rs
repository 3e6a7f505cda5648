//! Summarization options shared across the workspace.
//!
//! One value object holds everything a request needs: the algorithm, the
//! length controls, and the optional-analysis toggles. The workspace keeps a
//! single instance and replaces it wholesale when a settings panel changes
//! anything, so every input mode sees the same options.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Lower bound of the compression ratio slider.
pub const RATIO_MIN: u8 = 10;
/// Upper bound of the compression ratio slider.
pub const RATIO_MAX: u8 = 80;
/// Increment used when adjusting the ratio.
pub const RATIO_STEP: u8 = 5;

/// Summarization strategy offered by the service.
///
/// Serialized names match the service vocabulary exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Algorithm {
    #[serde(rename = "Frequency-Based")]
    FrequencyBased,
    #[serde(rename = "TF-IDF")]
    TfIdf,
    #[serde(rename = "TextRank")]
    TextRank,
    #[serde(rename = "Position-Based")]
    PositionBased,
    /// Abstractive summarization via a pre-trained model.
    #[serde(rename = "Hugging Face")]
    HuggingFace,
}

impl Algorithm {
    /// Every algorithm, in settings-panel order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::FrequencyBased,
        Algorithm::TfIdf,
        Algorithm::TextRank,
        Algorithm::PositionBased,
        Algorithm::HuggingFace,
    ];

    /// Whether this algorithm generates new text rather than extracting
    /// sentences. Abstractive algorithms use the summary length; extractive
    /// ones use the compression ratio.
    pub fn is_abstractive(self) -> bool {
        matches!(self, Algorithm::HuggingFace)
    }

    /// Display name, identical to the wire name.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::FrequencyBased => "Frequency-Based",
            Algorithm::TfIdf => "TF-IDF",
            Algorithm::TextRank => "TextRank",
            Algorithm::PositionBased => "Position-Based",
            Algorithm::HuggingFace => "Hugging Face",
        }
    }

    /// One-line description shown next to the algorithm selector.
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::FrequencyBased => {
                "Ranks sentences based on the frequency of words they contain."
            }
            Algorithm::TfIdf => {
                "Scores sentences based on how important words are to the document."
            }
            Algorithm::TextRank => {
                "A graph-based algorithm that ranks sentences by importance."
            }
            Algorithm::PositionBased => {
                "Selects the first few sentences, assuming the lead carries the point."
            }
            Algorithm::HuggingFace => {
                "Uses a pre-trained AI model to generate a new, abstractive summary."
            }
        }
    }
}

/// Coarse target length for abstractive summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    /// Every length, in panel order.
    pub const ALL: [SummaryLength; 3] = [
        SummaryLength::Short,
        SummaryLength::Medium,
        SummaryLength::Long,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SummaryLength::Short => "Short",
            SummaryLength::Medium => "Medium",
            SummaryLength::Long => "Long",
        }
    }
}

/// The full set of knobs sent with every request.
///
/// `summary_length` only applies to abstractive algorithms and
/// `compression_ratio` only to extractive ones, but both are kept (and sent)
/// at all times so a value survives toggling the algorithm back and forth.
/// The service ignores whichever field is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeOptions {
    pub algorithm: Algorithm,
    pub summary_length: SummaryLength,
    /// Percentage of the original text to keep, 10-80.
    pub compression_ratio: u8,
    pub recognize_entities: bool,
    pub analyze_sentiment: bool,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::FrequencyBased,
            summary_length: SummaryLength::Medium,
            compression_ratio: 40,
            recognize_entities: false,
            analyze_sentiment: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_service_vocabulary() {
        let options = SummarizeOptions {
            algorithm: Algorithm::TfIdf,
            ..SummarizeOptions::default()
        };
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["algorithm"], "TF-IDF");
        assert_eq!(json["summary_length"], "Medium");
        assert_eq!(json["compression_ratio"], 40);
        assert_eq!(json["recognize_entities"], false);
        assert_eq!(json["analyze_sentiment"], false);
    }

    #[test]
    fn inactive_fields_survive_replacement() {
        // Varying only the ratio must not disturb the (inactive) length,
        // and vice versa.
        let mut current = SummarizeOptions::default();
        assert!(!current.algorithm.is_abstractive());

        for ratio in [10, 25, 80] {
            current = SummarizeOptions {
                compression_ratio: ratio,
                ..current
            };
            assert_eq!(current.summary_length, SummaryLength::Medium);
        }

        current = SummarizeOptions {
            algorithm: Algorithm::HuggingFace,
            summary_length: SummaryLength::Long,
            ..current
        };
        assert_eq!(current.compression_ratio, 80);
    }

    #[test]
    fn only_hugging_face_is_abstractive() {
        for algorithm in Algorithm::ALL {
            assert_eq!(
                algorithm.is_abstractive(),
                algorithm == Algorithm::HuggingFace
            );
        }
    }
}
