use crate::codec::errors::CodecError;
use crate::codec::registry::{self, Arity, Grammar, Shape};
use crate::codec::scalar::Tally;
use crate::codec::types::FieldValue;
use crate::core::config::ReferenceRegistry;
use crate::core::kind::FieldKind;
use crate::core::reference::ReferenceLookup;

/// A grammar whose shape fits the input, with the value it decodes to.
#[derive(Debug, Clone)]
pub struct GrammarMatch {
    pub grammar: &'static Grammar,
    /// Confidence score (0.0 to 1.0)
    pub confidence: f64,
    /// Tokens substituted or dropped while decoding with this grammar
    pub malformed: usize,
    pub value: FieldValue,
}

/// Runs a field through every grammar of its kind, ignoring version order.
///
/// The resolver stops at the first shape match; the detector reports all of
/// them, which is what you want when working out which schema revision
/// wrote a column.
pub struct GrammarDetector<'a> {
    lookup: Option<&'a dyn ReferenceLookup>,
}

impl<'a> GrammarDetector<'a> {
    pub fn new(lookup: Option<&'a dyn ReferenceLookup>) -> Self {
        GrammarDetector { lookup }
    }

    /// Grammars of `kind` that fit `input`, sorted by confidence (highest first).
    pub fn detect(&self, kind: FieldKind, input: &str) -> Vec<GrammarMatch> {
        let input = input.trim();
        if input.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<GrammarMatch> = registry::grammars_for(kind)
            .into_iter()
            .filter_map(|grammar| self.score_grammar(grammar, input))
            .collect();

        matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        matches
    }

    /// Decodes with one grammar and scores the result.
    /// Returns None when the shape does not fit at all.
    fn score_grammar(&self, grammar: &'static Grammar, input: &str) -> Option<GrammarMatch> {
        if !grammar.matches(input) {
            return None;
        }

        const DECODE_WEIGHT: f64 = 0.60;
        const SPECIFICITY_WEIGHT: f64 = 0.25;
        const FORM_WEIGHT: f64 = 0.15;

        let mut tally = Tally::new();
        let value = (grammar.decode)(input, self.lookup, &mut tally);
        let malformed = tally.malformed();

        // Every substitution halves what is left of the decode score
        let decode_score = 1.0 / (1.0 + malformed as f64);
        let specificity_score = Self::score_specificity(grammar.shape);
        let form_score = if grammar.is_current() { 1.0 } else { 0.5 };

        let confidence = decode_score * DECODE_WEIGHT
            + specificity_score * SPECIFICITY_WEIGHT
            + form_score * FORM_WEIGHT;

        Some(GrammarMatch {
            grammar,
            confidence,
            malformed,
            value,
        })
    }

    /// Exact token counts say more about a field than open-ended ones.
    fn score_specificity(shape: Shape) -> f64 {
        match shape {
            Shape::Items(arity) | Shape::Whole(arity) | Shape::Layers(arity) => match arity {
                Arity::Exactly(_) => 1.0,
                Arity::OneOf(_) => 0.8,
                Arity::AtLeast(_) => 0.6,
            },
            Shape::Segments => 1.0,
            Shape::Pairs | Shape::Numeric => 0.6,
        }
    }
}

/// Convenience function to detect grammars using the default reference tables.
pub fn detect_grammar(kind: FieldKind, input: &str) -> Result<Vec<GrammarMatch>, CodecError> {
    let references = ReferenceRegistry::load_with_overrides()?;
    let detector = GrammarDetector::new(Some(&references));
    Ok(detector.detect(kind, input))
}
