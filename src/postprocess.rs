use serde::Serialize;

use crate::error::PredictError;

/// The response payload for a successful classification.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
    pub raw_scores: Vec<f32>,
}

/// Returns the index of the maximum score and the maximum itself.
/// Ties resolve to the lowest index.
pub fn argmax_and_max(scores: &[f32]) -> (usize, f32) {
    scores
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(max_idx, max_val), (i, &val)| {
            if val > max_val { (i, val) } else { (max_idx, max_val) }
        })
}

impl Prediction {
    /// Builds the payload from the model's raw score vector. The score
    /// vector must be index-aligned with `labels`.
    pub fn from_scores(raw_scores: Vec<f32>, labels: &[String]) -> Result<Self, PredictError> {
        if raw_scores.is_empty() {
            return Err(PredictError::EmptyScores);
        }
        if raw_scores.len() != labels.len() {
            return Err(PredictError::ScoreMismatch {
                scores: raw_scores.len(),
                labels: labels.len(),
            });
        }
        let (index, confidence) = argmax_and_max(&raw_scores);
        Ok(Self {
            label: labels[index].clone(),
            confidence,
            raw_scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn picks_the_maximum_score() {
        let pred =
            Prediction::from_scores(vec![0.1, 0.7, 0.2], &labels(&["a", "b", "c"])).unwrap();
        assert_eq!(pred.label, "b");
        assert_eq!(pred.confidence, 0.7);
        assert_eq!(pred.raw_scores, vec![0.1, 0.7, 0.2]);
    }

    #[test]
    fn ties_resolve_to_the_lowest_index() {
        let pred =
            Prediction::from_scores(vec![0.4, 0.4, 0.2], &labels(&["a", "b", "c"])).unwrap();
        assert_eq!(pred.label, "a");
    }

    #[test]
    fn confidence_equals_the_maximum_raw_score() {
        let scores = vec![0.05, 0.15, 0.8];
        let pred = Prediction::from_scores(scores.clone(), &labels(&["a", "b", "c"])).unwrap();
        let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(pred.confidence, max);
    }

    #[test]
    fn empty_scores_are_rejected() {
        let err = Prediction::from_scores(vec![], &labels(&["a"])).unwrap_err();
        assert!(matches!(err, PredictError::EmptyScores));
    }

    #[test]
    fn score_label_length_mismatch_is_rejected() {
        let err = Prediction::from_scores(vec![0.5, 0.5], &labels(&["a"])).unwrap_err();
        assert!(matches!(
            err,
            PredictError::ScoreMismatch { scores: 2, labels: 1 }
        ));
    }
}
