use crate::{ClassificationResult, RequestOutcome};

#[derive(Clone, Debug, PartialEq)]
pub enum DisplayState {
    /// Nothing submitted since the last selection.
    Idle,
    Processing,
    Result(ResultView),
    Error(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub predicted_class: String,
    pub confidence: f64,
    pub confidence_text: String,
    pub probabilities: Vec<ProbabilityRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityRow {
    pub label: String,
    pub value: f64,
    pub percentage: String,
}

pub fn present(outcome: Option<&RequestOutcome>) -> DisplayState {
    match outcome {
        None => DisplayState::Idle,
        Some(RequestOutcome::Pending) => DisplayState::Processing,
        Some(RequestOutcome::Success(result)) => DisplayState::Result(ResultView::from(result)),
        Some(RequestOutcome::Failure(kind, message)) => {
            if kind.is_user_input() {
                DisplayState::Error(message.clone())
            } else {
                DisplayState::Error(format!(
                    "An error occurred while processing the image: {message}"
                ))
            }
        }
    }
}

/// `0.956` → `"95.60%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

impl From<&ClassificationResult> for ResultView {
    fn from(result: &ClassificationResult) -> Self {
        Self {
            predicted_class: result.predicted_class.clone(),
            confidence: result.confidence,
            confidence_text: format_percentage(result.confidence),
            probabilities: result
                .probabilities
                .iter()
                .map(|(label, &value)| ProbabilityRow {
                    label: label.clone(),
                    value,
                    percentage: format_percentage(value),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, WorkflowError};
    use rstest::rstest;
    use std::collections::BTreeMap;

    #[rstest]
    #[case(0.956, "95.60%")]
    #[case(0.044, "4.40%")]
    #[case(1.0, "100.00%")]
    #[case(0.0, "0.00%")]
    #[case(0.1234, "12.34%")]
    #[case(0.5, "50.00%")]
    fn percentages_have_two_decimals(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_percentage(value), expected);
    }

    #[test]
    fn success_lists_every_probability_in_label_order() {
        let result = ClassificationResult {
            predicted_class: "Pneumonia".into(),
            confidence: 0.956,
            probabilities: BTreeMap::from([
                ("Pneumonia".to_string(), 0.956),
                ("Normal".to_string(), 0.044),
            ]),
        };

        let DisplayState::Result(view) = present(Some(&RequestOutcome::Success(result))) else {
            panic!("expected a result view");
        };

        assert_eq!(view.predicted_class, "Pneumonia");
        assert_eq!(view.confidence_text, "95.60%");
        let rows: Vec<_> = view
            .probabilities
            .iter()
            .map(|row| (row.label.as_str(), row.percentage.as_str()))
            .collect();
        assert_eq!(rows, vec![("Normal", "4.40%"), ("Pneumonia", "95.60%")]);
    }

    #[test]
    fn pending_and_nothing_map_to_indicators() {
        assert_eq!(present(None), DisplayState::Idle);
        assert_eq!(
            present(Some(&RequestOutcome::Pending)),
            DisplayState::Processing
        );
    }

    #[test]
    fn service_failures_get_processing_prefix() {
        let outcome = RequestOutcome::from(WorkflowError::ServiceError {
            status: 500,
            body: "model unavailable".into(),
        });

        assert_eq!(
            present(Some(&outcome)),
            DisplayState::Error(
                "An error occurred while processing the image: HTTP error! status: 500, message: model unavailable"
                    .into()
            )
        );
    }

    #[rstest]
    #[case(ErrorKind::NoSelection, "Please select or upload an image before submitting")]
    #[case(ErrorKind::InvalidFileType, "Please select a valid image file")]
    fn input_errors_are_shown_verbatim(#[case] kind: ErrorKind, #[case] message: &str) {
        let outcome = RequestOutcome::Failure(kind, message.to_string());
        assert_eq!(present(Some(&outcome)), DisplayState::Error(message.into()));
    }
}
