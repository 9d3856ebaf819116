use crate::error::WorkflowError;
use crate::{ClassificationResult, RawClassification};
use log::debug;

/// Checks a success body from the classification service. The result is
/// either complete or rejected; nothing is defaulted, rounded or clamped.
pub fn validate(raw_json: &str) -> Result<ClassificationResult, WorkflowError> {
    let body: serde_json::Value = serde_json::from_str(raw_json)
        .map_err(|e| WorkflowError::MalformedResponse(format!("unparseable body: {e}")))?;
    // A derived struct also deserializes from a positional array.
    if !body.is_object() {
        return Err(WorkflowError::MalformedResponse(
            "body is not a JSON object".into(),
        ));
    }
    let raw: RawClassification = serde_json::from_value(body)
        .map_err(|e| WorkflowError::MalformedResponse(format!("unexpected field type: {e}")))?;

    let predicted_class = raw
        .predicted_class
        .filter(|class| !class.is_empty())
        .ok_or_else(|| missing("class"))?;
    let confidence = raw.confidence.ok_or_else(|| missing("confidence"))?;
    let probabilities = raw
        .probabilities
        .filter(|probabilities| !probabilities.is_empty())
        .ok_or_else(|| missing("probabilities"))?;

    let result = ClassificationResult {
        predicted_class,
        confidence,
        probabilities,
    };
    debug!(
        "Full API Response: {}",
        serde_json::to_string_pretty(&result).unwrap_or_default()
    );
    Ok(result)
}

fn missing(field: &str) -> WorkflowError {
    WorkflowError::MalformedResponse(format!("missing or empty `{field}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rstest::rstest;

    const PNEUMONIA: &str =
        r#"{"class":"Pneumonia","confidence":0.956,"probabilities":{"Normal":0.044,"Pneumonia":0.956}}"#;

    #[test]
    fn accepts_complete_response_verbatim() {
        let result = validate(PNEUMONIA).unwrap();
        assert_eq!(result.predicted_class, "Pneumonia");
        assert_eq!(result.confidence, 0.956);
        assert_eq!(result.probabilities["Normal"], 0.044);
        assert_eq!(result.probabilities["Pneumonia"], 0.956);
    }

    #[test]
    fn does_not_clamp_out_of_range_values() {
        let result =
            validate(r#"{"class":"Normal","confidence":1.7,"probabilities":{"Normal":-0.2}}"#)
                .unwrap();
        assert_eq!(result.confidence, 1.7);
        assert_eq!(result.probabilities["Normal"], -0.2);
    }

    #[test]
    fn ignores_unknown_fields() {
        let body = r#"{"class":"Normal","confidence":0.5,"probabilities":{"Normal":0.5},"model":"v2"}"#;
        assert!(validate(body).is_ok());
    }

    #[rstest]
    #[case::missing_class(r#"{"confidence":0.9,"probabilities":{"Normal":0.9}}"#)]
    #[case::missing_confidence(r#"{"class":"Normal","probabilities":{"Normal":0.9}}"#)]
    #[case::missing_probabilities(r#"{"class":"Normal","confidence":0.9}"#)]
    #[case::empty_class(r#"{"class":"","confidence":0.9,"probabilities":{"Normal":0.9}}"#)]
    #[case::null_confidence(r#"{"class":"Normal","confidence":null,"probabilities":{"Normal":0.9}}"#)]
    #[case::empty_probabilities(r#"{"class":"Normal","confidence":0.9,"probabilities":{}}"#)]
    #[case::null_probabilities(r#"{"class":"Normal","confidence":0.9,"probabilities":null}"#)]
    #[case::string_confidence(r#"{"class":"Normal","confidence":"0.9","probabilities":{"Normal":0.9}}"#)]
    #[case::non_numeric_probability(r#"{"class":"Normal","confidence":0.9,"probabilities":{"Normal":"high"}}"#)]
    #[case::empty_object("{}")]
    #[case::array("[]")]
    #[case::positional_array(r#"["Pneumonia", 0.956, {"Normal":0.044,"Pneumonia":0.956}]"#)]
    #[case::bare_string(r#""Pneumonia""#)]
    #[case::not_json("model unavailable")]
    fn rejects_incomplete_responses(#[case] body: &str) {
        let err = validate(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }
}
