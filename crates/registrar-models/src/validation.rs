use registrar_core::errors::ValidationError;
use validator::{Validate, ValidationErrors};

/// Flatten `validator` errors into one message per failed rule.
///
/// Fields are ordered by name so the message is stable.
fn format_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}

/// Run declarative validation and convert failures into a [`ValidationError`].
pub fn check<T: Validate>(payload: &T) -> Result<(), ValidationError> {
    payload
        .validate()
        .map_err(|errors| ValidationError::from_messages(format_errors(&errors)))
}
