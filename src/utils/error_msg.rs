use crate::models::error_type::ErrorType;

/// Build the human-readable message for `error_type`.
///
/// Placeholders in the template are filled left to right from `labels`.
/// Placeholders without a label are dropped, extra labels are ignored.
pub fn return_msg(error_type: ErrorType, labels: &[&str]) -> String {
    let template = error_type.template();
    let mut message = String::with_capacity(template.len() + 16);
    let mut labels = labels.iter();
    let mut parts = template.split("{}").peekable();

    while let Some(part) = parts.next() {
        message.push_str(part);
        if parts.peek().is_some() {
            if let Some(label) = labels.next() {
                message.push_str(label);
            }
        }
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_msg_fills_placeholder() {
        assert_eq!(return_msg(ErrorType::NoObjectExists, &["log"]), "No log exists.");
    }

    #[test]
    fn test_return_msg_fills_in_order() {
        assert_eq!(
            return_msg(ErrorType::InvalidParam, &["sort", "unknown field 'foo'"]),
            "Invalid sort: unknown field 'foo'"
        );
    }

    #[test]
    fn test_return_msg_ignores_extra_labels() {
        assert_eq!(
            return_msg(ErrorType::NoObjectExists, &["log", "log"]),
            "No log exists."
        );
    }

    #[test]
    fn test_return_msg_missing_labels() {
        assert_eq!(return_msg(ErrorType::NoObjectExists, &[]), "No  exists.");
    }
}
