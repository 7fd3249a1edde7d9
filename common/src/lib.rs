pub mod config;
pub mod logger;

use validator::ValidationErrors;

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "code must not be empty"))]
        code: String,
        #[validate(range(min = 1))]
        credit: u32,
    }

    #[test]
    fn test_format_validation_errors_uses_messages_and_codes() {
        let probe = Probe {
            code: String::new(),
            credit: 0,
        };
        let errors = probe.validate().unwrap_err();
        let formatted = format_validation_errors(&errors);
        assert!(formatted.contains("code must not be empty"));
        assert!(formatted.contains("credit: range"));
    }

    #[test]
    fn test_format_validation_errors_valid_probe() {
        let probe = Probe {
            code: "CS101".to_string(),
            credit: 4,
        };
        assert!(probe.validate().is_ok());
    }
}
