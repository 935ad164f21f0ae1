use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ValidationErrors, ValidationFailure};
use crate::student::StudentPayload;

pub const FULL_NAME_MIN_LEN: usize = 5;
pub const FULL_NAME_MAX_LEN: usize = 50;

/// Eleven digits, optionally grouped as `000.000.000.00`.
static DOCUMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}\.?[0-9]{2}").expect("document pattern is valid")
});

/// Anything that can check itself before being written.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl Validate for StudentPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        StudentValidator.validate(self)
    }
}

/// Returns true when `document` contains a well-formed document number.
pub fn is_valid_document(document: &str) -> bool {
    DOCUMENT_PATTERN.is_match(document)
}

/// Field rules for students. Every rule runs; failures are collected rather
/// than stopping at the first one.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentValidator;

impl StudentValidator {
    /// Validates against today's local date.
    pub fn validate(&self, student: &StudentPayload) -> Result<(), ValidationErrors> {
        self.validate_at(student, Local::now().date_naive())
    }

    pub fn validate_at(
        &self,
        student: &StudentPayload,
        today: NaiveDate,
    ) -> Result<(), ValidationErrors> {
        let mut failures = Vec::new();

        check_full_name(&student.full_name, &mut failures);

        if student.birth_date >= today {
            failures.push(failure("birthDate", "Birth date must be before today"));
        }

        if !is_valid_document(&student.document) {
            failures.push(failure("document", "Document is invalid"));
        }

        if failures.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = failures.len(), "Student failed validation.");
            Err(ValidationErrors::new(failures))
        }
    }
}

fn check_full_name(full_name: &str, failures: &mut Vec<ValidationFailure>) {
    if full_name.trim().is_empty() {
        failures.push(failure("fullName", "Full name must not be empty"));
    }
    let len = full_name.chars().count();
    if len > FULL_NAME_MAX_LEN {
        failures.push(failure(
            "fullName",
            &format!("Full name must be at most {FULL_NAME_MAX_LEN} characters"),
        ));
    }
    if len < FULL_NAME_MIN_LEN {
        failures.push(failure(
            "fullName",
            &format!("Full name must be at least {FULL_NAME_MIN_LEN} characters"),
        ));
    }
}

fn failure(field: &'static str, message: &str) -> ValidationFailure {
    ValidationFailure {
        field,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn valid_student() -> StudentPayload {
        StudentPayload {
            full_name: "Maria Oliveira".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2001, 4, 17).unwrap(),
            document: "123.456.789.01".to_string(),
            phone_number: None,
            full_address: None,
        }
    }

    fn fields(errors: &ValidationErrors) -> Vec<&'static str> {
        errors.failures().iter().map(|f| f.field).collect()
    }

    #[test]
    fn test_valid_student() {
        assert!(StudentValidator.validate_at(&valid_student(), today()).is_ok());
    }

    #[test]
    fn test_empty_name_reports_both_rules() {
        let student = StudentPayload {
            full_name: String::new(),
            ..valid_student()
        };
        let errors = StudentValidator.validate_at(&student, today()).unwrap_err();

        let messages = errors.by_field().remove("fullName").unwrap();
        assert_eq!(
            messages,
            vec![
                "Full name must not be empty".to_string(),
                "Full name must be at least 5 characters".to_string(),
            ]
        );
    }

    #[test]
    fn test_whitespace_name_is_empty() {
        let student = StudentPayload {
            full_name: "       ".to_string(),
            ..valid_student()
        };
        let errors = StudentValidator.validate_at(&student, today()).unwrap_err();
        assert_eq!(errors.failures().len(), 1);
        assert_eq!(errors.failures()[0].message, "Full name must not be empty");
    }

    #[test]
    fn test_name_length_boundaries() {
        let at_min = StudentPayload {
            full_name: "Abcde".to_string(),
            ..valid_student()
        };
        let at_max = StudentPayload {
            full_name: "a".repeat(FULL_NAME_MAX_LEN),
            ..valid_student()
        };
        let too_short = StudentPayload {
            full_name: "Abcd".to_string(),
            ..valid_student()
        };
        let too_long = StudentPayload {
            full_name: "a".repeat(FULL_NAME_MAX_LEN + 1),
            ..valid_student()
        };

        assert!(StudentValidator.validate_at(&at_min, today()).is_ok());
        assert!(StudentValidator.validate_at(&at_max, today()).is_ok());
        assert_eq!(
            fields(&StudentValidator.validate_at(&too_short, today()).unwrap_err()),
            vec!["fullName"]
        );
        assert_eq!(
            StudentValidator.validate_at(&too_long, today()).unwrap_err().failures()[0].message,
            "Full name must be at most 50 characters"
        );
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 50 two-byte characters is still 50 characters.
        let student = StudentPayload {
            full_name: "é".repeat(FULL_NAME_MAX_LEN),
            ..valid_student()
        };
        assert!(StudentValidator.validate_at(&student, today()).is_ok());
    }

    #[test]
    fn test_birth_date_must_be_in_the_past() {
        let born_today = StudentPayload {
            birth_date: today(),
            ..valid_student()
        };
        let born_yesterday = StudentPayload {
            birth_date: today().pred_opt().unwrap(),
            ..valid_student()
        };

        let errors = StudentValidator.validate_at(&born_today, today()).unwrap_err();
        assert_eq!(fields(&errors), vec!["birthDate"]);
        assert!(StudentValidator.validate_at(&born_yesterday, today()).is_ok());
    }

    #[test]
    fn test_document_formats() {
        assert!(is_valid_document("12345678901"));
        assert!(is_valid_document("123.456.789.01"));
        assert!(is_valid_document("123456.78901"));
        assert!(!is_valid_document(""));
        assert!(!is_valid_document("123.456.789-01"));
        assert!(!is_valid_document("1234567890"));
    }

    #[test]
    fn test_all_failures_are_collected() {
        let student = StudentPayload {
            full_name: "Ana".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            document: "abc".to_string(),
            phone_number: None,
            full_address: None,
        };
        let errors = StudentValidator.validate_at(&student, today()).unwrap_err();
        assert_eq!(fields(&errors), vec!["fullName", "birthDate", "document"]);
        assert_eq!(errors.by_field().len(), 3);
    }
}
