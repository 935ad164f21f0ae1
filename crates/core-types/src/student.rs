use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::entity::BaseEntity;

/// A student as stored in the `students` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Maria Oliveira")]
    pub full_name: String,
    #[schema(value_type = String, format = Date, example = "2001-04-17")]
    pub birth_date: NaiveDate,
    #[schema(example = "123.456.789.01")]
    pub document: String,
    pub phone_number: Option<String>,
    pub full_address: Option<String>,
}

/// The body of create and update requests.
///
/// `fullName` and `document` default to empty strings when absent so the
/// validator, not the JSON decoder, reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    #[serde(default)]
    #[schema(example = "Maria Oliveira")]
    pub full_name: String,
    #[schema(value_type = String, format = Date, example = "2001-04-17")]
    pub birth_date: NaiveDate,
    #[serde(default)]
    #[schema(example = "123.456.789.01")]
    pub document: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub full_address: Option<String>,
}

impl BaseEntity for Student {
    type Payload = StudentPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_parts(id: i64, payload: StudentPayload) -> Self {
        Self {
            id,
            full_name: payload.full_name,
            birth_date: payload.birth_date,
            document: payload.document,
            phone_number: payload.phone_number,
            full_address: payload.full_address,
        }
    }
}

impl From<Student> for StudentPayload {
    fn from(student: Student) -> Self {
        Self {
            full_name: student.full_name,
            birth_date: student.birth_date,
            document: student.document,
            phone_number: student.phone_number,
            full_address: student.full_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_uses_camel_case_keys() {
        let payload: StudentPayload = serde_json::from_value(json!({
            "fullName": "Maria Oliveira",
            "birthDate": "2001-04-17",
            "document": "123.456.789.01",
            "phoneNumber": "+55 11 99999-0000"
        }))
        .unwrap();

        assert_eq!(payload.full_name, "Maria Oliveira");
        assert_eq!(payload.birth_date, NaiveDate::from_ymd_opt(2001, 4, 17).unwrap());
        assert_eq!(payload.phone_number.as_deref(), Some("+55 11 99999-0000"));
        assert_eq!(payload.full_address, None);
    }

    #[test]
    fn missing_name_and_document_become_empty() {
        let payload: StudentPayload =
            serde_json::from_value(json!({ "birthDate": "2001-04-17" })).unwrap();
        assert!(payload.full_name.is_empty());
        assert!(payload.document.is_empty());
    }

    #[test]
    fn from_parts_keeps_every_field() {
        let payload = StudentPayload {
            full_name: "Joao Pereira".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
            document: "12345678901".to_string(),
            phone_number: None,
            full_address: Some("Rua A, 10".to_string()),
        };
        let student = Student::from_parts(7, payload.clone());

        assert_eq!(student.id(), 7);
        assert_eq!(StudentPayload::from(student.clone()), payload);
        assert_eq!(
            serde_json::to_value(&student).unwrap()["fullAddress"],
            json!("Rua A, 10")
        );
    }
}
