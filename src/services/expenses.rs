use serde_json::Value;

use crate::{
    data::{Data, Expense, InsertExpense},
    error::ApiError,
    services::dates::{iso_date, parse_timestamp},
    utils::{is_truthy, to_number, to_text},
};

pub const REQUIRED_FIELDS: [&str; 4] = ["amount", "description", "category", "date"];

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid field: amount must be a number")]
    InvalidAmount,

    #[error("Invalid field: date must be a valid date string (e.g. 2025-01-01)")]
    InvalidDate,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        return ApiError::BadRequest(err.to_string());
    }
}

pub async fn query(data: &Data) -> Vec<Expense> {
    return data.query_expenses().await;
}

pub async fn create(data: &Data, body: &[u8]) -> Result<Expense, ApiError> {
    let input = parse_body(body)?;
    let expense = validate(&input)?;

    return Ok(data.insert_expense(expense).await);
}

/// An empty body reads as `{}`.
pub fn parse_body(body: &[u8]) -> Result<Value, ValidationError> {
    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }

    return serde_json::from_slice(body).map_err(|err| {
        tracing::debug!("invalid json body: {err}");
        ValidationError::InvalidJson
    });
}

pub fn validate(input: &Value) -> Result<InsertExpense, ValidationError> {
    let [amount, description, category, date] = REQUIRED_FIELDS.map(|field| input.get(field));

    let missing = REQUIRED_FIELDS
        .into_iter()
        .zip([
            is_amount_present(amount),
            description.is_some_and(is_truthy),
            category.is_some_and(is_truthy),
            date.is_some_and(is_truthy),
        ])
        .filter_map(|(field, present)| (!present).then_some(field))
        .collect::<Vec<_>>();

    let (Some(amount), Some(description), Some(category), Some(date), true) =
        (amount, description, category, date, missing.is_empty())
    else {
        return Err(ValidationError::MissingFields(missing));
    };

    let amount = to_number(amount).ok_or(ValidationError::InvalidAmount)?;
    let timestamp = parse_timestamp(&to_text(date)).ok_or(ValidationError::InvalidDate)?;

    return Ok(InsertExpense {
        amount,
        description: to_text(description),
        category: to_text(category),
        date: iso_date(&timestamp),
    });
}

/// Zero and `false` count as an amount, only absent, `null` and `""` do not.
fn is_amount_present(amount: Option<&Value>) -> bool {
    return match amount {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    };
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::data::{Data, InsertExpense};

    use super::{ValidationError, create, parse_body, validate};

    fn valid() -> serde_json::Value {
        json!({
            "amount": 12.5,
            "description": "coffee",
            "category": "food",
            "date": "2025-01-01"
        })
    }

    #[test]
    fn accepts_a_valid_expense() {
        assert_eq!(
            validate(&valid()),
            Ok(InsertExpense {
                amount: 12.5,
                description: "coffee".to_owned(),
                category: "food".to_owned(),
                date: "2025-01-01".to_owned(),
            })
        );
    }

    #[test]
    fn empty_body_reports_every_field() {
        let input = parse_body(b"").expect("empty body");
        let err = validate(&input).expect_err("should be missing fields");

        assert_eq!(
            err.to_string(),
            "Missing required fields: amount, description, category, date"
        );
    }

    #[test]
    fn reports_missing_fields_in_declaration_order() {
        let input = json!({ "amount": 3, "date": "2025-01-01" });

        assert_eq!(
            validate(&input).expect_err("missing").to_string(),
            "Missing required fields: description, category"
        );
    }

    #[test]
    fn falsy_values_are_missing() {
        let input = json!({
            "amount": "",
            "description": 0,
            "category": false,
            "date": null
        });

        assert_eq!(
            validate(&input),
            Err(ValidationError::MissingFields(vec![
                "amount",
                "description",
                "category",
                "date"
            ]))
        );
    }

    #[test]
    fn zero_amount_is_present() {
        let mut input = valid();
        input["amount"] = json!(0);

        assert_eq!(validate(&input).expect("valid").amount, 0.0);
    }

    #[test]
    fn non_object_bodies_have_no_fields() {
        for body in [&b"null"[..], b"[1,2]", b"42", b"\"text\""] {
            let input = parse_body(body).expect("json");
            assert_eq!(
                validate(&input),
                Err(ValidationError::MissingFields(vec![
                    "amount",
                    "description",
                    "category",
                    "date"
                ]))
            );
        }
    }

    #[test]
    fn rejects_invalid_json() {
        assert_eq!(parse_body(b"{amount:"), Err(ValidationError::InvalidJson));
        assert_eq!(
            ValidationError::InvalidJson.to_string(),
            "Invalid JSON body"
        );
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let mut input = valid();
        input["amount"] = json!("abc");

        let err = validate(&input).expect_err("bad amount");
        assert_eq!(err, ValidationError::InvalidAmount);
        assert_eq!(err.to_string(), "Invalid field: amount must be a number");
    }

    #[test]
    fn rejects_unparsable_date() {
        let mut input = valid();
        input["date"] = json!("not-a-date");

        let err = validate(&input).expect_err("bad date");
        assert_eq!(err, ValidationError::InvalidDate);
        assert_eq!(
            err.to_string(),
            "Invalid field: date must be a valid date string (e.g. 2025-01-01)"
        );
    }

    #[test]
    fn coerces_field_values() {
        let input = json!({
            "amount": " 7.25 ",
            "description": 42,
            "category": ["home", "rent"],
            "date": "2025-03-10T22:00:00-05:00"
        });

        assert_eq!(
            validate(&input),
            Ok(InsertExpense {
                amount: 7.25,
                description: "42".to_owned(),
                category: "home,rent".to_owned(),
                date: "2025-03-11".to_owned(),
            })
        );
    }

    #[tokio::test]
    async fn create_appends_only_valid_expenses() {
        let data = Data::new();

        let first = create(&data, valid().to_string().as_bytes())
            .await
            .expect("first");
        assert!(create(&data, b"{}").await.is_err());
        let second = create(&data, valid().to_string().as_bytes())
            .await
            .expect("second");

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(data.count_expenses().await, 2);
    }
}
