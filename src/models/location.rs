use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Location as accepted from clients on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time_to_enjoy: f64,
    pub category: String,
}

/// Location as returned to clients, carrying the store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub id: i64,
    #[serde(flatten)]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl Location {
    /// Checks a raw request body against the location shape.
    ///
    /// Float fields accept JSON numbers and numeric strings, text fields accept
    /// strings only. Every offending field is reported, not just the first.
    pub fn validate(body: &Value) -> Result<Location, Vec<FieldError>> {
        let Some(fields) = body.as_object() else {
            return Err(vec![FieldError::new("body", "expected a JSON object")]);
        };

        let mut errors = Vec::new();
        let name = text_field(fields, "name", &mut errors);
        let latitude = float_field(fields, "latitude", &mut errors);
        let longitude = float_field(fields, "longitude", &mut errors);
        let time_to_enjoy = float_field(fields, "time_to_enjoy", &mut errors);
        let category = text_field(fields, "category", &mut errors);

        let time_to_enjoy = match time_to_enjoy {
            Some(value) if value <= 0.0 => {
                errors.push(FieldError::new("time_to_enjoy", "must be greater than 0"));
                None
            }
            other => other,
        };

        match (name, latitude, longitude, time_to_enjoy, category) {
            (Some(name), Some(latitude), Some(longitude), Some(time_to_enjoy), Some(category)) => {
                Ok(Location {
                    name,
                    latitude,
                    longitude,
                    time_to_enjoy,
                    category,
                })
            }
            _ => Err(errors),
        }
    }
}

fn text_field(
    fields: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match fields.get(field) {
        Some(Value::String(text)) => Some(text.clone()),
        None => {
            errors.push(FieldError::new(field, "field required"));
            None
        }
        Some(_) => {
            errors.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}

fn float_field(
    fields: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let parsed = match fields.get(field) {
        None => Err("field required"),
        Some(Value::Number(number)) => number.as_f64().ok_or("must be a valid number"),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| "must be a valid number"),
        Some(_) => Err("must be a valid number"),
    }
    .and_then(|value| {
        if value.is_finite() {
            Ok(value)
        } else {
            Err("must be a finite number")
        }
    });

    match parsed {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}
