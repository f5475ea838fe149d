//! Field-level validation results.
//!
//! Form fields arrive as raw strings; the helpers here turn them into typed
//! values and collect per-field messages so a form can be shown again with
//! every problem listed at once.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool { self.fields.contains_key(field) }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for m in messages {
                if !first { f.write_str("; ")?; }
                write!(f, "{field}: {m}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Trimmed value, `None` for missing or blank input.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Required text field.
pub fn required_text(errors: &mut ValidationErrors, field: &str, label: &str, raw: Option<&str>) -> Option<String> {
    match non_blank(raw) {
        Some(v) => Some(v.to_string()),
        None => {
            errors.add(field, format!("The {label} field is required."));
            None
        }
    }
}

/// Required integer field.
pub fn required_int(errors: &mut ValidationErrors, field: &str, label: &str, raw: Option<&str>) -> Option<i32> {
    let Some(v) = non_blank(raw) else {
        errors.add(field, format!("The {label} field is required."));
        return None;
    };
    match v.parse::<i32>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, format!("The value '{v}' is not valid for {label}."));
            None
        }
    }
}

/// Optional integer field; blank is `None`, garbage is an error.
pub fn optional_int(errors: &mut ValidationErrors, field: &str, label: &str, raw: Option<&str>) -> Option<i32> {
    let v = non_blank(raw)?;
    match v.parse::<i32>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, format!("The value '{v}' is not valid for {label}."));
            None
        }
    }
}

/// Required finite decimal field.
pub fn required_f64(errors: &mut ValidationErrors, field: &str, label: &str, raw: Option<&str>) -> Option<f64> {
    let Some(v) = non_blank(raw) else {
        errors.add(field, format!("The {label} field is required."));
        return None;
    };
    match v.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            errors.add(field, format!("The value '{v}' is not valid for {label}."));
            None
        }
    }
}

/// Optional text trimmed to `None` when blank; longer than `max` is an error.
pub fn optional_text(errors: &mut ValidationErrors, field: &str, label: &str, raw: Option<&str>, max: usize) -> Option<String> {
    let v = non_blank(raw)?;
    if v.chars().count() > max {
        errors.add(field, format!("The field {label} must be at most {max} characters."));
        return None;
    }
    Some(v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_messages_per_field() {
        let mut e = ValidationErrors::new();
        e.add("boat_class", "required");
        e.add("boat_class", "too long");
        e.add("hull_length", "not a number");
        assert_eq!(e.get("boat_class").len(), 2);
        assert!(e.has("hull_length"));
        assert!(e.get("sail_number").is_empty());
        assert_eq!(e.to_string(), "boat_class: required; boat_class: too long; hull_length: not a number");
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut e = ValidationErrors::new();
        e.add("parking_code", "Please insert a parkingCode");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json, serde_json::json!({"parking_code": ["Please insert a parkingCode"]}));
    }

    #[test]
    fn parsers_report_type_errors() {
        let mut e = ValidationErrors::new();
        assert_eq!(required_int(&mut e, "member_id", "MemberId", Some(" 12 ")), Some(12));
        assert_eq!(required_int(&mut e, "boat_type_id", "BoatTypeId", Some("x")), None);
        assert_eq!(required_f64(&mut e, "hull_length", "HullLength", Some("NaN")), None);
        assert_eq!(optional_int(&mut e, "version", "Version", Some("")), None);
        assert!(e.has("boat_type_id"));
        assert!(e.has("hull_length"));
        assert!(!e.has("version"));
    }

    #[test]
    fn blank_required_text_is_reported() {
        let mut e = ValidationErrors::new();
        assert_eq!(required_text(&mut e, "boat_class", "BoatClass", Some("   ")), None);
        assert_eq!(e.get("boat_class"), ["The BoatClass field is required.".to_string()]);
        assert!(ValidationErrors::new().into_result(1).is_ok());
    }
}
