use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

use super::schema::{FieldKind, FieldRule, FormSchema};
use super::FormType;

/// Raw field values as entered by the submitter, keyed by field name.
pub type RawInput = BTreeMap<String, String>;

/// Either a clean record or the per-field messages explaining why not.
pub type ValidationResult = Result<FormRecord, FieldErrors>;

/// Validated, trimmed field values for one submission. Every schema field is
/// present; empty optional fields hold `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    form_type: FormType,
    name_field: Option<&'static str>,
    values: BTreeMap<&'static str, String>,
}

impl FormRecord {
    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    pub fn name_field(&self) -> Option<&'static str> {
        self.name_field
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
    }
}

/// One message per offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Apply `schema` to `input`. Pure: no side effects beyond the returned value.
pub fn validate(schema: &FormSchema, input: &RawInput) -> ValidationResult {
    let mut values = BTreeMap::new();
    let mut errors = BTreeMap::new();

    for rule in schema.fields() {
        let value = input
            .get(rule.name())
            .map(|raw| raw.trim())
            .unwrap_or_default();

        match check_field(rule, value) {
            Ok(()) => {
                values.insert(rule.name(), value.to_string());
            }
            Err(message) => {
                errors.insert(rule.name().to_string(), message.to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(FormRecord {
            form_type: schema.form_type(),
            name_field: schema.name_field(),
            values,
        })
    } else {
        Err(FieldErrors(errors))
    }
}

/// First violated rule wins: presence, minimum, format, maximum.
fn check_field(rule: &FieldRule, value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return if rule.is_required() {
            Err(rule.required_message())
        } else {
            Ok(())
        };
    }

    if let Some(min) = rule.min() {
        let measured = match rule.kind() {
            FieldKind::Phone => value.chars().filter(char::is_ascii_digit).count(),
            _ => value.chars().count(),
        };
        if measured < min.limit {
            return Err(min.message);
        }
    }

    let well_formed = match rule.kind() {
        FieldKind::Text | FieldKind::Phone => true,
        FieldKind::Email => is_email(value),
        FieldKind::Url => is_absolute_url(value),
        FieldKind::Choice(options) => options.iter().any(|option| *option == value),
    };
    if !well_formed {
        return Err(rule.invalid_format_message());
    }

    if let Some(max) = rule.max() {
        if value.chars().count() > max.limit {
            return Err(max.message);
        }
    }

    Ok(())
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
            .expect("email pattern compiles")
    })
}

fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && email_pattern().is_match(value)
}

fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_input() -> RawInput {
        [
            ("fullName", "Jane Doe Smith"),
            ("email", "user@example.com"),
            ("phone", "(555) 123-4567"),
            ("company", ""),
            ("serviceInterest", "Virtual triage"),
            ("message", "We would like a product walkthrough."),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
    }

    fn contact_schema() -> FormSchema {
        FormSchema::contact().expect("contact schema is valid")
    }

    #[test]
    fn accepts_complete_contact_input() {
        let record = validate(&contact_schema(), &contact_input()).expect("input is valid");
        assert_eq!(record.form_type(), FormType::Contact);
        assert_eq!(record.get("company"), Some(""));
        assert_eq!(record.get("fullName"), Some("Jane Doe Smith"));
    }

    #[test]
    fn each_empty_required_field_fails_alone() {
        let schema = contact_schema();
        for rule in schema.fields().iter().filter(|rule| rule.is_required()) {
            let mut input = contact_input();
            input.insert(rule.name().to_string(), String::new());

            let errors = validate(&schema, &input).expect_err("missing field rejected");
            assert_eq!(errors.len(), 1, "only {} should fail", rule.name());
            let message = errors.get(rule.name()).expect("error for the empty field");
            assert!(!message.is_empty());
        }
    }

    #[test]
    fn missing_keys_count_as_empty() {
        let mut input = contact_input();
        input.remove("company");
        input.remove("email");

        let errors = validate(&contact_schema(), &input).expect_err("email missing");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email"]);
    }

    #[test]
    fn empty_email_reads_as_invalid_on_both_forms() {
        let mut input = contact_input();
        input.insert("email".to_string(), "   ".to_string());
        let errors = validate(&contact_schema(), &input).expect_err("blank email rejected");
        assert_eq!(errors.get("email"), Some("Invalid email address"));

        let partner = FormSchema::partner().expect("partner schema is valid");
        let errors = validate(&partner, &RawInput::new()).expect_err("empty partner form");
        assert_eq!(errors.get("email"), Some("Invalid email address"));
    }

    #[test]
    fn email_format_is_checked() {
        let schema = contact_schema();
        let mut input = contact_input();
        input.insert("email".to_string(), "not-an-email".to_string());
        let errors = validate(&schema, &input).expect_err("bad email rejected");
        assert_eq!(errors.get("email"), Some("Invalid email address"));

        for bad in ["user@example", ".user@example.com", "us..er@example.com", "a b@c.io"] {
            assert!(!is_email(bad), "{bad} should be rejected");
        }
        for good in ["user@example.com", "first.last+tag@mail.example.org", "o'neil@ex.co"] {
            assert!(is_email(good), "{good} should be accepted");
        }
    }

    #[test]
    fn phone_minimum_counts_digits() {
        let schema = contact_schema();
        let mut input = contact_input();

        input.insert("phone".to_string(), "555123456".to_string());
        let errors = validate(&schema, &input).expect_err("nine digits rejected");
        assert_eq!(errors.get("phone"), Some("Valid phone number is required"));

        input.insert("phone".to_string(), "5551234567".to_string());
        assert!(validate(&schema, &input).is_ok());

        input.insert("phone".to_string(), "+1 (555) 123-4567 ext 89".to_string());
        let errors = validate(&schema, &input).expect_err("too long");
        assert_eq!(errors.get("phone"), Some("Phone number too long"));
    }

    #[test]
    fn values_are_trimmed_before_checks() {
        let schema = contact_schema();
        let mut input = contact_input();
        input.insert("fullName".to_string(), "   ".to_string());
        input.insert("message".to_string(), "  short   ".to_string());

        let errors = validate(&schema, &input).expect_err("blank values rejected");
        assert_eq!(errors.get("fullName"), Some("Full name is required"));
        assert_eq!(
            errors.get("message"),
            Some("Message must be at least 10 characters")
        );
    }

    #[test]
    fn optional_fields_are_checked_only_when_filled() {
        let schema = FormSchema::partner().expect("partner schema is valid");
        let mut input: RawInput = [
            ("companyName", "Acme Health"),
            ("contactName", "Madonna"),
            ("email", "partners@acme.example"),
            ("phone", "555-123-4567"),
            ("website", ""),
            ("partnershipType", "reseller"),
            ("message", "Interested in reselling to clinics."),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let record = validate(&schema, &input).expect("optional fields may be empty");
        assert_eq!(record.get("website"), Some(""));
        assert_eq!(record.get("expectedVolume"), Some(""));

        input.insert("website".to_string(), "acme dot com".to_string());
        let errors = validate(&schema, &input).expect_err("bad url rejected");
        assert_eq!(errors.get("website"), Some("Invalid URL"));

        input.insert("website".to_string(), "https://acme.example".to_string());
        assert!(validate(&schema, &input).is_ok());
    }

    #[test]
    fn choice_must_be_an_offered_option() {
        let schema = FormSchema::partner().expect("partner schema is valid");
        let input: RawInput = [
            ("companyName", "Acme Health"),
            ("contactName", "Pat Lee"),
            ("email", "pat@acme.example"),
            ("phone", "5551234567"),
            ("partnershipType", "franchise"),
            ("message", "Looking for a referral arrangement."),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let errors = validate(&schema, &input).expect_err("unknown option rejected");
        assert_eq!(
            errors.get("partnershipType"),
            Some("Please select a partnership type")
        );
        assert_eq!(errors.len(), 1);
    }
}
