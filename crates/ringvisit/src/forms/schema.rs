use std::collections::BTreeSet;

use super::FormType;

/// Partnership tracks offered on the partner application.
pub const PARTNERSHIP_TYPES: &[&str] = &["reseller", "affiliate", "integration", "other"];

/// Semantic type of a form field; drives the format check applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    /// Minimum length counts digits, maximum counts characters.
    Phone,
    /// Absolute URL.
    Url,
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBound {
    pub limit: usize,
    pub message: &'static str,
}

/// Declarative constraints for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    required_message: &'static str,
    format_message: &'static str,
    min: Option<LengthBound>,
    max: Option<LengthBound>,
}

impl FieldRule {
    pub fn required(name: &'static str, kind: FieldKind, message: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            required_message: message,
            format_message: message,
            min: None,
            max: None,
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            required_message: "",
            format_message: "Invalid value",
            min: None,
            max: None,
        }
    }

    pub fn min_len(mut self, limit: usize, message: &'static str) -> Self {
        self.min = Some(LengthBound { limit, message });
        self
    }

    pub fn max_len(mut self, limit: usize, message: &'static str) -> Self {
        self.max = Some(LengthBound { limit, message });
        self
    }

    pub fn format_message(mut self, message: &'static str) -> Self {
        self.format_message = message;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn required_message(&self) -> &'static str {
        self.required_message
    }

    pub fn invalid_format_message(&self) -> &'static str {
        self.format_message
    }

    pub fn min(&self) -> Option<LengthBound> {
        self.min
    }

    pub fn max(&self) -> Option<LengthBound> {
        self.max
    }
}

/// Raised when a schema definition breaks its own invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("field `{0}` is declared more than once")]
    DuplicateField(&'static str),
    #[error("name field `{0}` is not declared in the schema")]
    UnknownNameField(&'static str),
}

/// Ordered field set for one form. Field names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    form_type: FormType,
    name_field: Option<&'static str>,
    fields: Vec<FieldRule>,
}

impl FormSchema {
    pub fn new(
        form_type: FormType,
        name_field: Option<&'static str>,
        fields: Vec<FieldRule>,
    ) -> Result<Self, SchemaError> {
        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField(field.name));
            }
        }

        if let Some(name_field) = name_field {
            if !seen.contains(name_field) {
                return Err(SchemaError::UnknownNameField(name_field));
            }
        }

        Ok(Self {
            form_type,
            name_field,
            fields,
        })
    }

    /// General enquiry form on the contact page.
    pub fn contact() -> Result<Self, SchemaError> {
        Self::new(
            FormType::Contact,
            Some("fullName"),
            vec![
                FieldRule::required("fullName", FieldKind::Text, "Full name is required")
                    .max_len(100, "Name must be less than 100 characters"),
                FieldRule::required("email", FieldKind::Email, "Invalid email address")
                    .max_len(255, "Email must be less than 255 characters"),
                FieldRule::required(
                    "phone",
                    FieldKind::Phone,
                    "Valid phone number is required",
                )
                .min_len(10, "Valid phone number is required")
                .max_len(20, "Phone number too long"),
                FieldRule::optional("company", FieldKind::Text)
                    .max_len(200, "Company name too long"),
                FieldRule::required(
                    "serviceInterest",
                    FieldKind::Text,
                    "Service interest is required",
                )
                .max_len(500, "Service interest must be less than 500 characters"),
                FieldRule::required(
                    "message",
                    FieldKind::Text,
                    "Message must be at least 10 characters",
                )
                .min_len(10, "Message must be at least 10 characters")
                .max_len(1000, "Message must be less than 1000 characters"),
            ],
        )
    }

    /// Reseller/affiliate application on the partner page.
    pub fn partner() -> Result<Self, SchemaError> {
        Self::new(
            FormType::Partner,
            Some("contactName"),
            vec![
                FieldRule::required("companyName", FieldKind::Text, "Company name is required")
                    .max_len(200, "Company name too long"),
                FieldRule::required("contactName", FieldKind::Text, "Contact name is required")
                    .max_len(100, "Name must be less than 100 characters"),
                FieldRule::required("email", FieldKind::Email, "Invalid email address")
                    .max_len(255, "Email must be less than 255 characters"),
                FieldRule::required(
                    "phone",
                    FieldKind::Phone,
                    "Valid phone number is required",
                )
                .min_len(10, "Valid phone number is required")
                .max_len(20, "Phone number too long"),
                FieldRule::optional("website", FieldKind::Url)
                    .format_message("Invalid URL")
                    .max_len(500, "URL must be less than 500 characters"),
                FieldRule::required(
                    "partnershipType",
                    FieldKind::Choice(PARTNERSHIP_TYPES),
                    "Please select a partnership type",
                ),
                FieldRule::optional("expectedVolume", FieldKind::Text)
                    .max_len(100, "Expected volume must be less than 100 characters"),
                FieldRule::required(
                    "message",
                    FieldKind::Text,
                    "Message must be at least 10 characters",
                )
                .min_len(10, "Message must be at least 10 characters")
                .max_len(1000, "Message must be less than 1000 characters"),
            ],
        )
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    /// Field holding the submitter's full name, split into first/last on dispatch.
    pub fn name_field(&self) -> Option<&'static str> {
        self.name_field
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|field| field.name == name)
    }
}
