// Domain value types
// Read-only data fetched once at startup and shared by every request

use serde::Deserialize;

/// Identity of the business the brochure describes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Enterprise {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactMethodType {
    Email,
}

impl ContactMethodType {
    /// Wire name used in configuration and JSON payloads
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
        }
    }

    /// Human readable label shown next to the value
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Email => "Email",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMethod {
    pub contact_method_type: ContactMethodType,
    pub value: String,
}

/// A titled block of content, e.g. the cover section of the home page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

/// The minimum needed to render any page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basics {
    pub enterprise: Enterprise,
    /// `None` when the configured contact method type is not recognized
    pub contact_method: Option<ContactMethod>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_method_type_parse() {
        assert_eq!(ContactMethodType::parse("email"), Some(ContactMethodType::Email));
        assert_eq!(ContactMethodType::parse("Email"), None);
        assert_eq!(ContactMethodType::parse("phone"), None);
        assert_eq!(ContactMethodType::parse(""), None);
    }

    #[test]
    fn test_contact_method_type_labels() {
        assert_eq!(ContactMethodType::Email.as_str(), "email");
        assert_eq!(ContactMethodType::Email.display_name(), "Email");
    }
}
