//! Render context module
//!
//! The serializable view of a [`DomainResult`] shared by the HTML and JSON renderers.
//! Field order is the JSON key order.

use serde::Serialize;

use super::DomainResult;
use crate::domain::{Basics, Section};

#[derive(Debug, Serialize)]
pub struct EnterpriseContext<'a> {
    pub name: &'a str,
}

/// Contact method as shown to clients
///
/// Unrecognized or unset contact methods serialize to an empty object.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ContactMethodContext<'a> {
    Recognized {
        contact_method_type: &'static str,
        display_name: &'static str,
        value: &'a str,
    },
    Unrecognized {},
}

#[derive(Debug, Serialize)]
pub struct BasicsContext<'a> {
    pub enterprise: EnterpriseContext<'a>,
    pub contact_method: ContactMethodContext<'a>,
}

impl<'a> From<&'a Basics> for BasicsContext<'a> {
    fn from(basics: &'a Basics) -> Self {
        let contact_method = match &basics.contact_method {
            Some(method) => ContactMethodContext::Recognized {
                contact_method_type: method.contact_method_type.as_str(),
                display_name: method.contact_method_type.display_name(),
                value: &method.value,
            },
            None => ContactMethodContext::Unrecognized {},
        };

        Self {
            enterprise: EnterpriseContext {
                name: &basics.enterprise.name,
            },
            contact_method,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SectionContext<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

impl<'a> From<&'a Section> for SectionContext<'a> {
    fn from(section: &'a Section) -> Self {
        Self {
            title: &section.title,
            body: &section.body,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    #[serde(flatten)]
    pub basics: Option<BasicsContext<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionContext<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> PageContext<'a> {
    pub fn from_result(result: &DomainResult<'a>) -> Self {
        match *result {
            DomainResult::Cover { section, basics } => Self {
                basics: Some(basics.into()),
                section: Some(section.into()),
                error: None,
            },
            DomainResult::Basics { basics } => Self {
                basics: Some(basics.into()),
                section: None,
                error: None,
            },
            DomainResult::NotFound { path, basics } => Self {
                basics: Some(basics.into()),
                section: None,
                error: Some(not_found_message(path)),
            },
            DomainResult::UnexpectedException { error, basics } => Self {
                basics: basics.map(BasicsContext::from),
                section: None,
                error: Some(error.to_string()),
            },
        }
    }
}

pub fn not_found_message(path: &str) -> String {
    format!("Resource '{path}' not found.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactMethod, ContactMethodType};
    use crate::render::fixtures::basics;

    #[test]
    fn test_recognized_contact_method() {
        let basics = basics();
        let context = BasicsContext::from(&basics);
        assert_eq!(
            serde_json::to_value(&context.contact_method).unwrap(),
            serde_json::json!({
                "contact_method_type": "email",
                "display_name": "Email",
                "value": "ejemplo@example.com"
            })
        );
    }

    #[test]
    fn test_unrecognized_contact_method_is_empty_object() {
        let mut basics = basics();
        basics.contact_method = None;
        let context = BasicsContext::from(&basics);
        assert_eq!(
            serde_json::to_string(&context.contact_method).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_exception_without_basics_omits_them() {
        let error = crate::domain::DomainError::Processing("boom".to_string());
        let context = PageContext::from_result(&DomainResult::UnexpectedException {
            error: &error,
            basics: None,
        });
        assert_eq!(
            serde_json::to_value(&context).unwrap(),
            serde_json::json!({ "error": "boom" })
        );
    }

    #[test]
    fn test_not_found_context_carries_path() {
        let basics = basics();
        let context = PageContext::from_result(&DomainResult::NotFound {
            path: "/asdf",
            basics: &basics,
        });
        assert_eq!(context.error.as_deref(), Some("Resource '/asdf' not found."));
        assert!(context.basics.is_some());
    }

    #[test]
    fn test_contact_method_value_is_borrowed_verbatim() {
        let basics = Basics {
            contact_method: Some(ContactMethod {
                contact_method_type: ContactMethodType::Email,
                value: "a+b@example.com".to_string(),
            }),
            ..basics()
        };
        let context = BasicsContext::from(&basics);
        assert!(matches!(
            context.contact_method,
            ContactMethodContext::Recognized { value: "a+b@example.com", .. }
        ));
    }
}
