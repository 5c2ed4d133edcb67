use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::SiteConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    pub rating_value: String,
    pub review_count: String,
}

/// Optional overrides for the MedicalBusiness document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalBusinessDetails {
    pub description: Option<String>,
    pub medical_specialty: Option<String>,
    pub aggregate_rating: Option<AggregateRating>,
}

/// Builds schema.org JSON-LD documents from the site's company constants.
#[derive(Debug, Clone)]
pub struct StructuredData {
    site: SiteConfig,
}

impl StructuredData {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    fn postal_address(&self) -> Value {
        let address = &self.site.address;
        json!({
            "@type": "PostalAddress",
            "streetAddress": address.street,
            "addressLocality": address.locality,
            "addressRegion": address.region,
            "postalCode": address.postal_code,
            "addressCountry": address.country,
        })
    }

    pub fn faq_page(&self, faqs: &[FaqItem]) -> Value {
        json!({
            "@context": "https://schema.org",
            "@type": "FAQPage",
            "mainEntity": faqs
                .iter()
                .map(|faq| json!({
                    "@type": "Question",
                    "name": faq.question,
                    "acceptedAnswer": {
                        "@type": "Answer",
                        "text": faq.answer,
                    },
                }))
                .collect::<Vec<_>>(),
        })
    }

    pub fn medical_business(&self, details: &MedicalBusinessDetails) -> Value {
        let mut document = json!({
            "@context": "https://schema.org",
            "@type": "MedicalBusiness",
            "name": self.site.company_name,
            "description": details.description.as_deref().unwrap_or(
                "Secure, HIPAA-compliant telehealth platform for healthcare providers"
            ),
            "url": self.site.base_url,
            "telephone": self.site.phone,
            "email": self.site.support_email,
            "address": self.postal_address(),
            "medicalSpecialty": details.medical_specialty.as_deref().unwrap_or("Telemedicine"),
            "priceRange": "$$",
        });

        if let (Some(rating), Some(fields)) =
            (&details.aggregate_rating, document.as_object_mut())
        {
            fields.insert(
                "aggregateRating".to_string(),
                json!({
                    "@type": "AggregateRating",
                    "ratingValue": rating.rating_value,
                    "reviewCount": rating.review_count,
                }),
            );
        }

        document
    }

    pub fn organization(&self) -> Value {
        let contact_point = |contact_type: &str, email: &str| {
            json!({
                "@type": "ContactPoint",
                "telephone": self.site.phone,
                "contactType": contact_type,
                "email": email,
                "availableLanguage": ["English"],
            })
        };

        json!({
            "@context": "https://schema.org",
            "@type": "Organization",
            "name": self.site.company_name,
            "url": self.site.base_url,
            "logo": format!("{}/logo.png", self.site.base_url),
            "contactPoint": [
                contact_point("customer service", &self.site.support_email),
                contact_point("sales", &self.site.sales_email),
            ],
            "address": self.postal_address(),
        })
    }

    /// Positions start at 1.
    pub fn breadcrumb_list(&self, items: &[BreadcrumbItem]) -> Value {
        json!({
            "@context": "https://schema.org",
            "@type": "BreadcrumbList",
            "itemListElement": items
                .iter()
                .enumerate()
                .map(|(index, item)| json!({
                    "@type": "ListItem",
                    "position": index + 1,
                    "name": item.name,
                    "item": item.url,
                }))
                .collect::<Vec<_>>(),
        })
    }

    pub fn web_site(&self) -> Value {
        json!({
            "@context": "https://schema.org",
            "@type": "WebSite",
            "name": self.site.company_name,
            "url": self.site.base_url,
            "potentialAction": {
                "@type": "SearchAction",
                "target": {
                    "@type": "EntryPoint",
                    "urlTemplate": format!("{}/search?q={{search_term_string}}", self.site.base_url),
                },
                "query-input": "required name=search_term_string",
            },
        })
    }
}
