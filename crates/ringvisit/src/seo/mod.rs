//! Page head metadata and schema.org structured data for the marketing pages.

pub mod meta;
pub mod router;
pub mod schema_org;

use serde::Serialize;
use serde_json::Value;

use crate::config::SiteConfig;

pub use meta::{HeadTag, Page, PageMeta};
pub use router::seo_router;
pub use schema_org::{
    AggregateRating, BreadcrumbItem, FaqItem, MedicalBusinessDetails, StructuredData,
};

/// Questions answered on the contact page.
pub fn contact_faqs() -> Vec<FaqItem> {
    [
        (
            "How quickly can I get started with RingVisit?",
            "Most practices are up and running within 3-5 business days after the initial consultation.",
        ),
        (
            "Is RingVisit HIPAA compliant?",
            "Yes, RingVisit is fully HIPAA compliant with enterprise-grade encryption and security measures.",
        ),
        (
            "Do you offer training and support?",
            "Absolutely! We provide comprehensive onboarding, training, and 24/7 technical support.",
        ),
        (
            "Can RingVisit integrate with my existing systems?",
            "Yes, RingVisit integrates with most major EHR/EMR systems. Contact us to discuss your specific needs.",
        ),
    ]
    .into_iter()
    .map(|(question, answer)| FaqItem {
        question: question.to_string(),
        answer: answer.to_string(),
    })
    .collect()
}

/// Everything a page needs in its `<head>`.
#[derive(Debug, Clone, Serialize)]
pub struct PageBundle {
    pub page: Page,
    pub meta: PageMeta,
    pub head: String,
    pub schemas: Vec<Value>,
}

/// Assembles page bundles from the site configuration.
#[derive(Debug, Clone)]
pub struct SeoCatalog {
    structured: StructuredData,
}

impl SeoCatalog {
    pub fn new(site: SiteConfig) -> Self {
        Self {
            structured: StructuredData::new(site),
        }
    }

    pub fn structured(&self) -> &StructuredData {
        &self.structured
    }

    fn page_url(&self, page: Page) -> String {
        format!("{}{}", self.structured.site().base_url, page.path())
    }

    pub fn breadcrumbs(&self, page: Page) -> Vec<BreadcrumbItem> {
        let mut items = vec![BreadcrumbItem {
            name: Page::Home.label().to_string(),
            url: self.page_url(Page::Home),
        }];
        if page != Page::Home {
            items.push(BreadcrumbItem {
                name: page.label().to_string(),
                url: self.page_url(page),
            });
        }
        items
    }

    pub fn bundle(&self, page: Page) -> PageBundle {
        let meta = page.meta();
        let schemas = match page {
            Page::Home => vec![
                self.structured.organization(),
                self.structured.web_site(),
                self.structured
                    .medical_business(&MedicalBusinessDetails::default()),
            ],
            Page::Contact => vec![
                self.structured.faq_page(&contact_faqs()),
                self.structured.breadcrumb_list(&self.breadcrumbs(page)),
            ],
            Page::Partner | Page::Privacy | Page::Terms | Page::Accessibility => {
                vec![self.structured.breadcrumb_list(&self.breadcrumbs(page))]
            }
        };

        PageBundle {
            page,
            head: meta.render_head(),
            meta,
            schemas,
        }
    }
}
