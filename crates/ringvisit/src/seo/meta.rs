use serde::Serialize;

pub const DEFAULT_TITLE: &str = "RingVisit - Modern Telehealth Solutions for Healthcare Providers";
pub const DEFAULT_DESCRIPTION: &str = "Transform your healthcare practice with RingVisit's secure, HIPAA-compliant telehealth platform. Improve patient outcomes and streamline virtual consultations.";
pub const DEFAULT_KEYWORDS: &str = "telehealth, telemedicine, virtual healthcare, healthcare technology, video consultation, patient care, medical software";

/// Site pages that carry their own head metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Contact,
    Partner,
    Privacy,
    Terms,
    Accessibility,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Contact,
        Page::Partner,
        Page::Privacy,
        Page::Terms,
        Page::Accessibility,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|page| page.slug().eq_ignore_ascii_case(slug.trim()))
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Contact => "contact",
            Page::Partner => "partner",
            Page::Privacy => "privacy",
            Page::Terms => "terms",
            Page::Accessibility => "accessibility",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Contact => "/contact",
            Page::Partner => "/partner",
            Page::Privacy => "/privacy",
            Page::Terms => "/terms",
            Page::Accessibility => "/accessibility",
        }
    }

    /// Breadcrumb label.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Contact => "Contact",
            Page::Partner => "Partner",
            Page::Privacy => "Privacy Policy",
            Page::Terms => "Terms and Conditions",
            Page::Accessibility => "Accessibility",
        }
    }

    pub fn meta(&self) -> PageMeta {
        match self {
            Page::Home => PageMeta::new(
                Some("RingVisit - AI-Powered Secure Healthcare Communication Platform"),
                Some("Connect hospital systems, payers, and patients in one secure AI-powered communication ring. Transform healthcare delivery with real-time data synchronization and zero-trust security."),
                Some("AI healthcare platform, hospital communication system, secure medical data exchange, telehealth, HIPAA compliant"),
            ),
            Page::Contact => PageMeta::new(
                Some("Contact RingVisit | Get Healthcare Technology Support"),
                Some("Get in touch with RingVisit for telehealth solutions. Our team is ready to help you transform your practice with modern virtual care technology."),
                Some("contact ringvisit, telehealth support, healthcare technology help, telemedicine consultation"),
            ),
            Page::Partner => PageMeta::new(
                Some("Partner With RingVisit | Reseller & Partnership Opportunities"),
                Some("Join the RingVisit partner network. Earn competitive commissions while helping healthcare providers deliver better patient care through telehealth technology."),
                Some("healthcare partnership, reseller program, affiliate opportunities, telehealth reseller, healthcare technology partner"),
            ),
            Page::Privacy => PageMeta::new(
                Some("Privacy Policy | RingVisit"),
                Some("Learn how RingVisit protects your privacy and handles your personal information. Our commitment to data security and HIPAA compliance."),
                Some("privacy policy, data protection, HIPAA compliance, healthcare privacy"),
            ),
            Page::Terms => PageMeta::new(
                Some("Terms and Conditions | RingVisit"),
                Some("Read RingVisit's terms and conditions for using our telehealth platform and services. Understand your rights and responsibilities."),
                Some("terms and conditions, terms of service, user agreement, legal terms"),
            ),
            Page::Accessibility => PageMeta::new(
                Some("Accessibility Statement | RingVisit"),
                Some("RingVisit's commitment to accessibility and inclusive design. Learn about our WCAG compliance and accessibility features."),
                Some("accessibility statement, WCAG compliance, website accessibility, inclusive design"),
            ),
        }
    }
}

/// Title, description, and keywords for a page's `<head>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

impl PageMeta {
    /// Missing or blank values fall back to the site-wide defaults.
    pub fn new(title: Option<&str>, description: Option<&str>, keywords: Option<&str>) -> Self {
        fn or_default(value: Option<&str>, default: &str) -> String {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
                .to_string()
        }

        Self {
            title: or_default(title, DEFAULT_TITLE),
            description: or_default(description, DEFAULT_DESCRIPTION),
            keywords: or_default(keywords, DEFAULT_KEYWORDS),
        }
    }

    pub fn head_tags(&self) -> Vec<HeadTag> {
        vec![
            HeadTag::Title(self.title.clone()),
            HeadTag::Name("description", self.description.clone()),
            HeadTag::Name("keywords", self.keywords.clone()),
            HeadTag::Property("og:title", self.title.clone()),
            HeadTag::Property("og:description", self.description.clone()),
            HeadTag::Property("og:type", "website".to_string()),
            HeadTag::Name("twitter:card", "summary_large_image".to_string()),
            HeadTag::Name("twitter:title", self.title.clone()),
            HeadTag::Name("twitter:description", self.description.clone()),
        ]
    }

    pub fn render_head(&self) -> String {
        self.head_tags()
            .iter()
            .map(HeadTag::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for PageMeta {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadTag {
    Title(String),
    /// `<meta name=.. content=..>`
    Name(&'static str, String),
    /// `<meta property=.. content=..>`
    Property(&'static str, String),
}

impl HeadTag {
    pub fn to_html(&self) -> String {
        match self {
            HeadTag::Title(text) => format!("<title>{}</title>", escape_html(text)),
            HeadTag::Name(name, content) => format!(
                r#"<meta name="{}" content="{}" />"#,
                name,
                escape_html(content)
            ),
            HeadTag::Property(property, content) => format!(
                r#"<meta property="{}" content="{}" />"#,
                property,
                escape_html(content)
            ),
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let meta = PageMeta::new(Some("  "), None, Some("custom"));
        assert_eq!(meta.title, DEFAULT_TITLE);
        assert_eq!(meta.description, DEFAULT_DESCRIPTION);
        assert_eq!(meta.keywords, "custom");
    }

    #[test]
    fn renders_social_tags_with_escaping() {
        let head = Page::Partner.meta().render_head();
        assert!(head.starts_with(
            "<title>Partner With RingVisit | Reseller &amp; Partnership Opportunities</title>"
        ));
        assert!(head.contains(r#"<meta property="og:type" content="website" />"#));
        assert!(head.contains(r#"<meta name="twitter:card" content="summary_large_image" />"#));
        assert_eq!(Page::Partner.meta().head_tags().len(), 9);
    }

    #[test]
    fn slugs_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Page::from_slug("Contact"), Some(Page::Contact));
        assert_eq!(Page::from_slug("pricing"), None);
    }
}
