//! Email template traits for Askama integration
//!
//! Renders an email body pair: HTML from an Askama template, plain text from
//! an optional override.

use super::EmailError;

/// Trait for email templates
///
/// Returns a tuple of `(html, text)` where either can be `None`.
pub trait EmailTemplate {
    /// Render the email template
    ///
    /// # Errors
    ///
    /// Returns `EmailError::TemplateError` if the template fails to render
    fn render_email(&self) -> Result<(Option<String>, Option<String>), EmailError>;
}

/// Helper trait for Askama templates that carry the HTML body
///
/// The plain text body defaults to `None`; override [`render_text`] to
/// provide one.
///
/// [`render_text`]: SimpleEmailTemplate::render_text
pub trait SimpleEmailTemplate: askama::Template {
    /// Render the template as HTML
    ///
    /// # Errors
    ///
    /// Returns `EmailError::TemplateError` if the template fails to render
    fn render_html(&self) -> Result<String, EmailError> {
        Ok(self.render()?)
    }

    /// Render a plain text version
    ///
    /// # Errors
    ///
    /// Returns `EmailError::TemplateError` if the template fails to render
    fn render_text(&self) -> Result<Option<String>, EmailError> {
        Ok(None)
    }
}

impl<T: SimpleEmailTemplate> EmailTemplate for T {
    fn render_email(&self) -> Result<(Option<String>, Option<String>), EmailError> {
        let html = Some(self.render_html()?);
        let text = self.render_text()?;
        Ok((html, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askama::Template;

    #[derive(Template)]
    #[template(source = "<strong>{{ label }}</strong>", ext = "html")]
    struct LabelTemplate {
        label: String,
    }

    impl SimpleEmailTemplate for LabelTemplate {}

    #[test]
    fn test_html_only_template() {
        let template = LabelTemplate {
            label: "MCE".to_string(),
        };

        let (html, text) = template.render_email().unwrap();

        assert_eq!(html.as_deref(), Some("<strong>MCE</strong>"));
        assert!(text.is_none());
    }

    #[derive(Template)]
    #[template(source = "<a href=\"{{ url }}\">go</a>", ext = "html")]
    struct LinkTemplate {
        url: String,
    }

    impl SimpleEmailTemplate for LinkTemplate {
        fn render_text(&self) -> Result<Option<String>, EmailError> {
            Ok(Some(format!("go: {}", self.url)))
        }
    }

    #[test]
    fn test_template_with_text_override() {
        let template = LinkTemplate {
            url: "https://mce.example.com".to_string(),
        };

        let (html, text) = template.render_email().unwrap();

        assert!(html.is_some());
        assert_eq!(text.as_deref(), Some("go: https://mce.example.com"));
    }
}
