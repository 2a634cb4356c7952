//! Recovery message rendering
//!
//! Builds the subject, plain text and HTML bodies of the recovery email. The
//! HTML body is a table-based, inline-styled layout (see
//! `templates/emails/password_recovery.html`) so it survives mail clients
//! without CSS support.

use askama::Template;

use crate::email::{EmailError, EmailTemplate, SimpleEmailTemplate};

/// Brand label shown in the email header
pub const BRAND_LABEL: &str = "MCE Onboarding";

/// Fixed subject line
pub const SUBJECT: &str = "Recuperação de senha MCE Onboarding";

/// Zero-width space entity inserted before periods
pub const ZERO_WIDTH_SPACE: &str = "&#8203;";

/// Inputs of a single recovery message
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
    /// Callback link the button points at
    pub url: &'a str,

    /// Display label of the requesting site (scheme stripped)
    pub site: &'a str,

    /// Recipient address, shown in the HTML body
    pub email: &'a str,
}

/// A fully rendered recovery message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// Subject line
    pub subject: String,

    /// Plain text fallback body
    pub text_body: String,

    /// HTML body
    pub html_body: String,
}

/// Insert a zero-width space before every `.`
///
/// Mail clients such as Outlook and Apple Mail turn addresses and domains
/// into hyperlinks; breaking them up keeps the displayed address from looking
/// like the thing to click.
///
/// ```rust
/// use mce_recovery::recovery::guard_autolinks;
///
/// assert_eq!(guard_autolinks("a.b@c.com"), "a&#8203;.b@c&#8203;.com");
/// assert_eq!(guard_autolinks(""), "");
/// ```
#[must_use]
pub fn guard_autolinks(text: &str) -> String {
    text.replace('.', &format!("{ZERO_WIDTH_SPACE}."))
}

mod filters {
    #[allow(clippy::unnecessary_wraps, clippy::needless_pass_by_value)]
    pub fn autolink_guard<T: std::fmt::Display>(value: T) -> askama::Result<String> {
        Ok(super::guard_autolinks(&value.to_string()))
    }
}

#[derive(Template)]
#[template(path = "emails/password_recovery.html")]
struct PasswordRecoveryEmail<'a> {
    url: &'a str,
    site: &'a str,
    email: &'a str,
    brand: &'a str,
}

impl SimpleEmailTemplate for PasswordRecoveryEmail<'_> {
    fn render_text(&self) -> Result<Option<String>, EmailError> {
        Ok(Some(format!(
            "Recuperação de senha para a plataforma MCE {}\n{}\n\n",
            self.site, self.url
        )))
    }
}

/// Render the recovery message
///
/// Pure and deterministic for identical inputs. The result embeds the
/// one-time callback link and must not be cached across sends.
///
/// # Errors
///
/// Returns `EmailError::TemplateError` if the HTML template fails to render
pub fn render_message(context: MessageContext<'_>) -> Result<RenderedMessage, EmailError> {
    let template = PasswordRecoveryEmail {
        url: context.url,
        site: context.site,
        email: context.email,
        brand: BRAND_LABEL,
    };

    let (html, text) = template.render_email()?;

    Ok(RenderedMessage {
        subject: SUBJECT.to_string(),
        text_body: text.unwrap_or_default(),
        html_body: html.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const URL: &str =
        "https://mce.example.com/recovery/callback?email=jane.doe@example.com&token=abc123";

    fn render(email: &str) -> RenderedMessage {
        render_message(MessageContext {
            url: URL,
            site: "portal.example.com",
            email,
        })
        .unwrap()
    }

    #[test]
    fn test_subject_is_fixed() {
        assert_eq!(render("jane.doe@example.com").subject, SUBJECT);
    }

    #[test]
    fn test_text_body() {
        assert_eq!(
            render("jane.doe@example.com").text_body,
            format!("Recuperação de senha para a plataforma MCE portal.example.com\n{URL}\n\n")
        );
    }

    #[test]
    fn test_html_escapes_periods_in_address() {
        let html = render("jane.doe@example.com").html_body;

        assert!(html.contains("<strong>jane&#8203;.doe@example&#8203;.com</strong>"));
        assert!(!html.contains("jane.doe@example.com</strong>"));
    }

    #[test]
    fn test_html_links_to_callback() {
        let html = render("jane.doe@example.com").html_body;

        assert!(html.contains(
            "href=\"https://mce.example.com/recovery/callback?email=jane.doe@example.com&amp;token=abc123\""
        ));
    }

    #[test]
    fn test_html_link_attribute_is_escaped() {
        let url = "https://mce.example.com/recovery/callback?email=x\"><img src=q onerror=alert(1)>@e.com&token=T";
        let html = render_message(MessageContext {
            url,
            site: "portal.example.com",
            email: "x\"><img src=q onerror=alert(1)>@e.com",
        })
        .unwrap()
        .html_body;

        assert!(!html.contains("<img"));
        assert!(html.contains(
            "href=\"https://mce.example.com/recovery/callback?email=x&quot;&gt;&lt;img src=q onerror=alert(1)&gt;@e.com&amp;token=T\""
        ));
    }

    #[test]
    fn test_html_brand_label() {
        let html = render("jane@example").html_body;

        assert!(html.contains(&format!("<strong>{}</strong>", guard_autolinks(BRAND_LABEL))));
    }

    #[test]
    fn test_address_without_periods_is_unchanged() {
        let html = render("jane@localhost").html_body;

        assert!(html.contains("<strong>jane@localhost</strong>"));
    }

    #[test]
    fn test_empty_address_renders() {
        let html = render("").html_body;

        assert!(html.contains("Recuperar senha de <strong></strong>"));
    }

    #[test]
    fn test_markup_in_address_is_escaped() {
        let html = render("<b>@example").html_body;

        assert!(!html.contains("<b>@example"));
        assert!(html.contains("&lt;b&gt;@example"));
    }

    #[test]
    fn test_guard_autolinks() {
        assert_eq!(guard_autolinks("a.b.c"), "a&#8203;.b&#8203;.c");
        assert_eq!(guard_autolinks("no-periods"), "no-periods");
    }

    proptest! {
        #[test]
        fn prop_every_period_is_guarded(email in "[a-z]{1,8}(\\.[a-z]{1,8}){0,3}@[a-z]{1,8}(\\.[a-z]{2,4}){1,2}") {
            let html = render(&email).html_body;
            let guarded = guard_autolinks(&email);

            let needle = format!("<strong>{guarded}</strong>");
            let guard = format!("{ZERO_WIDTH_SPACE}.");

            prop_assert!(html.contains(&needle));
            prop_assert_eq!(
                guarded.matches(&guard).count(),
                email.matches('.').count()
            );
        }
    }
}
