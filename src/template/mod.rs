//! HTML email templating.
//!
//! Two fixed shells wrap a pre-escaped content fragment into a complete,
//! self-contained HTML document (inline styles only, no remote assets) so
//! the result renders in any mail client. This is plain string
//! interpolation; a real templating engine is deliberately out of scope.

use serde::{Deserialize, Serialize};

/// Visual shell selector for rendered emails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Neutral branding
    #[default]
    Default,
    /// Alert styling with a link to the admin console
    Admin,
}

impl TemplateKind {
    /// Parse a wire value. Unknown strings fall back to `Default`,
    /// never an error.
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => TemplateKind::Admin,
            _ => TemplateKind::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Default => "default",
            TemplateKind::Admin => "admin",
        }
    }
}

/// Replace the characters `& < > " '` with their entity forms.
///
/// Every field sourced from an external submitter must pass through here
/// before being interpolated into a fragment.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders content fragments into complete HTML documents.
///
/// Pure per call: the same fragment and kind always produce the same
/// document. The admin console URL is fixed at construction.
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    console_url: String,
}

impl TemplateEngine {
    pub fn new(console_url: impl Into<String>) -> Self {
        Self {
            console_url: console_url.into(),
        }
    }

    /// Wrap a trusted, already-escaped fragment in the shell selected by
    /// `kind`.
    pub fn render(&self, fragment: &str, kind: TemplateKind) -> String {
        match kind {
            TemplateKind::Default => default_shell(fragment),
            TemplateKind::Admin => admin_shell(fragment, &self.console_url),
        }
    }
}

fn default_shell(fragment: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="margin: 0; padding: 0; background: #f9fafb; font-family: Arial, Helvetica, sans-serif; color: #1f2937;">
  <div style="max-width: 600px; margin: 0 auto; padding: 24px;">
    <div style="background: #ffffff; border-radius: 8px; border: 1px solid #e5e7eb; overflow: hidden;">
      <div style="background: #2563eb; padding: 16px 24px;">
        <span style="color: #ffffff; font-size: 18px; font-weight: bold;">Wavelink</span>
      </div>
      <div style="padding: 24px; font-size: 14px; line-height: 1.6;">
        {fragment}
      </div>
    </div>
    <p style="text-align: center; color: #9ca3af; font-size: 12px; margin-top: 16px;">
      This is an automated message from Wavelink.
    </p>
  </div>
</body>
</html>"#
    )
}

fn admin_shell(fragment: &str, console_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="margin: 0; padding: 0; background: #f9fafb; font-family: Arial, Helvetica, sans-serif; color: #1f2937;">
  <div style="max-width: 600px; margin: 0 auto; padding: 24px;">
    <div style="background: #ffffff; border-radius: 8px; border: 1px solid #e5e7eb; border-top: 4px solid #dc2626; overflow: hidden;">
      <div style="padding: 16px 24px; border-bottom: 1px solid #e5e7eb;">
        <span style="color: #dc2626; font-size: 18px; font-weight: bold;">Wavelink Admin Alert</span>
      </div>
      <div style="padding: 24px; font-size: 14px; line-height: 1.6;">
        {fragment}
      </div>
      <div style="padding: 0 24px 24px 24px;">
        <a href="{console_url}" style="display: inline-block; background: #dc2626; color: #ffffff; padding: 10px 20px; border-radius: 6px; text-decoration: none; font-size: 14px;">Open Admin Console</a>
      </div>
    </div>
    <p style="text-align: center; color: #9ca3af; font-size: 12px; margin-top: 16px;">
      You are receiving this because you administer the Wavelink site.
    </p>
  </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TemplateEngine {
        TemplateEngine::new("https://admin.example.com")
    }

    #[test]
    fn test_escape_html_all_special_chars() {
        assert_eq!(
            escape_html(r#"&<>"'"#),
            "&amp;&lt;&gt;&quot;&#039;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_escape_html_script_tag() {
        let escaped = escape_html("<script>alert('x')</script>");
        assert!(escaped.contains("&lt;script&gt;"));
        assert!(!escaped.contains("<script>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let engine = engine();
        let a = engine.render("<p>hello</p>", TemplateKind::Default);
        let b = engine.render("<p>hello</p>", TemplateKind::Default);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_default() {
        let engine = engine();
        assert_eq!(TemplateKind::parse("fancy-new-kind"), TemplateKind::Default);
        assert_eq!(
            engine.render("<p>x</p>", TemplateKind::parse("fancy-new-kind")),
            engine.render("<p>x</p>", TemplateKind::Default)
        );
    }

    #[test]
    fn test_render_produces_complete_document() {
        let doc = engine().render("<p>body</p>", TemplateKind::Default);
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<p>body</p>"));
        assert!(doc.contains("</html>"));
        // Self-contained: the neutral shell references no external resources
        assert!(!doc.contains("src="));
        assert!(!doc.contains("href="));
    }

    #[test]
    fn test_admin_shell_links_console() {
        let doc = engine().render("<p>alert</p>", TemplateKind::Admin);
        assert!(doc.contains("https://admin.example.com"));
        assert!(doc.contains("Open Admin Console"));

        let default_doc = engine().render("<p>alert</p>", TemplateKind::Default);
        assert!(!default_doc.contains("Open Admin Console"));
    }

    #[test]
    fn test_kind_parse_known_values() {
        assert_eq!(TemplateKind::parse("admin"), TemplateKind::Admin);
        assert_eq!(TemplateKind::parse("default"), TemplateKind::Default);
        assert_eq!(TemplateKind::Admin.as_str(), "admin");
    }
}
