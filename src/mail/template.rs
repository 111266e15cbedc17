//! HTML body of the contact notification.

use crate::locale::Locale;
use crate::models::ContactRequest;

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the notification for one submission.
pub fn render_contact_html(contact: &ContactRequest, locale: Locale) -> String {
    let labels = locale.template_labels();
    let name = escape_html(&contact.name);
    let email = escape_html(&contact.email);
    let message = escape_html(&contact.message);

    format!(
        r#"<html>
    <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
        <div style="max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #ddd; border-radius: 5px;">
            <h2 style="color: #0ea5e9; border-bottom: 2px solid #0ea5e9; padding-bottom: 10px;">
                {heading}
            </h2>
            <div style="margin: 20px 0;">
                <p><strong>{from_label}:</strong> {name}</p>
                <p><strong>{email_label}:</strong> <a href="mailto:{email}">{email}</a></p>
            </div>
            <div style="background-color: #f5f5f5; padding: 15px; border-radius: 5px; margin: 20px 0;">
                <p style="margin: 0;"><strong>{message_label}:</strong></p>
                <p style="white-space: pre-wrap; margin: 10px 0 0 0;">{message}</p>
            </div>
            <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; color: #666;">
                <p>{footer}</p>
            </div>
        </div>
    </body>
</html>
"#,
        heading = labels.heading,
        from_label = labels.from,
        email_label = labels.email,
        message_label = labels.message,
        footer = labels.footer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: "jane@example.com".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b a="1">&'"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;&#x27;"
        );
    }

    #[test]
    fn renders_sender_and_message() {
        let html = render_contact_html(&contact("Jane", "Hello\nthere"), Locale::Fr);

        assert!(html.contains("Nouveau message depuis votre portfolio"));
        assert!(html.contains("<strong>De:</strong> Jane"));
        assert!(html.contains(r#"href="mailto:jane@example.com""#));
        assert!(html.contains("Hello\nthere"));
    }

    #[test]
    fn user_text_cannot_inject_markup() {
        let html = render_contact_html(&contact("<script>", "<img src=x>"), Locale::En);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;img src=x&gt;"));
        assert!(html.contains("New message from your portfolio"));
    }
}
