//! Server-rendered HTML.
//!
//! Pages are plain functions from data to an HTML string wrapped in the
//! shared layout. Anything user-supplied goes through [`escape`] before it is
//! written into markup.

mod pages;

pub use pages::{
    about_page, contact_detail_page, contact_form_page, contact_list_page, home_page,
    not_found_page, server_error_page, ContactFormValues, FormMode,
};

use std::fmt::Write;

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css";

/// Escape text for use in HTML element content or a quoted attribute.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// Path of the detail page for the contact called `name`.
pub fn contact_path(name: &str) -> String {
    format!("/contact/{}", urlencoding::encode(name))
}

/// Path of the edit form for the contact called `name`.
pub fn edit_contact_path(name: &str) -> String {
    format!("/contact/edit/{}", urlencoding::encode(name))
}

/// Wrap page content in the shared layout.
pub(crate) fn layout(title: &str, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="stylesheet" href="{css}">
<title>{title}</title>
</head>
<body>
<nav class="navbar navbar-expand-lg navbar-dark bg-dark">
<div class="container">
<a class="navbar-brand" href="/">Contact App</a>
<div class="navbar-nav">
<a class="nav-item nav-link" href="/">Home</a>
<a class="nav-item nav-link" href="/about">About</a>
<a class="nav-item nav-link" href="/contact">Contact</a>
</div>
</div>
</nav>
<main class="container mt-4">
{body}
</main>
</body>
</html>
"#,
        css = BOOTSTRAP_CSS,
        title = escape(title),
        body = body,
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#x27;y&#x27;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("Hyewon"), "Hyewon");
    }

    #[test]
    fn test_contact_paths_are_encoded() {
        assert_eq!(contact_path("Hyewon"), "/contact/Hyewon");
        assert_eq!(contact_path("Kim Hyewon"), "/contact/Kim%20Hyewon");
        assert_eq!(edit_contact_path("a/b"), "/contact/edit/a%2Fb");
    }

    #[test]
    fn test_layout_escapes_title() {
        let html = layout("<Title>", "<p>body</p>");
        assert!(html.contains("<title>&lt;Title&gt;</title>"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains(r#"href="/contact""#));
    }
}
