//! Server-side HTML rendering. Every dynamic value goes through [`escape`].

pub mod deliveries;
pub mod drivers;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};

use crate::api::flash::Flash;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn layout(title: &str, flashes: &[Flash], body: &str) -> String {
    let flashes: String = flashes
        .iter()
        .map(|flash| {
            format!(
                r#"<div class="flash flash-{}">{}</div>"#,
                flash.level.as_str(),
                escape(&flash.message)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} · Delivery Tracker</title>
<link rel="stylesheet" href="/style.css">
</head>
<body>
<nav><a href="/">Dashboard</a> <a href="/deliveries/new">New delivery</a> <a href="/drivers">Drivers</a></nav>
<main>
<h1>{title}</h1>
{flashes}
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(
        title,
        &[],
        &format!(
            r#"<p>{}</p><p><a href="/">Back to dashboard</a></p>"#,
            escape(message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::flash::Level;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn layout_renders_flashes_by_level() {
        let page = layout(
            "Drivers",
            &[Flash {
                level: Level::Error,
                message: "Driver name is required.".to_string(),
            }],
            "",
        );
        assert!(page.contains(r#"<div class="flash flash-error">Driver name is required.</div>"#));
        assert!(page.contains("<h1>Drivers</h1>"));
    }
}
