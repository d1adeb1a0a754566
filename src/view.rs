//! HTML view for the lookup page.
//!
//! One page: flash messages, the form, and (after a successful lookup) a
//! table with the nine result fields. All dynamic text is escaped.

use std::fmt::Write as _;

use crate::domain::QueryResult;

/// Labels shown for each entry of [`QueryResult::fields`], same order.
const FIELD_LABELS: [&str; 9] = [
    "Código de barras",
    "Fuero",
    "Juzgado",
    "Zona",
    "Fecha de ingreso",
    "Fecha de asignación a zona",
    "Fecha de devolución",
    "Resultado de la diligencia",
    "Fecha de disposición del juzgado",
];

/// Severity of a flash message, used as its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashCategory {
    /// Something went wrong with the request.
    Error,
}

impl FlashCategory {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
        }
    }
}

/// A one-shot message rendered at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    /// Message severity.
    pub category: FlashCategory,
    /// Text shown to the user.
    pub message: String,
}

impl Flash {
    /// Creates an error flash.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Error,
            message: message.into(),
        }
    }
}

/// View model of the lookup page.
#[derive(Debug, Clone, Default)]
pub struct IndexPage {
    /// Value echoed back into the input.
    pub codigo: String,
    /// Messages queued while handling the request.
    pub flashes: Vec<Flash>,
    /// Lookup result, if the request produced one.
    pub result: Option<QueryResult>,
}

impl IndexPage {
    /// Renders the full HTML document.
    #[must_use]
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(2048);
        html.push_str(concat!(
            "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>Consulta de cédulas</title>\n",
            "<style>",
            "body{font-family:sans-serif;max-width:40rem;margin:2rem auto;padding:0 1rem}",
            ".flash{padding:.5rem 1rem;border-radius:4px}",
            ".flash.error{background:#fde2e1;color:#8a1c1c}",
            "table{border-collapse:collapse;width:100%}",
            "th,td{text-align:left;border-bottom:1px solid #ddd;padding:.4rem}",
            "</style>\n</head>\n<body>\n<h1>Consulta de cédulas</h1>\n",
        ));

        for flash in &self.flashes {
            let _ = writeln!(
                html,
                "<p class=\"flash {}\">{}</p>",
                flash.category.as_str(),
                escape_html(&flash.message)
            );
        }

        let _ = writeln!(
            html,
            concat!(
                "<form method=\"post\" action=\"/\">\n",
                "<label for=\"codigo\">Código de barras</label>\n",
                "<input id=\"codigo\" name=\"codigo\" type=\"text\" value=\"{}\" autofocus>\n",
                "<button type=\"submit\">Consultar</button>\n",
                "</form>"
            ),
            escape_html(&self.codigo)
        );

        if let Some(result) = &self.result {
            html.push_str("<table id=\"resultado\">\n");
            for (label, (name, value)) in FIELD_LABELS.iter().zip(result.fields()) {
                let _ = writeln!(
                    html,
                    "<tr><th>{label}</th><td data-field=\"{name}\">{}</td></tr>",
                    escape_html(value.unwrap_or_default())
                );
            }
            html.push_str("</table>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn escape_html(raw: &str) -> String {
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
