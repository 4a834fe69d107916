//! Server-rendered widget page.

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use tracing::warn;

use super::WebState;

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Crypto Price Assistant</title>
  <style>
    body { font-family: system-ui, -apple-system, sans-serif; max-width: 44rem; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
    h1 { font-size: 1.8rem; }
    .note { color: #52606d; }
    form { display: flex; flex-direction: column; gap: 0.6rem; margin: 1.5rem 0; }
    input[type=text] { padding: 0.6rem; font-size: 1rem; border: 1px solid #cbd2d9; border-radius: 6px; }
    button { align-self: flex-start; padding: 0.5rem 1.2rem; border: none; border-radius: 6px; background: #3e4c59; color: #fff; font-size: 1rem; cursor: pointer; }
    .banner { padding: 0.6rem 0.9rem; border-radius: 6px; margin-bottom: 0.8rem; }
    .success { background: #e3f9e5; color: #05400a; }
    .error { background: #ffe3e3; color: #610404; }
    .symbol { font-size: 0.85rem; color: #52606d; }
    .answer { white-space: pre-wrap; }
  </style>
</head>
<body>
  <h1>&#x1FA99; Crypto Price Assistant</h1>
  <p>Ask any question about crypto prices or market.</p>
  <p class="note"><strong>Note:</strong> Please use coin symbols like <code>BTCUSDT</code>, <code>ETHUSDT</code>, or <code>SOLUSDT</code> instead of coin names like 'bitcoin', 'ethereum', or 'solana'.</p>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// What to show under the form.
pub(super) enum Outcome {
    Answer {
        text: String,
        symbol: Option<&'static str>,
    },
    Failure(String),
}

#[derive(Deserialize)]
pub(super) struct AskForm {
    #[serde(default)]
    query: String,
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub(super) fn render_page(query: &str, outcome: Option<&Outcome>) -> String {
    let mut page = String::from(PAGE_HEAD);
    page.push_str(&format!(
        concat!(
            "  <form method=\"post\" action=\"/\">\n",
            "    <label for=\"query\">Enter your crypto-related query:</label>\n",
            "    <input type=\"text\" id=\"query\" name=\"query\" value=\"{}\" autofocus />\n",
            "    <button type=\"submit\">Get Answer</button>\n",
            "  </form>\n"
        ),
        escape_html(query)
    ));

    match outcome {
        Some(Outcome::Answer { text, symbol }) => {
            page.push_str("  <div class=\"banner success\">&#x2705; Answer:</div>\n");
            if let Some(symbol) = symbol {
                page.push_str(&format!(
                    "  <p class=\"symbol\">Detected symbol: <code>{symbol}</code></p>\n"
                ));
            }
            page.push_str(&format!("  <div class=\"answer\">{}</div>\n", escape_html(text)));
        }
        Some(Outcome::Failure(msg)) => {
            page.push_str(&format!(
                "  <div class=\"banner error\">{}</div>\n",
                escape_html(msg)
            ));
        }
        None => {}
    }

    page.push_str(PAGE_TAIL);
    page
}

/// GET /
pub(super) async fn index() -> Html<String> {
    Html(render_page("", None))
}

/// POST / — run the agent for a submitted query. Blank queries are ignored.
pub(super) async fn submit(State(state): State<WebState>, Form(form): Form<AskForm>) -> Html<String> {
    if form.query.trim().is_empty() {
        return Html(render_page(&form.query, None));
    }

    let outcome = match state.agent.run(&form.query).await {
        Ok(answer) => Outcome::Answer {
            text: answer.text,
            symbol: answer.detected_symbol,
        },
        Err(e) => {
            warn!(error = %e, "agent run failed");
            Outcome::Failure(format!("Something went wrong: {e}"))
        }
    };

    Html(render_page(&form.query, Some(&outcome)))
}
