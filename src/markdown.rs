//! Problem Statement Renderer
//!
//! pulldown-cmark with:
//! - Syntax highlighting for fenced code (syntect)
//! - `$...$` / `$$...$$` passed through untouched for KaTeX
//! - Raw HTML shown as text, never injected

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme() -> Option<&'static Theme> {
    THEME_SET.get_or_init(ThemeSet::load_defaults).themes.get("InspiredGitHub")
}

/// Render a statement to HTML
pub fn render_statement(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;
    // The parser may split one run of text into several events
    let mut text_run = String::new();

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Text(text) => text_run.push_str(&text),
                Event::Html(raw) | Event::InlineHtml(raw) => text_run.push_str(&raw),
                other => {
                    flush_text(&mut text_run, &mut events);
                    if let Event::Start(Tag::CodeBlock(kind)) = other {
                        let lang = match kind {
                            CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                            _ => None,
                        };
                        state = State::InCodeBlock { lang, content: String::new() };
                    } else {
                        events.push(other);
                    }
                }
            },
            State::InCodeBlock { ref lang, ref mut content } => match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::Normal;
                }
                _ => {}
            },
        }
    }
    flush_text(&mut text_run, &mut events);

    events
}

fn flush_text(text_run: &mut String, events: &mut Vec<Event<'_>>) {
    if text_run.is_empty() {
        return;
    }
    let text = std::mem::take(text_run);
    if text.contains('$') {
        events.extend(process_math(&text));
    } else {
        events.push(Event::Text(CowStr::from(text)));
    }
}

fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let ss = get_syntax_set();
    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    get_theme()
        .and_then(|theme| highlighted_html_for_string(code, ss, syntax, theme).ok())
        .unwrap_or_else(|| format!("<pre><code>{}</code></pre>", escape_html(code)))
}

/// Split text into plain runs and math runs. Math is emitted as escaped HTML
/// so the delimiters survive for KaTeX; an unmatched `$` stays literal.
fn process_math(text: &str) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let mut remaining = text;

    while let Some(pos) = remaining.find('$') {
        let delim = if remaining[pos..].starts_with("$$") { "$$" } else { "$" };
        let after = &remaining[pos + delim.len()..];
        let Some(end) = after.find(delim) else {
            break;
        };
        if pos > 0 {
            events.push(Event::Text(CowStr::from(remaining[..pos].to_string())));
        }
        let body = escape_html(&after[..end]);
        events.push(Event::Html(CowStr::from(format!("{delim}{body}{delim}"))));
        remaining = &after[end + delim.len()..];
    }

    if !remaining.is_empty() {
        events.push(Event::Text(CowStr::from(remaining.to_string())));
    }
    events
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Ask KaTeX auto-render (loaded by index.html) to typeset math under `selector`
pub fn trigger_math_render(selector: &str) {
    use leptos::task::spawn_local;
    let selector = selector.to_string();

    spawn_local(async move {
        let js_code = format!(
            r#"
            (function() {{
                var attempts = 0;
                function tryRender() {{
                    var el = document.querySelector('{}');
                    if (window.renderMathInElement && el) {{
                        window.renderMathInElement(el, {{
                            delimiters: [
                                {{left: '$$', right: '$$', display: true}},
                                {{left: '$', right: '$', display: false}}
                            ],
                            throwOnError: false
                        }});
                    }} else if (++attempts < 25) {{
                        setTimeout(tryRender, 200);
                    }}
                }}
                tryRender();
            }})();
        "#,
            selector
        );

        let _ = js_sys::eval(&js_code);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_statement("# Two Sum\n\nGiven an array **nums**.");
        assert!(html.contains("<h1>Two Sum</h1>"));
        assert!(html.contains("<strong>nums</strong>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_statement("<script>alert(1)</script>\n\nhi <b>there</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_math_passes_through() {
        let html = render_statement("Bounds: $1 \\le n < 10^5$ and $$x$$ but $5 alone");
        assert!(html.contains("$1 \\le n &lt; 10^5$"));
        assert!(html.contains("$$x$$"));
        assert!(html.contains("$5 alone"));
    }

    #[test]
    fn test_code_block_is_highlighted() {
        let html = render_statement("```cpp\nint main() { return 0; }\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
    }
}
