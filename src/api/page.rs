//! Server-rendered recommender page

use std::fmt::Write;

use crate::models::RecommendationResult;

/// What to show below the selector
pub enum PageOutcome<'a> {
    /// Nothing requested yet
    Empty,
    Results(&'a [RecommendationResult]),
    /// User-visible failure, e.g. an unknown title
    Message(&'a str),
}

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem}\
form{display:flex;flex-direction:column;gap:.75rem}\
button{padding:.6rem;font-size:1rem;cursor:pointer}\
.results{display:flex;gap:1rem}\
.card{flex:1;min-width:0;text-align:center}\
.card img{width:100%;border-radius:6px}\
.placeholder{padding:3rem 0;background:#eee;border-radius:6px}\
.caption{font-size:.85rem;color:#555;margin-top:.4rem}\
.error{color:#b00020}";

/// Escapes text for use inside HTML content and double-quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Renders the full page: selector, trigger button and result cards
pub fn render_page<'t>(
    titles: impl Iterator<Item = &'t str>,
    selected: Option<&str>,
    outcome: PageOutcome<'_>,
) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Movie Recommender</title>\n");
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n");
    html.push_str("<h1>🎬 Movie Recommender System</h1>\n");
    html.push_str(
        "<p>Discover movies similar to your favorites using <strong>machine learning</strong>.</p>\n<hr>\n",
    );

    html.push_str("<form method=\"get\" action=\"/\">\n");
    html.push_str("<label for=\"movie\">🎥 Select a movie</label>\n");
    html.push_str("<select id=\"movie\" name=\"movie\">\n");
    for title in titles {
        let escaped = escape_html(title);
        let marker = if selected == Some(title) { " selected" } else { "" };
        let _ = writeln!(html, "<option value=\"{}\"{}>{}</option>", escaped, marker, escaped);
    }
    html.push_str("</select>\n");
    html.push_str("<button type=\"submit\">🎯 Recommend Movies</button>\n</form>\n");

    match outcome {
        PageOutcome::Empty => {}
        PageOutcome::Message(message) => {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(message));
        }
        PageOutcome::Results(results) => {
            html.push_str("<h2>🍿 Recommended Movies</h2>\n<div class=\"results\">\n");
            for movie in results {
                render_card(&mut html, movie);
            }
            html.push_str("</div>\n");
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_card(html: &mut String, movie: &RecommendationResult) {
    let title = escape_html(&movie.title);
    html.push_str("<div class=\"card\">\n");
    match &movie.poster_url {
        Some(url) => {
            let _ = writeln!(html, "<img src=\"{}\" alt=\"{}\">", escape_html(url), title);
        }
        None => html.push_str("<div class=\"placeholder\">No poster available</div>\n"),
    }
    let _ = writeln!(html, "<div class=\"caption\">{}</div>\n</div>", title);
}
