//! Extraction of investment opportunities from the farm detail page.
//!
//! The page marks each opportunity with an element carrying the
//! `opportunity-card` class and a `data-opportunity-id` attribute; its title
//! is the text of the nested `opportunity-title` element.

use crate::models::Opportunity;

const CARD_CLASS: &str = "opportunity-card";
const TITLE_CLASS: &str = "opportunity-title";
const ID_ATTR: &str = "data-opportunity-id";

/// An opening tag: byte offsets of `<` and one past `>`
struct Tag<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

fn tags(html: &str) -> Vec<Tag<'_>> {
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(rel) = html[pos..].find('<') {
        let start = pos + rel;
        let Some(close) = html[start..].find('>') else { break };
        let end = start + close + 1;
        let text = &html[start + 1..end - 1];
        if !text.starts_with('/') && !text.starts_with('!') {
            out.push(Tag { start, end, text });
        }
        pos = end;
    }
    out
}

/// Value of a quoted attribute inside an opening tag
fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let mut pos = 0;
    while let Some(rel) = tag[pos..].find(name) {
        let at = pos + rel;
        pos = at + name.len();

        let preceded_by_space = tag[..at].chars().last().is_some_and(char::is_whitespace);
        let rest = tag[pos..].trim_start();
        if !preceded_by_space || !rest.starts_with('=') {
            continue;
        }
        let rest = rest[1..].trim_start();
        let quote = rest.chars().next()?;
        if quote != '"' && quote != '\'' {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            return Some(&rest[..end]);
        }
        let body = &rest[1..];
        let end = body.find(quote)?;
        return Some(&body[..end]);
    }
    None
}

fn has_class(tag: &str, class: &str) -> bool {
    attr_value(tag, "class")
        .map(|classes| classes.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Element name of an opening or closing tag body
fn tag_name(tag: &str) -> &str {
    tag.trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
}

/// Text content of the element opened by `open`, up to its matching close tag
/// (or `limit`). Nested tags are dropped and whitespace is collapsed.
fn element_text(html: &str, open: &Tag<'_>, limit: usize) -> String {
    let name = tag_name(open.text);
    let mut depth = 1usize;
    let mut text = String::new();
    let mut pos = open.end;

    while pos < limit {
        let Some(rel) = html[pos..limit].find('<') else {
            text.push_str(&html[pos..limit]);
            break;
        };
        let start = pos + rel;
        text.push_str(&html[pos..start]);

        let Some(close) = html[start..].find('>') else { break };
        let inner = &html[start + 1..start + close];
        pos = start + close + 1;

        if !tag_name(inner).eq_ignore_ascii_case(name) {
            continue;
        }
        if inner.starts_with('/') {
            depth -= 1;
            if depth == 0 {
                break;
            }
        } else if !inner.ends_with('/') {
            depth += 1;
        }
    }

    decode_entities(&text).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collect `(id, title)` pairs in document order. Cards missing either part are skipped.
pub fn parse_opportunities(html: &str) -> Vec<Opportunity> {
    let all_tags = tags(html);

    let cards: Vec<(usize, &Tag<'_>, &str)> = all_tags
        .iter()
        .enumerate()
        .filter(|(_, t)| has_class(t.text, CARD_CLASS))
        .filter_map(|(i, t)| attr_value(t.text, ID_ATTR).map(|id| (i, t, id)))
        .collect();

    let mut opportunities = Vec::new();

    for (n, (index, _card, id)) in cards.iter().enumerate() {
        let region_end = cards
            .get(n + 1)
            .map(|(_, next, _)| next.start)
            .unwrap_or(html.len());

        let title_tag = all_tags[index + 1..]
            .iter()
            .take_while(|t| t.start < region_end)
            .find(|t| has_class(t.text, TITLE_CLASS));

        let Some(title_tag) = title_tag else { continue };
        let title = element_text(html, title_tag, region_end);
        let id = id.trim();

        if !id.is_empty() && !title.is_empty() {
            opportunities.push(Opportunity {
                id: id.to_string(),
                title,
            });
        }
    }

    opportunities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cards() {
        let html = r#"
            <div class="row">
              <div class="card opportunity-card h-100" data-opportunity-id="3">
                <div class="card-body">
                  <h5 class="card-title opportunity-title">Drip Irrigation</h5>
                  <p>Expected ROI 12%</p>
                </div>
              </div>
              <div class="card opportunity-card" data-opportunity-id='7'>
                <h5 class="opportunity-title"> Seeds &amp; Soil </h5>
              </div>
            </div>"#;

        let ops = parse_opportunities(html);
        assert_eq!(
            ops,
            vec![
                Opportunity { id: "3".into(), title: "Drip Irrigation".into() },
                Opportunity { id: "7".into(), title: "Seeds & Soil".into() },
            ]
        );
    }

    #[test]
    fn test_title_includes_nested_markup() {
        let html = r#"
            <div class="opportunity-card" data-opportunity-id="4">
              <h5 class="opportunity-title"><a href="/opportunity/4">Solar Pumps</a></h5>
            </div>
            <div class="opportunity-card" data-opportunity-id="5">
              <h5 class="opportunity-title">Drip <em>Irrigation</em>
                  Upgrade</h5>
              <h5>Not the title</h5>
            </div>"#;

        let ops = parse_opportunities(html);
        assert_eq!(
            ops,
            vec![
                Opportunity { id: "4".into(), title: "Solar Pumps".into() },
                Opportunity { id: "5".into(), title: "Drip Irrigation Upgrade".into() },
            ]
        );
    }

    #[test]
    fn test_title_stops_at_matching_close_tag() {
        let html = r#"<div class="opportunity-card" data-opportunity-id="9"><div class="opportunity-title"><div>Cold</div> Storage</div><div>ROI 8%</div></div>"#;

        let ops = parse_opportunities(html);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].title, "Cold Storage");
    }

    #[test]
    fn test_card_without_title_is_skipped() {
        let html = r#"<div class="opportunity-card" data-opportunity-id="1"><p>none</p></div>
            <div class="opportunity-card" data-opportunity-id="2"><span class="opportunity-title">Barn</span></div>"#;

        let ops = parse_opportunities(html);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].id, "2");
    }

    #[test]
    fn test_ignores_similar_class_names() {
        let html = r#"<div class="opportunity-cards" data-opportunity-id="1"><span class="opportunity-title">X</span></div>"#;
        assert!(parse_opportunities(html).is_empty());
    }

    #[test]
    fn test_empty_page() {
        assert!(parse_opportunities("").is_empty());
        assert!(parse_opportunities("<html><body>No farm</body></html>").is_empty());
    }
}
