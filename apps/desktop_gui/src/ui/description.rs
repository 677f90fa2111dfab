//! Description-pane rendering: plain text with URLs turned into links
//! that open in the default handler.

use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link(&'a str),
}

/// Splits one line into plain and link segments. A whitespace-delimited
/// token is a link when it is an absolute http(s) URL.
pub fn linkify(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }
        let mut end = start + ch.len_utf8();
        while let Some(&(index, next)) = chars.peek() {
            if next.is_whitespace() {
                break;
            }
            end = index + next.len_utf8();
            chars.next();
        }
        let word = &text[start..end];
        if is_link(word) {
            if plain_start < start {
                segments.push(Segment::Text(&text[plain_start..start]));
            }
            segments.push(Segment::Link(word));
            plain_start = end;
        }
    }
    if plain_start < text.len() {
        segments.push(Segment::Text(&text[plain_start..]));
    }
    segments
}

fn is_link(word: &str) -> bool {
    (word.starts_with("http://") || word.starts_with("https://")) && word.len() > "https://".len()
}

/// Lays the composed description out line by line, hyperlinking URL
/// tokens in place.
pub fn render_description(ui: &mut egui::Ui, text: &str) {
    for line in text.lines() {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            for segment in linkify(line) {
                match segment {
                    Segment::Text(chunk) => {
                        ui.label(chunk);
                    }
                    Segment::Link(url) => {
                        ui.hyperlink(url);
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_stays_one_segment() {
        assert_eq!(
            linkify("no links in here"),
            vec![Segment::Text("no links in here")]
        );
    }

    #[test]
    fn url_tokens_become_links() {
        assert_eq!(
            linkify("see https://example.com/kb for details"),
            vec![
                Segment::Text("see "),
                Segment::Link("https://example.com/kb"),
                Segment::Text(" for details"),
            ]
        );
    }

    #[test]
    fn a_line_that_is_only_a_url_is_one_link() {
        assert_eq!(
            linkify("http://support.example.com/help"),
            vec![Segment::Link("http://support.example.com/help")]
        );
    }

    #[test]
    fn adjacent_urls_each_link_separately() {
        assert_eq!(
            linkify("https://a.example https://b.example"),
            vec![
                Segment::Link("https://a.example"),
                Segment::Text(" "),
                Segment::Link("https://b.example"),
            ]
        );
    }

    #[test]
    fn bare_scheme_prefixes_are_not_links() {
        assert_eq!(linkify("https://"), vec![Segment::Text("https://")]);
    }

    #[test]
    fn empty_line_yields_no_segments() {
        assert!(linkify("").is_empty());
    }
}
