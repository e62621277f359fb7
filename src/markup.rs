//! Plain text rendering of the HTML fragments the provider embeds in
//! summaries and instructions.
//!
//! The conversion is a fixed sequence of regex passes. Order matters: list
//! items must be numbered before the generic tag stripper runs, and entities
//! are decoded last so that an encoded `&lt;` never turns into a tag.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Glyph used for unordered list items
pub const BULLET: &str = "•";

/// One step of the normalization pipeline
pub struct Pass {
    pub name: &'static str,
    run: fn(&str) -> String,
}

impl Pass {
    pub fn apply(&self, text: &str) -> String {
        (self.run)(text)
    }
}

/// The pipeline, in the order it runs
pub const PASSES: [Pass; 9] = [
    Pass {
        name: "unordered_lists",
        run: unordered_lists,
    },
    Pass {
        name: "ordered_lists",
        run: ordered_lists,
    },
    Pass {
        name: "paragraphs",
        run: paragraphs,
    },
    Pass {
        name: "line_breaks",
        run: line_breaks,
    },
    Pass {
        name: "headings",
        run: headings,
    },
    Pass {
        name: "emphasis",
        run: emphasis,
    },
    Pass {
        name: "remaining_tags",
        run: remaining_tags,
    },
    Pass {
        name: "entities",
        run: decode_entities,
    },
    Pass {
        name: "trim",
        run: trim,
    },
];

/// Render provider markup as display-ready plain text
pub fn normalize(html: &str) -> String {
    PASSES
        .iter()
        .fold(html.to_string(), |text, pass| pass.apply(&text))
}

static UL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<ul(?:\s[^>]*)?>(.*?)</ul>").unwrap());
static OL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<ol(?:\s[^>]*)?>(.*?)</ol>").unwrap());
static LI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<li(?:\s[^>]*)?>(.*?)</li>").unwrap());
static P_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p>").unwrap());
static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h[1-4](?:\s[^>]*)?>(.*?)</h[1-4]>").unwrap());
static EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?(?:b|strong|i|em)(?:\s[^>]*)?>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").unwrap());
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());

fn list_items(inner: &str) -> Vec<String> {
    LI_RE
        .captures_iter(inner)
        .map(|item| item[1].trim().to_string())
        .collect()
}

fn unordered_lists(text: &str) -> String {
    UL_RE
        .replace_all(text, |caps: &Captures| {
            let lines: Vec<String> = list_items(&caps[1])
                .into_iter()
                .map(|item| format!("{} {}", BULLET, item))
                .collect();
            format!("\n{}\n", lines.join("\n"))
        })
        .into_owned()
}

fn ordered_lists(text: &str) -> String {
    OL_RE
        .replace_all(text, |caps: &Captures| {
            let lines: Vec<String> = list_items(&caps[1])
                .into_iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {}", i + 1, item))
                .collect();
            format!("\n{}\n", lines.join("\n"))
        })
        .into_owned()
}

fn paragraphs(text: &str) -> String {
    P_RE.replace_all(text, "${1}\n\n").into_owned()
}

fn line_breaks(text: &str) -> String {
    BR_RE.replace_all(text, "\n").into_owned()
}

fn headings(text: &str) -> String {
    HEADING_RE.replace_all(text, "${1}\n").into_owned()
}

fn emphasis(text: &str) -> String {
    EMPHASIS_RE.replace_all(text, "").into_owned()
}

fn remaining_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

fn named_entity(name: &str) -> Option<&'static str> {
    let decoded = match name {
        "nbsp" => " ",
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "ndash" => "–",
        "mdash" => "—",
        "lsquo" => "‘",
        "rsquo" => "’",
        "ldquo" => "“",
        "rdquo" => "”",
        "bull" => "•",
        "hellip" => "…",
        _ => return None,
    };
    Some(decoded)
}

fn numeric_entity(reference: &str) -> Option<char> {
    let code = match reference.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => reference.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

fn decode_entities(text: &str) -> String {
    // Single pass, so "&amp;lt;" becomes "&lt;" rather than "<"
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = match body.strip_prefix('#') {
                Some(reference) => numeric_entity(reference).map(String::from),
                None => named_entity(body).map(String::from),
            };
            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn trim(text: &str) -> String {
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_order() {
        let names: Vec<&str> = PASSES.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "unordered_lists",
                "ordered_lists",
                "paragraphs",
                "line_breaks",
                "headings",
                "emphasis",
                "remaining_tags",
                "entities",
                "trim"
            ]
        );
    }

    #[test]
    fn test_unordered_list_pass() {
        let out = unordered_lists("<ul><li>One</li>\n<li> Two </li></ul>");
        assert_eq!(out, "\n• One\n• Two\n");
    }

    #[test]
    fn test_ordered_list_pass() {
        let out = ordered_lists("<OL class=\"steps\"><li>Chop</li><li>Fry</li><li>Serve</li></OL>");
        assert_eq!(out, "\n1. Chop\n2. Fry\n3. Serve\n");
    }

    #[test]
    fn test_each_list_numbers_from_one() {
        let out = ordered_lists("<ol><li>a</li></ol><ol><li>b</li></ol>");
        assert_eq!(out, "\n1. a\n\n1. b\n");
    }

    #[test]
    fn test_paragraph_pass() {
        assert_eq!(paragraphs("<p>Hello</p>World"), "Hello\n\nWorld");
        // <pre> is not a paragraph
        assert_eq!(paragraphs("<pre>x</pre>"), "<pre>x</pre>");
    }

    #[test]
    fn test_line_break_variants() {
        assert_eq!(line_breaks("a<br>b<br/>c<BR />d"), "a\nb\nc\nd");
    }

    #[test]
    fn test_heading_pass() {
        assert_eq!(headings("<h2>Sauce</h2>Stir"), "Sauce\nStir");
        assert_eq!(headings("<h5>Small</h5>"), "<h5>Small</h5>");
    }

    #[test]
    fn test_emphasis_pass() {
        assert_eq!(
            emphasis("<b>bold</b> <strong>strong</strong> <i>it</i> <em>em</em>"),
            "bold strong it em"
        );
        // <br> and <body> are left for later passes
        assert_eq!(emphasis("<br><body>"), "<br><body>");
    }

    #[test]
    fn test_remaining_tags_pass() {
        assert_eq!(
            remaining_tags("<a href=\"https://spoonacular.com\">link</a><span>x</span>"),
            "linkx"
        );
    }

    #[test]
    fn test_entity_pass() {
        assert_eq!(decode_entities("A &amp; B &#169; done"), "A & B © done");
        assert_eq!(decode_entities("&ldquo;hi&rdquo;&hellip;"), "“hi”…");
        assert_eq!(decode_entities("&#x2022; item"), "• item");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_unknown_entities_stay_verbatim() {
        assert_eq!(decode_entities("&foo; &#99999999999;"), "&foo; &#99999999999;");
        assert_eq!(decode_entities("&#55296;"), "&#55296;");
    }

    #[test]
    fn test_list_before_tag_stripping() {
        // If tags were stripped first there would be nothing left to number
        let out = normalize("<ol><li><b>Mix</b></li><li>Bake</li></ol>");
        assert_eq!(out, "1. Mix\n2. Bake");
    }

    #[test]
    fn test_paragraph_and_list() {
        let out = normalize("<p>Hello</p><ul><li>One</li><li>Two</li></ul>");
        let lines: Vec<&str> = out.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["Hello", "• One", "• Two"]);
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
    }

    #[test]
    fn test_summary_like_input() {
        let html = "The recipe <b>Pasta</b> serves <b>2</b>.<br/>It costs &#36;1.63 per serving &ndash; cheap!";
        assert_eq!(
            normalize(html),
            "The recipe Pasta serves 2.\nIt costs $1.63 per serving – cheap!"
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "<p>Hello</p><ul><li>One</li><li>Two</li></ul>",
            "<h1>Title</h1><ol><li>a</li><li>b</li></ol><p>End &amp; more</p>",
            "  plain text  ",
            "A &amp; B &#169; done",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("<p></p>"), "");
    }
}
