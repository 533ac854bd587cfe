//! [`Cell`] content of the rendered components.

use std::fmt;

use askama::Template;

/// Content of a [`Table`] cell.
///
/// Rendered with the `components/cell.html` template, escaping all the
/// carried text.
///
/// [`Table`]: super::Table
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cell {
    /// Plain text.
    Text(String),

    /// Text styled with the provided CSS class.
    Styled {
        /// CSS class of the text.
        class: &'static str,

        /// Styled text.
        text: String,
    },

    /// Link to another page.
    Link {
        /// URL the link leads to.
        href: String,

        /// Text of the link.
        text: String,
    },

    /// Single-button form posting to its `action`.
    Action {
        /// URL the form is posted to.
        action: String,

        /// Label of the button.
        label: String,
    },

    /// Form posting a free text `field` to its `action`.
    Prompt {
        /// URL the form is posted to.
        action: String,

        /// Name of the posted text field.
        field: &'static str,

        /// Label of the button.
        label: String,
    },

    /// Sibling [`Cell`]s shown one after another.
    Group(Vec<Cell>),

    /// Truncated content showing its full text on hover.
    Tooltip {
        /// Full text of the content.
        title: String,

        /// Truncated content.
        content: Box<Cell>,
    },
}

impl Cell {
    /// Creates a new [`Cell::Text`].
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a new empty [`Cell`].
    #[must_use]
    pub const fn empty() -> Self {
        Self::Group(Vec::new())
    }

    /// Creates a new [`Cell::Link`].
    #[must_use]
    pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Link {
            href: href.into(),
            text: text.into(),
        }
    }

    /// Creates a new [`Cell::Action`].
    #[must_use]
    pub fn action(action: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Action {
            action: action.into(),
            label: label.into(),
        }
    }

    /// Returns the text content of this [`Cell`], unwrapping all the nested
    /// [`Cell`]s down to their text.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    /// Appends the text content of this [`Cell`] to the provided `out`put.
    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text)
            | Self::Styled { text, .. }
            | Self::Link { text, .. } => out.push_str(text),
            Self::Action { label, .. } | Self::Prompt { label, .. } => {
                out.push_str(label);
            }
            Self::Group(cells) => {
                for cell in cells {
                    cell.collect_text(out);
                }
            }
            Self::Tooltip { content, .. } => content.collect_text(out),
        }
    }

    /// Truncates this [`Cell`] to the `limit` characters of its text content,
    /// wrapping it into a [`Cell::Tooltip`] carrying the full text.
    ///
    /// Only the text is shortened: links keep their URL and controls are
    /// kept intact.
    #[must_use]
    pub fn truncate(self, limit: usize) -> Self {
        let title = self.text_content();
        if title.chars().count() <= limit {
            return self;
        }
        let mut budget = Some(limit);
        Self::Tooltip {
            title,
            content: Box::new(self.shorten(&mut budget)),
        }
    }

    /// Shortens the text of this [`Cell`] to the remaining `budget` of
    /// characters.
    ///
    /// [`None`] `budget` means the text has been cut off already.
    fn shorten(self, budget: &mut Option<usize>) -> Self {
        match self {
            Self::Text(text) => Self::Text(cut(text, budget)),
            Self::Styled { class, text } => Self::Styled {
                class,
                text: cut(text, budget),
            },
            Self::Link { href, text } => Self::Link {
                href,
                text: cut(text, budget),
            },
            Self::Action { .. } | Self::Prompt { .. } => {
                if let Some(left) = budget {
                    let len = self.text_content().chars().count();
                    *left = left.saturating_sub(len);
                }
                self
            }
            Self::Group(cells) => Self::Group(
                cells.into_iter().map(|c| c.shorten(budget)).collect(),
            ),
            Self::Tooltip { title, content } => Self::Tooltip {
                title,
                content: Box::new(content.shorten(budget)),
            },
        }
    }
}

/// Cuts the provided `text` to the remaining `budget` of characters, ending
/// it with an ellipsis where it's cut.
fn cut(text: String, budget: &mut Option<usize>) -> String {
    let Some(left) = *budget else {
        return String::new();
    };
    let len = text.chars().count();
    if len <= left {
        *budget = Some(left - len);
        return text;
    }
    *budget = None;
    let mut short = text.chars().take(left).collect::<String>();
    short.push('\u{2026}');
    short
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl FromIterator<Cell> for Cell {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::Group(iter.into_iter().collect())
    }
}

/// Template of a single [`Cell`].
#[derive(Debug, Template)]
#[template(path = "components/cell.html")]
struct CellTemplate<'a> {
    /// Rendered [`Cell`].
    cell: &'a Cell,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        CellTemplate { cell: self }
            .render_into(f)
            .map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod spec {
    use super::Cell;

    #[test]
    fn escapes_text() {
        let cell = Cell::Group(vec![
            Cell::text("5\" & <up>"),
            Cell::link("/contact?kind=SELL&x=1", "us"),
        ]);

        assert_eq!(
            cell.to_string(),
            "5&#34; &#38; &#60;up&#62;\
             <a href=\"/contact?kind=SELL&#38;x=1\">us</a>",
        );
    }

    #[test]
    fn collects_nested_text() {
        let cell = Cell::Group(vec![
            Cell::text("1.01ct "),
            Cell::Styled {
                class: "shape",
                text: "ROUND".into(),
            },
            Cell::action("/cart/remove", " remove"),
        ]);

        assert_eq!(cell.text_content(), "1.01ct ROUND remove");
    }

    #[test]
    fn text_of_exactly_limit_chars_is_kept() {
        let text = "a".repeat(30);

        assert_eq!(Cell::text(text.clone()).truncate(30), Cell::text(&*text));
        assert!(matches!(
            Cell::text(format!("{text}a")).truncate(30),
            Cell::Tooltip { .. },
        ));
    }

    #[test]
    fn long_text_is_truncated_with_tooltip() {
        let full = "Certificate number 2141438172, inscribed";

        let html = Cell::text(full).truncate(30).to_string();

        assert!(html.contains(&format!("title=\"{full}\"")), "{html}");
        assert!(
            html.contains(">Certificate number 2141438172,\u{2026}<"),
            "{html}",
        );
    }

    #[test]
    fn truncated_link_keeps_its_href() {
        let href = "/diamonds/2141438172";
        let text = "2.01ct ROUND D IF, certificate 2141438172";

        let cell = Cell::link(href, text).truncate(30);

        assert_eq!(
            cell,
            Cell::Tooltip {
                title: text.into(),
                content: Box::new(Cell::link(
                    href,
                    "2.01ct ROUND D IF, certificate\u{2026}",
                )),
            },
        );
        let html = cell.to_string();
        assert!(html.contains(&format!("<a href=\"{href}\">")), "{html}");
    }

    #[test]
    fn truncation_cuts_across_siblings_and_keeps_controls() {
        let cell = Cell::Group(vec![
            Cell::action("/cart/remove", "Remove"),
            Cell::text("a".repeat(20)),
            Cell::Styled {
                class: "note",
                text: "b".repeat(20),
            },
        ]);

        let Cell::Tooltip { content, .. } = cell.truncate(30) else {
            panic!("not truncated");
        };
        assert_eq!(
            *content,
            Cell::Group(vec![
                Cell::action("/cart/remove", "Remove"),
                Cell::text("a".repeat(20)),
                Cell::Styled {
                    class: "note",
                    text: format!("{}\u{2026}", "b".repeat(4)),
                },
            ]),
        );
    }
}
