//! Generic data [`Table`] with optional row [`Selection`].

use askama::Template;
use derive_more::Debug;
use service::domain::filter;
use uuid::Uuid;

use super::Cell;

/// Number of characters a cell shows before truncating its content.
pub const TRUNCATE_AT: usize = 30;

/// Placeholder row shown when a [`Table`] has no rows.
pub const NO_DATA: &str = "No data available";

/// Record renderable as a [`Table`] row.
pub trait Row {
    /// Returns the ID of this [`Row`], if it has one.
    fn id(&self) -> Option<String>;

    /// Returns the natural key of this [`Row`], used when it has no ID.
    fn natural_key(&self) -> Option<String> {
        None
    }

    /// Returns the textual value of the field with the provided `key`.
    fn field(&self, key: &str) -> Option<String>;
}

/// Returns the key identifying the provided [`Row`] in a [`Table`]: its ID,
/// its natural key, or a freshly generated random one.
pub fn row_key<R: Row>(row: &R) -> String {
    row.id()
        .or_else(|| row.natural_key())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Column of a [`Table`].
#[derive(Debug)]
pub struct Column<'a, R> {
    /// Key of the [`Row::field`] shown in this [`Column`].
    pub key: &'static str,

    /// Header text.
    pub header: &'static str,

    /// Custom renderer of the cell content.
    #[debug(skip)]
    render: Option<Box<dyn Fn(&R) -> Cell + Send + Sync + 'a>>,

    /// Custom CSS class of the cell.
    #[debug(skip)]
    cell_class: Option<Box<dyn Fn(&R) -> Option<String> + Send + Sync + 'a>>,
}

impl<'a, R> Column<'a, R> {
    /// Creates a new [`Column`] showing the [`Row::field`] with the provided
    /// `key`.
    #[must_use]
    pub fn new(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            render: None,
            cell_class: None,
        }
    }

    /// Sets the custom renderer of the cell content.
    #[must_use]
    pub fn render(
        mut self,
        render: impl Fn(&R) -> Cell + Send + Sync + 'a,
    ) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Sets the custom CSS class of the cell.
    #[must_use]
    pub fn cell_class(
        mut self,
        class: impl Fn(&R) -> Option<String> + Send + Sync + 'a,
    ) -> Self {
        self.cell_class = Some(Box::new(class));
        self
    }
}

impl<R: Row> Column<'_, R> {
    /// Renders the cell of the provided `row`.
    fn cell(&self, row: &R) -> CellView {
        let content = match &self.render {
            Some(render) => render(row),
            None => Cell::Text(row.field(self.key).unwrap_or_default()),
        };
        CellView {
            class: self.cell_class.as_ref().and_then(|class| class(row)),
            content: content.truncate(TRUNCATE_AT),
        }
    }
}

/// Rendered cell of a [`Table`] row.
#[derive(Debug)]
pub struct CellView {
    /// CSS class of the cell, if any.
    pub class: Option<String>,

    /// Truncated [`Cell`] content.
    pub content: Cell,
}

/// Rendered row of a [`Table`].
#[derive(Debug)]
pub struct RowView {
    /// Key of the row.
    pub key: String,

    /// Indicator whether the row is selected.
    pub selected: bool,

    /// Rendered cells of the row, one per [`Column`].
    pub cells: Vec<CellView>,
}

/// Selection of [`Table`] rows.
#[derive(Debug)]
pub enum Selection<'a> {
    /// Rows cannot be selected.
    Disabled,

    /// Selected keys are held by the [`Table`] itself.
    Uncontrolled(Vec<String>),

    /// Selected keys are owned by the caller, which is notified about every
    /// change instead.
    Controlled {
        /// Snapshot of the selected keys.
        selected: &'a [String],

        /// Callback receiving the new selected keys.
        #[debug(skip)]
        on_change: Box<dyn FnMut(Vec<String>) + Send + 'a>,
    },
}

/// State of the "select all" checkbox of a [`Table`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeaderState {
    /// Every row is selected.
    Checked,

    /// No row is selected.
    Unchecked,

    /// Some rows are selected.
    Indeterminate,
}

impl HeaderState {
    /// Returns the `aria-checked` value of this [`HeaderState`].
    const fn aria(self) -> &'static str {
        match self {
            Self::Checked => "true",
            Self::Unchecked => "false",
            Self::Indeterminate => "mixed",
        }
    }

    /// Indicates whether this is the [`HeaderState::Checked`].
    const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }
}

/// Data table of [`Row`]s.
#[derive(Debug, Template)]
#[template(path = "components/table.html")]
pub struct Table<'a, R: Row> {
    /// [`Column`]s of this [`Table`].
    columns: Vec<Column<'a, R>>,

    /// Rendered [`Row`]s.
    #[debug(skip)]
    rows: &'a [R],

    /// Keys of the [`Table::rows`], in the same order.
    keys: Vec<String>,

    /// [`Selection`] of the rows.
    selection: Selection<'a>,

    /// Name of the form field the selected keys are submitted as.
    input_name: &'static str,

    /// Link toggling all the rows at once, if any.
    toggle_all_href: Option<String>,
}

impl<'a, R: Row> Table<'a, R> {
    /// Creates a new [`Table`] of the provided `rows` without [`Selection`].
    #[must_use]
    pub fn new(columns: Vec<Column<'a, R>>, rows: &'a [R]) -> Self {
        Self {
            columns,
            keys: rows.iter().map(row_key).collect(),
            rows,
            selection: Selection::Disabled,
            input_name: "key",
            toggle_all_href: None,
        }
    }

    /// Enables the provided [`Selection`], submitting the selected keys as
    /// the `input_name` form field.
    #[must_use]
    pub fn with_selection(
        mut self,
        selection: Selection<'a>,
        input_name: &'static str,
    ) -> Self {
        self.selection = selection;
        self.input_name = input_name;
        self
    }

    /// Makes the "select all" checkbox a link to the provided `href`.
    #[must_use]
    pub fn with_toggle_all_href(mut self, href: impl Into<String>) -> Self {
        self.toggle_all_href = Some(href.into());
        self
    }

    /// Returns the keys of the rows, in their order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the currently selected keys.
    #[must_use]
    pub fn selected(&self) -> &[String] {
        match &self.selection {
            Selection::Disabled => &[],
            Selection::Uncontrolled(selected) => selected.as_slice(),
            Selection::Controlled { selected, .. } => *selected,
        }
    }

    /// Indicates whether the row with the provided `key` is selected.
    #[must_use]
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected().iter().any(|k| k == key)
    }

    /// Returns the [`HeaderState`] of the current selection.
    #[must_use]
    pub fn header_state(&self) -> HeaderState {
        let selected =
            self.keys.iter().filter(|k| self.is_selected(k)).count();
        if selected == 0 {
            HeaderState::Unchecked
        } else if selected == self.keys.len() {
            HeaderState::Checked
        } else {
            HeaderState::Indeterminate
        }
    }

    /// Toggles the selection of the row with the provided `key`.
    ///
    /// Unknown keys are ignored.
    pub fn toggle_row(&mut self, key: &str) {
        if matches!(self.selection, Selection::Disabled)
            || !self.keys.iter().any(|k| k == key)
        {
            return;
        }
        let mut next = self.selected().to_vec();
        filter::toggle(&mut next, key.to_owned());
        self.change(next);
    }

    /// Selects all the rows, or deselects them if all are already selected.
    ///
    /// Selected keys not belonging to the rows are kept.
    pub fn toggle_all(&mut self) {
        if matches!(self.selection, Selection::Disabled) {
            return;
        }
        let mut next = self.selected().to_vec();
        if self.header_state() == HeaderState::Checked {
            next.retain(|k| !self.keys.contains(k));
        } else {
            for key in &self.keys {
                if !next.contains(key) {
                    next.push(key.clone());
                }
            }
        }
        self.change(next);
    }

    /// Applies the `next` selected keys according to the [`Selection`] mode.
    fn change(&mut self, next: Vec<String>) {
        match &mut self.selection {
            Selection::Disabled => {}
            Selection::Uncontrolled(selected) => *selected = next,
            Selection::Controlled { on_change, .. } => on_change(next),
        }
    }

    /// Indicates whether the rows of this [`Table`] can be selected.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !matches!(self.selection, Selection::Disabled)
    }

    /// Returns the number of the columns, including the selection one.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len() + usize::from(self.is_selectable())
    }

    /// Renders the rows of this [`Table`].
    #[must_use]
    pub fn body(&self) -> Vec<RowView> {
        self.rows
            .iter()
            .zip(&self.keys)
            .map(|(row, key)| RowView {
                key: key.clone(),
                selected: self.is_selected(key),
                cells: self.columns.iter().map(|c| c.cell(row)).collect(),
            })
            .collect()
    }
}
