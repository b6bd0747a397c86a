use chrono::{Days, NaiveDate};
use roundup_core::{DigestError, TimeWindow};
use roundup_social::twitter::normalize_list_id;

pub const MISSING_INPUT: &str = "Please provide all required inputs";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Focusable elements of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ListId,
    StartDate,
    EndDate,
    Generate,
}

impl Field {
    pub const ORDER: [Field; 4] = [
        Field::ListId,
        Field::StartDate,
        Field::EndDate,
        Field::Generate,
    ];

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::ListId => "List ID or URL",
            Field::StartDate => "Start date",
            Field::EndDate => "End date",
            Field::Generate => "Generate",
        }
    }

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Single-line text buffer with a byte cursor kept on char boundaries.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        while self.cursor > 0 && !self.value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    pub fn right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor += 1;
        while self.cursor < self.value.len() && !self.value.is_char_boundary(self.cursor) {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn insert(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut prev = self.cursor - 1;
        while prev > 0 && !self.value.is_char_boundary(prev) {
            prev -= 1;
        }
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        let mut end = self.cursor + 1;
        while end < self.value.len() && !self.value.is_char_boundary(end) {
            end += 1;
        }
        self.value.drain(self.cursor..end);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please provide all required inputs")]
    MissingInput,
    #[error("{field} must be a date like 2024-01-31 (got {value:?})")]
    InvalidDate { field: &'static str, value: String },
    #[error("could not find a list id in {0:?}")]
    UnrecognizedList(String),
}

/// Validated form contents, ready for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub list_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FormInput {
    /// Window from midnight UTC of `start` to midnight UTC of `end`.
    pub fn window(&self) -> Result<TimeWindow, DigestError> {
        TimeWindow::from_dates(self.start, self.end)
    }
}

#[derive(Debug, Clone)]
pub struct DigestForm {
    list_id: TextInput,
    start: TextInput,
    end: TextInput,
    focus: Field,
}

impl DigestForm {
    /// Empty list id, window ending `today` and starting `lookback_days` earlier.
    pub fn new(today: NaiveDate, lookback_days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            list_id: TextInput::default(),
            start: TextInput::with_value(start.format(DATE_FORMAT).to_string()),
            end: TextInput::with_value(today.format(DATE_FORMAT).to_string()),
            focus: Field::ListId,
        }
    }

    pub fn with_list_id(mut self, list_id: impl Into<String>) -> Self {
        self.list_id = TextInput::with_value(list_id);
        self
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn input(&self, field: Field) -> Option<&TextInput> {
        match field {
            Field::ListId => Some(&self.list_id),
            Field::StartDate => Some(&self.start),
            Field::EndDate => Some(&self.end),
            Field::Generate => None,
        }
    }

    /// Buffer under focus, or `None` when the Generate action is focused.
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Field::ListId => Some(&mut self.list_id),
            Field::StartDate => Some(&mut self.start),
            Field::EndDate => Some(&mut self.end),
            Field::Generate => None,
        }
    }

    /// Check the inputs without contacting anything.
    ///
    /// Date order is left to the pipeline, which reports it as invalid input.
    pub fn validate(&self) -> Result<FormInput, FormError> {
        let raw_list = self.list_id.value().trim();
        let raw_start = self.start.value().trim();
        let raw_end = self.end.value().trim();
        if raw_list.is_empty() || raw_start.is_empty() || raw_end.is_empty() {
            return Err(FormError::MissingInput);
        }

        let list_id = normalize_list_id(raw_list)
            .ok_or_else(|| FormError::UnrecognizedList(raw_list.to_string()))?;
        let start = parse_date(Field::StartDate, raw_start)?;
        let end = parse_date(Field::EndDate, raw_end)?;

        Ok(FormInput {
            list_id,
            start,
            end,
        })
    }
}

fn parse_date(field: Field, raw: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| FormError::InvalidDate {
        field: field.label(),
        value: raw.to_string(),
    })
}
