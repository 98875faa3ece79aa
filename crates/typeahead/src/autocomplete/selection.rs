//! The externally owned selected value and the commit rules.

/// The value an owner holds for an autocomplete control.
///
/// Single-select controls propose [`Selection::One`]; multi-select controls
/// always propose [`Selection::Many`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection<T> {
    /// Nothing selected.
    #[default]
    None,
    /// A single selected option.
    One(T),
    /// Selected options, in the order they were added.
    Many(Vec<T>),
}

impl<T> Selection<T> {
    /// Check whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::One(_) => false,
            Self::Many(items) => items.is_empty(),
        }
    }

    /// The selected options as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::None => &[],
            Self::One(item) => std::slice::from_ref(item),
            Self::Many(items) => items,
        }
    }

    /// The single selected option, if this is [`Selection::One`].
    pub fn one(&self) -> Option<&T> {
        match self {
            Self::One(item) => Some(item),
            _ => None,
        }
    }
}

impl<T: PartialEq> Selection<T> {
    /// Whether `option` counts as selected under the given mode.
    ///
    /// Multi-select checks membership of the [`Selection::Many`] list;
    /// single-select compares against the [`Selection::One`] value. A value
    /// of the other shape never matches.
    pub fn is_selected(&self, option: &T, multiple: bool) -> bool {
        match (self, multiple) {
            (Self::Many(items), true) => items.contains(option),
            (Self::One(item), false) => item == option,
            _ => false,
        }
    }
}

impl<T: Clone + PartialEq> Selection<T> {
    /// The value a commit of `option` proposes.
    ///
    /// Single-select replaces the value. Multi-select removes every copy of
    /// `option` if it is present and appends it otherwise; the current value
    /// is read as an empty list unless it is [`Selection::Many`].
    pub fn committed(&self, option: T, multiple: bool) -> Self {
        if !multiple {
            return Self::One(option);
        }

        let mut items = match self {
            Self::Many(items) => items.clone(),
            _ => Vec::new(),
        };
        if items.contains(&option) {
            items.retain(|item| *item != option);
        } else {
            items.push(option);
        }
        Self::Many(items)
    }
}

impl<T> From<Vec<T>> for Selection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}
