use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

impl SortDirection {
    /// One step of the header-click cycle: unsorted → asc → desc → unsorted
    pub fn next(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::Asc),
            Some(Self::Asc) => Some(Self::Desc),
            Some(Self::Desc) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, Self::Asc)
    }
}

/// Одна колонка сортировки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    pub direction: SortDirection,
}

impl SortField {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Multi-column sort keyed by column, in priority order.
///
/// Position in the list is the sort priority: a column keeps its slot while it cycles
/// asc → desc, and lands at the end when it is cleared and clicked again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortFields {
    entries: Vec<(String, SortDirection)>,
}

impl SortFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// A column listed twice keeps its first position and its last direction.
    pub fn from_sorts(sorts: &[SortField]) -> Self {
        let mut fields = Self::new();
        for sort in sorts {
            fields.set(&sort.field, sort.direction);
        }
        fields
    }

    fn set(&mut self, key: &str, direction: SortDirection) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = direction,
            None => self.entries.push((key.to_string(), direction)),
        }
    }

    /// Advances `key` one step through the cycle and returns its new direction.
    pub fn toggle(&mut self, key: &str) -> Option<SortDirection> {
        let next = SortDirection::next(self.direction(key));
        match next {
            Some(direction) => self.set(key, direction),
            None => self.entries.retain(|(k, _)| k != key),
        }
        next
    }

    pub fn direction(&self, key: &str) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, direction)| *direction)
    }

    /// 0-based priority of `key`, `None` when the column is not sorted
    pub fn priority(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn parsed_sorts(&self) -> Vec<SortField> {
        self.entries
            .iter()
            .map(|(field, direction)| SortField::new(field.clone(), *direction))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycle() {
        let mut sorts = SortFields::new();
        assert_eq!(sorts.toggle("name"), Some(SortDirection::Asc));
        assert_eq!(sorts.toggle("name"), Some(SortDirection::Desc));
        assert_eq!(sorts.toggle("name"), None);
        assert!(sorts.is_empty());
        // fourth click starts over
        assert_eq!(sorts.toggle("name"), Some(SortDirection::Asc));
    }

    #[test]
    fn test_priority_follows_insertion_order() {
        let mut sorts = SortFields::new();
        sorts.toggle("a");
        sorts.toggle("b");
        assert_eq!(sorts.parsed_sorts(), vec![SortField::asc("a"), SortField::asc("b")]);

        // asc -> desc keeps the slot
        sorts.toggle("a");
        assert_eq!(sorts.parsed_sorts(), vec![SortField::desc("a"), SortField::asc("b")]);

        // clearing and re-adding moves it behind "b"
        sorts.toggle("a");
        sorts.toggle("a");
        assert_eq!(sorts.parsed_sorts(), vec![SortField::asc("b"), SortField::asc("a")]);
        assert_eq!(sorts.priority("a"), Some(1));
    }

    #[test]
    fn test_from_sorts_preserves_order() {
        let initial = vec![SortField::desc("created_at"), SortField::asc("title")];
        let sorts = SortFields::from_sorts(&initial);
        assert_eq!(sorts.parsed_sorts(), initial);
        assert_eq!(sorts.direction("created_at"), Some(SortDirection::Desc));
        assert_eq!(sorts.direction("missing"), None);
    }

    #[test]
    fn test_from_sorts_duplicate_keeps_first_slot() {
        let sorts = SortFields::from_sorts(&[
            SortField::asc("a"),
            SortField::asc("b"),
            SortField::desc("a"),
        ]);
        assert_eq!(sorts.parsed_sorts(), vec![SortField::desc("a"), SortField::asc("b")]);
    }

    #[test]
    fn test_direction_serde() {
        assert_eq!(serde_json::to_string(&SortDirection::Asc).unwrap(), "\"asc\"");
        let upper: SortDirection = serde_json::from_str("\"DESC\"").unwrap();
        assert_eq!(upper, SortDirection::Desc);
    }
}
