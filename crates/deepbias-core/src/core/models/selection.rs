use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("The system has no atoms to select")]
    Empty,
    #[error("Atom index {index} is outside the system ({total} atoms)")]
    IndexOutOfRange { index: usize, total: usize },
    #[error("Invalid atom serial token '{0}': expected a positive integer or a range like '3-7'")]
    InvalidToken(String),
    #[error("Invalid atom serial range '{0}': the end must not precede the start")]
    InvertedRange(String),
}

/// Which host atoms a model is evaluated on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AtomSelection {
    /// Every atom of the system, in host order.
    #[default]
    All,
    /// Explicit 0-based host indices, in evaluation order. An empty list selects
    /// every atom, like [`AtomSelection::All`].
    List(Vec<usize>),
}

impl FromStr for AtomSelection {
    type Err = SelectionError;

    /// Parses 1-based serials such as `"1-4,7,10-12"`. An empty string or `"all"`
    /// selects the whole system.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(AtomSelection::All);
        }

        let mut indices = Vec::new();
        for token in s.split([',', ' ', '\t']).filter(|t| !t.is_empty()) {
            match token.split_once('-') {
                Some((start, end)) => {
                    let start = parse_serial(start, token)?;
                    let end = parse_serial(end, token)?;
                    if end < start {
                        return Err(SelectionError::InvertedRange(token.to_string()));
                    }
                    indices.extend((start..=end).map(|serial| serial - 1));
                }
                None => indices.push(parse_serial(token, token)? - 1),
            }
        }
        Ok(AtomSelection::List(indices))
    }
}

fn parse_serial(value: &str, token: &str) -> Result<usize, SelectionError> {
    match value.trim().parse::<usize>() {
        Ok(serial) if serial > 0 => Ok(serial),
        _ => Err(SelectionError::InvalidToken(token.to_string())),
    }
}

/// The resolved, ordered atoms an adapter evaluates. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomSet {
    indices: Vec<usize>,
}

impl AtomSet {
    /// Fails with [`SelectionError::Empty`] only when the system itself has no atoms.
    pub fn resolve(selection: &AtomSelection, total_atoms: usize) -> Result<Self, SelectionError> {
        let indices = match selection {
            AtomSelection::All => (0..total_atoms).collect::<Vec<_>>(),
            AtomSelection::List(list) if list.is_empty() => (0..total_atoms).collect::<Vec<_>>(),
            AtomSelection::List(list) => {
                if let Some(&index) = list.iter().find(|&&i| i >= total_atoms) {
                    return Err(SelectionError::IndexOutOfRange {
                        index,
                        total: total_atoms,
                    });
                }
                list.clone()
            }
        };
        if indices.is_empty() {
            return Err(SelectionError::Empty);
        }
        Ok(Self { indices })
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// 1-based serials, the numbering users write in input files.
    pub fn serials(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter().map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_selection_covers_system_in_order() {
        let set = AtomSet::resolve(&AtomSelection::All, 4).unwrap();
        assert_eq!(set.indices(), &[0, 1, 2, 3]);
        assert_eq!(set.serials().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn explicit_list_keeps_caller_order() {
        let set = AtomSet::resolve(&AtomSelection::List(vec![5, 0, 3]), 6).unwrap();
        assert_eq!(set.indices(), &[5, 0, 3]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn resolve_rejects_out_of_range_indices_and_empty_systems() {
        assert_eq!(
            AtomSet::resolve(&AtomSelection::List(vec![0, 6]), 6),
            Err(SelectionError::IndexOutOfRange { index: 6, total: 6 })
        );
        assert_eq!(
            AtomSet::resolve(&AtomSelection::All, 0),
            Err(SelectionError::Empty)
        );
        assert_eq!(
            AtomSet::resolve(&AtomSelection::List(vec![]), 0),
            Err(SelectionError::Empty)
        );
    }

    #[test]
    fn empty_explicit_list_selects_every_atom() {
        let set = AtomSet::resolve(&AtomSelection::List(vec![]), 3).unwrap();
        assert_eq!(set, AtomSet::resolve(&AtomSelection::All, 3).unwrap());
        assert_eq!(set.indices(), &[0, 1, 2]);
    }

    #[test]
    fn from_str_parses_serials_and_ranges() {
        let selection: AtomSelection = "1-3,7, 10-11".parse().unwrap();
        assert_eq!(selection, AtomSelection::List(vec![0, 1, 2, 6, 9, 10]));
    }

    #[test]
    fn from_str_treats_blank_and_all_as_whole_system() {
        assert_eq!("".parse::<AtomSelection>(), Ok(AtomSelection::All));
        assert_eq!(" ALL ".parse::<AtomSelection>(), Ok(AtomSelection::All));
    }

    #[test]
    fn from_str_rejects_malformed_tokens() {
        assert!(matches!(
            "0".parse::<AtomSelection>(),
            Err(SelectionError::InvalidToken(_))
        ));
        assert!(matches!(
            "a-3".parse::<AtomSelection>(),
            Err(SelectionError::InvalidToken(_))
        ));
        assert_eq!(
            "5-2".parse::<AtomSelection>(),
            Err(SelectionError::InvertedRange("5-2".to_string()))
        );
    }
}
