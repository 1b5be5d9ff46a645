use std::iter::FusedIterator;
use std::str::Lines;

/// Blank-line separated groups of trimmed, non-empty lines.
///
/// The iterator borrows the source text and is cheap to clone, so a caller can
/// walk the same text more than once.
#[derive(Debug, Clone)]
pub struct LineGroups<'a> {
    lines: Lines<'a>,
}

pub fn line_groups(text: &str) -> LineGroups<'_> {
    LineGroups {
        lines: text.lines(),
    }
}

impl<'a> Iterator for LineGroups<'a> {
    type Item = Vec<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut group = Vec::new();
        for line in self.lines.by_ref() {
            let line = line.trim();
            if line.is_empty() {
                if group.is_empty() {
                    continue;
                }
                return Some(group);
            }
            group.push(line);
        }

        if group.is_empty() {
            None
        } else {
            Some(group)
        }
    }
}

impl FusedIterator for LineGroups<'_> {}
