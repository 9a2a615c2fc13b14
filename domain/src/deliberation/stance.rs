//! Grouping positions by normalized stance.

use super::position::Position;

/// Positions sharing one normalized stance, in first-seen order.
#[derive(Debug, Clone)]
pub struct StanceGroup<'a> {
    /// Normalized stance key
    pub key: String,
    /// Stance text as written by the first member
    pub stance: &'a str,
    pub members: Vec<&'a Position>,
}

impl StanceGroup<'_> {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Group positions by normalized stance.
///
/// Groups appear in the order their first member appears in `positions`;
/// members keep their relative order.
pub fn group_by_stance(positions: &[Position]) -> Vec<StanceGroup<'_>> {
    let mut groups: Vec<StanceGroup<'_>> = Vec::new();
    for position in positions {
        let key = position.stance_key();
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.members.push(position),
            None => groups.push(StanceGroup {
                key,
                stance: &position.stance,
                members: vec![position],
            }),
        }
    }
    groups
}

/// The biggest group; the first-seen group wins ties.
pub fn largest_group<'g, 'a>(groups: &'g [StanceGroup<'a>]) -> Option<&'g StanceGroup<'a>> {
    let mut best: Option<&'g StanceGroup<'a>> = None;
    for group in groups {
        match best {
            Some(b) if b.size() >= group.size() => {}
            _ => best = Some(group),
        }
    }
    best
}
