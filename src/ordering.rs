//! Position arithmetic for ordered rows.
//!
//! Lists on a board, cards in a list and checklist items on a card all carry
//! a `position`. After every change the positions of a container are exactly
//! `0..n`. The functions here compute the new order; repositories write it.

/// Clamp a requested position into `0..=len`.
///
/// Negative positions go to the front, positions past the end go to the end.
pub fn clamp_position(requested: i32, len: usize) -> usize {
    if requested <= 0 {
        0
    } else {
        (requested as usize).min(len)
    }
}

/// Insert `item` at the clamped `position`, returning the index it landed at.
pub fn insert_at<T>(items: &mut Vec<T>, item: T, position: i32) -> usize {
    let index = clamp_position(position, items.len());
    items.insert(index, item);
    index
}

/// Move the element at `from` to the clamped position `to`.
///
/// `to` is the final index of the element, counted after its removal.
/// Returns the index it landed at, or `None` if `from` is out of range.
pub fn move_within<T>(items: &mut Vec<T>, from: usize, to: i32) -> Option<usize> {
    if from >= items.len() {
        return None;
    }
    let item = items.remove(from);
    Some(insert_at(items, item, to))
}

/// Pairs of `(id, new_position)` for rows whose position differs from their index.
pub fn position_changes<I>(ordered: I) -> Vec<(i32, i32)>
where
    I: IntoIterator<Item = (i32, i32)>,
{
    ordered
        .into_iter()
        .enumerate()
        .filter_map(|(index, (id, position))| {
            let index = index as i32;
            (position != index).then_some((id, index))
        })
        .collect()
}
