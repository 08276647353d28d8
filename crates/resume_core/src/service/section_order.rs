//! Adjacent-swap reordering of preview sections.

use crate::model::section::{MoveDirection, SectionKind};

/// Swaps the section at `index` with its neighbor in `direction`.
///
/// Returns `None` when the move would leave the list (first entry up, last
/// entry down) or `index` is out of range. Never jumps more than one slot.
pub fn move_section(
    order: &[SectionKind],
    index: usize,
    direction: MoveDirection,
) -> Option<Vec<SectionKind>> {
    if index >= order.len() {
        return None;
    }
    let target = match direction {
        MoveDirection::Up => index.checked_sub(1)?,
        MoveDirection::Down => {
            let next = index + 1;
            if next >= order.len() {
                return None;
            }
            next
        }
    };

    let mut reordered = order.to_vec();
    reordered.swap(index, target);
    Some(reordered)
}

#[cfg(test)]
mod tests {
    use super::move_section;
    use crate::model::section::{MoveDirection, SectionKind};

    #[test]
    fn moves_are_adjacent_swaps() {
        let order = SectionKind::ALL;

        let moved = move_section(&order, 2, MoveDirection::Up).expect("move up");
        assert_eq!(moved[1], SectionKind::Experience);
        assert_eq!(moved[2], SectionKind::Summary);

        let moved = move_section(&order, 2, MoveDirection::Down).expect("move down");
        assert_eq!(moved[2], SectionKind::Education);
        assert_eq!(moved[3], SectionKind::Experience);
        assert_eq!(&moved[4..], &order[4..]);
    }

    #[test]
    fn out_of_bounds_moves_are_rejected() {
        let order = SectionKind::ALL;
        assert!(move_section(&order, 0, MoveDirection::Up).is_none());
        assert!(move_section(&order, order.len() - 1, MoveDirection::Down).is_none());
        assert!(move_section(&order, order.len(), MoveDirection::Up).is_none());
        assert!(move_section(&[], 0, MoveDirection::Down).is_none());
    }

    #[test]
    fn up_then_down_restores_order() {
        let order = SectionKind::ALL;
        let up = move_section(&order, 4, MoveDirection::Up).expect("move up");
        let back = move_section(&up, 3, MoveDirection::Down).expect("move down");
        assert_eq!(back, order.to_vec());
    }
}
