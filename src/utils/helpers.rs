//! Generic list traversal helpers.

/// Find the element `shift` places away from the one matching `find`,
/// wrapping around both ends of the list.
///
/// Returns `None` when the list is empty or holds no matching element.
pub fn cyclic_find<T, F>(list: &[T], find: F, shift: i32) -> Option<&T>
where
    F: Fn(&T) -> bool,
{
    let len = list.len() as i32;
    if len == 0 {
        return None;
    }
    let start = list.iter().position(find)? as i32;
    let index = (start + shift).rem_euclid(len);
    list.get(index as usize)
}

#[cfg(test)]
mod tests {
    use super::cyclic_find;

    #[test]
    fn finds_relative_elements_in_both_directions() {
        let list = vec!["north", "east", "south", "west"];
        assert_eq!(cyclic_find(&list, |&e| e == "north", 2), Some(&"south"));
        assert_eq!(cyclic_find(&list, |&e| e == "west", -2), Some(&"east"));
    }

    #[test]
    fn wraps_around_both_ends() {
        let list = vec!["north", "east", "south", "west"];
        assert_eq!(cyclic_find(&list, |&e| e == "west", 1), Some(&"north"));
        assert_eq!(cyclic_find(&list, |&e| e == "north", -1), Some(&"west"));
        assert_eq!(cyclic_find(&list, |&e| e == "north", 9), Some(&"east"));
    }

    #[test]
    fn a_missing_reference_finds_nothing() {
        let list = vec!["north", "east"];
        assert_eq!(cyclic_find(&list, |&e| e == "up", 1), None);
        assert_eq!(cyclic_find::<&str, _>(&[], |_| true, 1), None);
    }
}
