//! Field-type equivalence used when matching serializers against deserializers.
//!
//! Two types mirror each other when they are equal, or when both are
//! collections/arrays over the same element type (`List<T>` mirrors `T[]`).

use crate::naming::TypeIdentifier;
use indexmap::IndexMap;

pub fn mirrors(a: &TypeIdentifier, b: &TypeIdentifier) -> bool {
    match (a.is_virtual(), b.is_virtual()) {
        (true, true) => return a == b,
        (true, false) | (false, true) => return false,
        (false, false) => {}
    }
    match (a.collection_component(), b.collection_component()) {
        (Some(component_a), Some(component_b)) => component_a == component_b,
        _ => a == b,
    }
}

/// Same field names with pairwise mirroring types.
pub fn mirrors_fields(a: &IndexMap<String, TypeIdentifier>, b: &IndexMap<String, TypeIdentifier>) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(name, ty)| b.get(name).is_some_and(|other| mirrors(ty, other)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(s: &str) -> TypeIdentifier {
        TypeIdentifier::parse(s).unwrap()
    }

    #[rstest]
    #[case("String", "String", true)]
    #[case("String", "int", false)]
    #[case("List<String>", "String[]", true)]
    #[case("Set<String>", "List<String>", true)]
    #[case("List<String>", "List<int>", false)]
    #[case("List<String>", "String", false)]
    #[case("virtual:A", "virtual:A", true)]
    #[case("virtual:A", "A", false)]
    fn test_mirrors(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
        assert_eq!(mirrors(&parse(a), &parse(b)), expected);
        assert_eq!(mirrors(&parse(b), &parse(a)), expected);
    }

    #[test]
    fn test_mirrors_fields_ignores_order() {
        let mut a = IndexMap::new();
        a.insert("x".to_string(), parse("List<String>"));
        a.insert("y".to_string(), parse("int"));
        let mut b = IndexMap::new();
        b.insert("y".to_string(), parse("int"));
        b.insert("x".to_string(), parse("String[]"));
        assert!(mirrors_fields(&a, &b));

        b.insert("z".to_string(), parse("int"));
        assert!(!mirrors_fields(&a, &b));
    }
}
