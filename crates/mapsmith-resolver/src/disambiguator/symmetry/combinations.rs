use mapsmith_core::TypeIdentifier;
use std::collections::BTreeMap;

/// Every signature made of all `required` fields plus any subset of `optional` ones.
pub fn all_combinations(
    required: &BTreeMap<String, TypeIdentifier>,
    optional: &[(String, TypeIdentifier)],
) -> Vec<BTreeMap<String, TypeIdentifier>> {
    let mut combinations = vec![required.clone()];
    for (name, ty) in optional {
        let extended: Vec<BTreeMap<String, TypeIdentifier>> = combinations
            .iter()
            .map(|combination| {
                let mut combination = combination.clone();
                combination.insert(name.clone(), ty.clone());
                combination
            })
            .collect();
        combinations.extend(extended);
    }
    combinations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_optional_fields_give_four_combinations() {
        let string = TypeIdentifier::class("String");
        let mut required = BTreeMap::new();
        required.insert("a".to_string(), string.clone());
        let optional = vec![("b".to_string(), string.clone()), ("c".to_string(), string)];

        let combinations = all_combinations(&required, &optional);
        let sizes: Vec<usize> = combinations.iter().map(BTreeMap::len).collect();
        assert_eq!(sizes, vec![1, 2, 2, 3]);
        assert!(combinations.iter().all(|c| c.contains_key("a")));
    }

    #[test]
    fn test_without_optional_fields_only_required_remain() {
        let combinations = all_combinations(&BTreeMap::new(), &[]);
        assert_eq!(combinations, vec![BTreeMap::new()]);
    }
}
