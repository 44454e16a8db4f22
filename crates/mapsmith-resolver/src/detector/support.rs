//! Types that automatic detection refuses to analyze.

use crate::introspection::TypeDescription;
use mapsmith_core::TypeIdentifier;

/// Checks that only need the identifier.
pub fn unsupported_identifier(ty: &TypeIdentifier) -> Option<String> {
    if ty.contains_wildcard() {
        return Some(format!(
            "type '{}' is not supported because it contains wildcard generics (\"?\")",
            ty.description()
        ));
    }
    if ty.is_virtual() {
        return Some(format!(
            "type '{}' cannot be detected because it is virtual (you can still register it manually)",
            ty.description()
        ));
    }
    None
}

/// Checks on the introspected modifiers, in a fixed order.
pub fn unsupported_description(ty: &TypeIdentifier, description: &TypeDescription) -> Option<String> {
    let modifiers = &description.modifiers;
    let what = if modifiers.annotation {
        "it is an annotation"
    } else if modifiers.anonymous {
        "it is an anonymous class"
    } else if modifiers.local {
        "it is a local class"
    } else if modifiers.inner_non_static {
        "it is a non-static inner class"
    } else if !modifiers.public {
        "it is not public"
    } else {
        return None;
    };
    Some(format!(
        "type '{}' cannot be detected because {} (you can still register it manually)",
        ty.description(),
        what
    ))
}
