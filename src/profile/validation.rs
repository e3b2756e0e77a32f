use super::types::StartupProfile;
use std::collections::HashSet;

/// Validate a set of startup profiles loaded from a store.
/// Returns all validation errors at once (not just the first).
pub fn validate_profiles(profiles: &[StartupProfile]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (i, profile) in profiles.iter().enumerate() {
        if profile.id.trim().is_empty() {
            errors.push(format!("startups[{}].id: must not be empty", i));
            continue;
        }
        if !seen_ids.insert(profile.id.as_str()) {
            errors.push(format!(
                "startups[{}].id: duplicate startup id '{}'",
                i, profile.id
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
