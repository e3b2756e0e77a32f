use super::ProfileStore;
use crate::profile::{validate_profiles, StartupProfile};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ProfileDocument {
    #[serde(default)]
    startups: Vec<StartupProfile>,
}

/// Startup profiles read from a JSON document of the form
/// `{ "startups": [ ... ] }` and served from memory.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    profiles: HashMap<String, StartupProfile>,
}

impl JsonProfileStore {
    /// Read, normalize and validate all profiles in `path`
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open profile file at {}", path.display()))?;
        let document: ProfileDocument = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse profiles in {}", path.display()))?;

        let profiles = index_profiles(document.startups)
            .with_context(|| format!("Invalid profiles in {}", path.display()))?;
        tracing::debug!(count = profiles.len(), path = %path.display(), "loaded startup profiles");

        Ok(Self { profiles })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileStore for JsonProfileStore {
    fn find_startup(&self, startup_id: &str) -> Result<Option<StartupProfile>> {
        Ok(self.profiles.get(startup_id).cloned())
    }
}

/// In-memory profile store
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: HashMap<String, StartupProfile>,
}

impl MemoryProfileStore {
    pub fn new(profiles: Vec<StartupProfile>) -> Result<Self> {
        Ok(Self {
            profiles: index_profiles(profiles)?,
        })
    }
}

impl ProfileStore for MemoryProfileStore {
    fn find_startup(&self, startup_id: &str) -> Result<Option<StartupProfile>> {
        Ok(self.profiles.get(startup_id).cloned())
    }
}

/// Read a single startup profile from a JSON file
pub fn read_profile(path: &Path) -> Result<StartupProfile> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open profile file at {}", path.display()))?;
    let profile: StartupProfile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse profile in {}", path.display()))?;
    Ok(profile.normalize())
}

fn index_profiles(profiles: Vec<StartupProfile>) -> Result<HashMap<String, StartupProfile>> {
    let profiles: Vec<_> = profiles.into_iter().map(StartupProfile::normalize).collect();
    if let Err(errors) = validate_profiles(&profiles) {
        anyhow::bail!("{}", errors.join("; "));
    }
    Ok(profiles.into_iter().map(|p| (p.id.clone(), p)).collect())
}
