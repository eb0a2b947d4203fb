use awbrecon_io::Artifact;

/// The most recent comparison's downloadable tables.
///
/// Replaced wholesale on each successful compare, behind one lock, so a
/// concurrent download never observes one old and one new table.
#[derive(Default)]
pub struct ArtifactStore {
    artifacts: Vec<Artifact>,
}

impl ArtifactStore {
    pub fn replace(&mut self, artifacts: Vec<Artifact>) {
        self.artifacts = artifacts;
    }

    pub fn get(&self, filename: &str) -> Option<Artifact> {
        self.artifacts
            .iter()
            .find(|a| a.filename == filename)
            .cloned()
    }
}
