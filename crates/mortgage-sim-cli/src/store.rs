use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use mortgage_sim_core::simulation::{SimulationList, SimulationRecord};

/// Saved simulations backed by a single JSON file.
pub struct SimulationStore {
    path: PathBuf,
    list: SimulationList,
}

impl SimulationStore {
    /// Load the store, starting empty when the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let list = if path.exists() {
            let contents = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read store '{}': {}", path.display(), e))?;
            SimulationList::from_json(&contents)
                .map_err(|e| format!("Corrupt store '{}': {}", path.display(), e))?
        } else {
            debug!("store {} not found, starting empty", path.display());
            SimulationList::new()
        };
        Ok(SimulationStore {
            path: path.to_path_buf(),
            list,
        })
    }

    pub fn list(&self) -> &SimulationList {
        &self.list
    }

    pub fn append(&mut self, record: SimulationRecord) -> Result<usize, Box<dyn std::error::Error>> {
        let index = self.list.push(record);
        self.save()?;
        info!("saved simulation {} to {}", index, self.path.display());
        Ok(index)
    }

    pub fn remove(&mut self, index: usize) -> Result<SimulationRecord, Box<dyn std::error::Error>> {
        let removed = self.list.remove(index)?;
        self.save()?;
        info!("removed simulation {} from {}", index, self.path.display());
        Ok(removed)
    }

    fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let json = self.list.to_json()?;
        fs::write(&self.path, json)
            .map_err(|e| format!("Failed to write store '{}': {}", self.path.display(), e))?;
        Ok(())
    }
}
