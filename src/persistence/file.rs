use super::{PersistenceError, PersistenceResult, SlotStore};
use crate::instance::{ScheduledTaskInstance, TaskKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Stores each slot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> PersistenceResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, key: &str) -> PersistenceResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistenceError::InvalidData(format!(
                "invalid slot key '{key}'"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SlotStore for JsonFileStore {
    fn read_slot(&self, key: &str) -> PersistenceResult<Option<String>> {
        let path = self.slot_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write_slot(&self, key: &str, json: &str) -> PersistenceResult<()> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct InstanceCsvRecord {
    id: String,
    name: String,
    category: String,
    kind: String,
    high_effort: bool,
    color_tag: String,
    date: String,
    source_assignment_id: String,
    done: bool,
}

impl From<&ScheduledTaskInstance> for InstanceCsvRecord {
    fn from(instance: &ScheduledTaskInstance) -> Self {
        Self {
            id: instance.id.clone(),
            name: instance.name.clone(),
            category: instance.category.clone(),
            kind: instance.kind.as_str().to_string(),
            high_effort: instance.high_effort,
            color_tag: instance.color_tag.clone(),
            date: instance.date.format("%Y-%m-%d").to_string(),
            source_assignment_id: instance.source_assignment_id.clone(),
            done: instance.done,
        }
    }
}

impl InstanceCsvRecord {
    fn into_instance(self) -> PersistenceResult<ScheduledTaskInstance> {
        let kind = self
            .kind
            .trim()
            .parse::<TaskKind>()
            .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|e| {
            PersistenceError::InvalidData(format!("invalid date '{}': {e}", self.date))
        })?;
        Ok(ScheduledTaskInstance {
            id: self.id,
            name: self.name,
            category: self.category,
            kind,
            high_effort: self.high_effort,
            color_tag: self.color_tag,
            date,
            source_assignment_id: self.source_assignment_id,
            done: self.done,
        })
    }
}

pub fn save_instances_to_csv<P: AsRef<Path>>(
    instances: &[ScheduledTaskInstance],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for instance in instances {
        writer.serialize(InstanceCsvRecord::from(instance))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_instances_from_csv<P: AsRef<Path>>(
    path: P,
) -> PersistenceResult<Vec<ScheduledTaskInstance>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut instances = Vec::new();
    for record in reader.deserialize::<InstanceCsvRecord>() {
        instances.push(record?.into_instance()?);
    }
    Ok(instances)
}
