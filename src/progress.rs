//! Self-check progress: which checklist items a student has ticked per exercise.

use crate::error::Result;
use crate::library::Exercise;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Checklist item index to ticked.
pub type ChecklistState = BTreeMap<usize, bool>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub exercise_id: String,
    pub checklist_data: ChecklistState,
    pub last_practiced: DateTime<Utc>,
    pub completed_items: usize,
}

impl ProgressRecord {
    /// Stamps `checklist` with the current time.
    pub fn new(exercise_id: &str, checklist: ChecklistState) -> Self {
        let completed_items = checklist.values().filter(|done| **done).count();
        Self {
            exercise_id: exercise_id.to_owned(),
            checklist_data: checklist,
            last_practiced: Utc::now(),
            completed_items,
        }
    }
}

/// Where progress records live between runs.
pub trait ProgressStore {
    fn save(&mut self, record: &ProgressRecord) -> Result<()>;

    /// `None` when nothing usable has been stored for `exercise_id`.
    fn load(&self, exercise_id: &str) -> Result<Option<ProgressRecord>>;
}

pub fn default_progress_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("drum_tutor")
}

/// One `exercise_progress_<id>.json` file per exercise.
#[derive(Debug, Clone)]
pub struct JsonProgressStore {
    dir: PathBuf,
}

impl JsonProgressStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, exercise_id: &str) -> PathBuf {
        self.dir.join(format!("exercise_progress_{}.json", exercise_id))
    }
}

impl Default for JsonProgressStore {
    fn default() -> Self {
        Self::new(default_progress_dir())
    }
}

impl ProgressStore for JsonProgressStore {
    fn save(&mut self, record: &ProgressRecord) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&record.exercise_id);
        fs::write(&path, serde_json::to_string_pretty(record)?)?;
        debug!("Saved progress to '{}'..!", path.display());
        Ok(())
    }

    fn load(&self, exercise_id: &str) -> Result<Option<ProgressRecord>> {
        let path = self.path_for(exercise_id);
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path)?;
        match serde_json::from_str(&text) {
            Ok(record) => Ok(Some(record)),
            Err(why) => {
                warn!("Ignoring unreadable progress file '{}' | why: {:?}", path.display(), why);
                Ok(None)
            }
        }
    }
}

/// Keeps records for the lifetime of the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryProgressStore {
    records: HashMap<String, ProgressRecord>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn save(&mut self, record: &ProgressRecord) -> Result<()> {
        self.records.insert(record.exercise_id.clone(), record.clone());
        Ok(())
    }

    fn load(&self, exercise_id: &str) -> Result<Option<ProgressRecord>> {
        Ok(self.records.get(exercise_id).cloned())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgress {
    pub exercise_id: String,
    pub completed_items: usize,
    pub total_items: usize,
    pub last_practiced: Option<DateTime<Utc>>,
    pub percentage: u32,
}

impl ExerciseProgress {
    pub fn is_started(&self) -> bool {
        self.completed_items > 0
    }

    pub fn is_complete(&self) -> bool {
        self.total_items > 0 && self.completed_items >= self.total_items
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProgressSummary {
    pub total: usize,
    pub started: usize,
    pub completed: usize,
    pub exercises: Vec<ExerciseProgress>,
}

pub fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 * 100.0 / total as f64).round() as u32
}

/// Folds stored records over the curriculum. Unreadable records count as untouched.
pub fn summarize<P: ProgressStore + ?Sized>(store: &P, exercises: &[Exercise]) -> ProgressSummary {
    let exercises: Vec<ExerciseProgress> = exercises
        .iter()
        .map(|exercise| {
            let record = store.load(exercise.id).unwrap_or_else(|why| {
                warn!("Failed to load progress for {} | why: {:?}", exercise.id, why);
                None
            });
            let total_items = exercise.checklist_items.len();
            let completed_items = record.as_ref().map_or(0, |r| {
                r.checklist_data
                    .iter()
                    .filter(|(item, done)| **done && **item < total_items)
                    .count()
            });

            ExerciseProgress {
                exercise_id: exercise.id.to_owned(),
                completed_items,
                total_items,
                last_practiced: record.map(|r| r.last_practiced),
                percentage: percentage(completed_items, total_items),
            }
        })
        .collect();

    ProgressSummary {
        total: exercises.len(),
        started: exercises.iter().filter(|e| e.is_started()).count(),
        completed: exercises.iter().filter(|e| e.is_complete()).count(),
        exercises,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::library::PatternLibrary;

    fn ticked(items: &[usize]) -> ChecklistState {
        items.iter().map(|i| (*i, true)).collect()
    }

    #[test]
    fn json_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonProgressStore::new(dir.path());
        let mut checklist = ticked(&[0, 2]);
        checklist.insert(1, false);

        store.save(&ProgressRecord::new("paradiddle", checklist.clone())).unwrap();
        assert!(dir.path().join("exercise_progress_paradiddle.json").exists());

        let loaded = store.load("paradiddle").unwrap().unwrap();
        assert_eq!(loaded.checklist_data, checklist);
        assert_eq!(loaded.completed_items, 2);
        assert!(store.load("flam").unwrap().is_none());
    }

    #[test]
    fn files_use_camel_case_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonProgressStore::new(dir.path());
        store.save(&ProgressRecord::new("waltz", ticked(&[0]))).unwrap();

        let text = fs::read_to_string(dir.path().join("exercise_progress_waltz.json")).unwrap();
        for key in ["exerciseId", "checklistData", "lastPracticed", "completedItems"] {
            assert!(text.contains(key), "missing {}", key);
        }
    }

    #[test]
    fn corrupt_file_reads_as_absent() {
        env_logger::try_init().unwrap_or(());
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("exercise_progress_drag.json"), "{ not json").unwrap();

        let store = JsonProgressStore::new(dir.path());
        assert!(store.load("drag").unwrap().is_none());
    }

    #[test]
    fn summary_counts_started_and_completed() {
        let library = PatternLibrary::new();
        let mut store = MemoryProgressStore::new();
        // four checklist items
        store.save(&ProgressRecord::new("single-stroke", ticked(&[0, 1, 2, 3]))).unwrap();
        store.save(&ProgressRecord::new("waltz", ticked(&[1]))).unwrap();

        let summary = summarize(&store, library.exercises());
        assert_eq!(summary.total, 16);
        assert_eq!(summary.started, 2);
        assert_eq!(summary.completed, 1);

        let waltz = summary.exercises.iter().find(|e| e.exercise_id == "waltz").unwrap();
        assert_eq!(waltz.percentage, 25);
        assert!(waltz.last_practiced.is_some());

        let flam = summary.exercises.iter().find(|e| e.exercise_id == "flam").unwrap();
        assert_eq!(flam.percentage, 0);
        assert_eq!(flam.last_practiced, None);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 0), 0);
    }
}
