use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A single exercise prompt, e.g. "Push-ups x10".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exercise(String);

impl Exercise {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Exercise {
    fn from(text: &str) -> Self {
        Exercise(text.to_string())
    }
}

impl From<String> for Exercise {
    fn from(text: String) -> Self {
        Exercise(text)
    }
}

impl Display for Exercise {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user-editable exercise list, in insertion order.
pub struct ExerciseList {
    entries: Vec<Exercise>,
}

impl ExerciseList {
    pub fn new(entries: Vec<Exercise>) -> ExerciseList {
        ExerciseList { entries }
    }

    /// Appends `text` with surrounding whitespace trimmed.
    /// Blank input leaves the list untouched and returns `false`.
    pub fn add(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.entries.push(Exercise::from(trimmed));
        true
    }

    /// Removes the entry at `index`, keeping the order of the rest.
    /// An out-of-bounds index leaves the list untouched and returns `false`.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        true
    }

    /// Wholesale replacement, used when restoring a saved list.
    pub fn replace_all(&mut self, entries: Vec<Exercise>) {
        self.entries = entries;
    }

    /// Draws one entry uniformly at random, or `None` for an empty list.
    /// Draws are memoryless, so repeats are possible.
    pub fn select_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Exercise> {
        self.entries.choose(rng).cloned()
    }

    pub fn entries(&self) -> &[Exercise] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Exercise> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ExerciseList {
    fn default() -> ExerciseList {
        ExerciseList::new(
            [
                "Push-ups x10",
                "Squats x15",
                "Jumping jacks x30",
                "Plank 30 seconds",
                "Lunges x10 each leg",
                "Crunches x15",
                "Mountain climbers x20",
            ]
            .into_iter()
            .map(Exercise::from)
            .collect(),
        )
    }
}
