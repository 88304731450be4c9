//! Task Catalog

use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One difficulty level and its tasks, in serving order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogLevel {
    pub name: String,
    pub tasks: Vec<String>,
}

impl CatalogLevel {
    pub fn new(name: impl Into<String>, tasks: &[&str]) -> Self {
        Self {
            name: name.into(),
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Ordered difficulty levels, easiest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CatalogLevel>", into = "Vec<CatalogLevel>")]
pub struct TaskCatalog {
    levels: Vec<CatalogLevel>,
}

impl TryFrom<Vec<CatalogLevel>> for TaskCatalog {
    type Error = CatalogError;

    fn try_from(levels: Vec<CatalogLevel>) -> Result<Self, Self::Error> {
        TaskCatalog::new(levels)
    }
}

impl From<TaskCatalog> for Vec<CatalogLevel> {
    fn from(catalog: TaskCatalog) -> Self {
        catalog.levels
    }
}

impl TaskCatalog {
    /// Create a catalog; levels must be unique and non-empty
    pub fn new(levels: Vec<CatalogLevel>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for level in &levels {
            if level.tasks.is_empty() {
                return Err(CatalogError::EmptyLevel(level.name.clone()));
            }
            if !seen.insert(level.name.as_str()) {
                return Err(CatalogError::DuplicateLevel(level.name.clone()));
            }
        }

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[CatalogLevel] {
        &self.levels
    }

    pub fn level_names(&self) -> Vec<String> {
        self.levels.iter().map(|l| l.name.clone()).collect()
    }

    pub fn tasks(&self, level: &str) -> Option<&[String]> {
        self.levels
            .iter()
            .find(|l| l.name == level)
            .map(|l| l.tasks.as_slice())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for TaskCatalog {
    /// Speaking prompts for the five canonical levels
    fn default() -> Self {
        Self {
            levels: vec![
                CatalogLevel::new(
                    "simple",
                    &[
                        "Practice introducing yourself and sharing a few facts about yourself.",
                        "Describe a typical day in your life and what you usually do.",
                        "Practice a short conversation about a simple topic.",
                    ],
                ),
                CatalogLevel::new(
                    "easy",
                    &[
                        "Talk about a recent experience or special event you attended.",
                        "Pretend you need to ask for information. Practice what you would say.",
                        "Give simple instructions for completing a task or solving a problem.",
                    ],
                ),
                CatalogLevel::new(
                    "standard",
                    &[
                        "Talk about your daily schedule and mention any times when it changes.",
                        "Describe a personal experience and highlight the best moments of it.",
                        "Pretend you're planning a small event. Explain what it is and how you would organize it.",
                    ],
                ),
                CatalogLevel::new(
                    "hard",
                    &[
                        "Discuss your opinion on a topic that interests you and explain your reasons in detail.",
                        "Talk about a significant event in your life and explain how it changed your perspective.",
                        "Compare and contrast two ideas, such as living in a city versus the countryside, and explain which you prefer and why.",
                    ],
                ),
                CatalogLevel::new(
                    "complex",
                    &[
                        "Pretend you are hosting a Q&A session. Answer questions about a topic you are knowledgeable about in a clear and concise manner.",
                        "Analyze a fictional or real scenario, describe the problem, and propose a detailed solution with justifications.",
                        "Participate in a debate, and share your perspective about the topic.",
                    ],
                ),
            ],
        }
    }
}
