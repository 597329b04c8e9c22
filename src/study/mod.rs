use serde::{Deserialize, Serialize};

/// A chapter inside a study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyChapter {
    pub id: String,
    pub name: String,
}

/// A study attached to the analysis, with the chapter currently open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Study {
    pub id: String,
    pub name: String,
    chapters: Vec<StudyChapter>,
    current: usize,
}

impl Study {
    /// A study always carries at least one chapter.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut study = Self {
            id: id.into(),
            name: name.into(),
            chapters: Vec::new(),
            current: 0,
        };
        study.add_chapter("chapter-1", "Chapter 1");
        study
    }

    pub fn add_chapter(&mut self, id: impl Into<String>, name: impl Into<String>) -> usize {
        self.chapters.push(StudyChapter {
            id: id.into(),
            name: name.into(),
        });
        self.current = self.chapters.len() - 1;
        self.current
    }

    pub fn current_chapter(&self) -> &StudyChapter {
        &self.chapters[self.current]
    }

    pub fn switch_chapter(&mut self, idx: usize) -> bool {
        if idx < self.chapters.len() {
            self.current = idx;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_study_opens_on_its_first_chapter() {
        let study = Study::new("st1", "Openings");
        assert_eq!(study.current_chapter().id, "chapter-1");
    }

    #[test]
    fn adding_a_chapter_switches_to_it() {
        let mut study = Study::new("st1", "Openings");
        study.add_chapter("chapter-2", "Sicilian");
        assert_eq!(study.current_chapter().id, "chapter-2");
        assert!(study.switch_chapter(0));
        assert_eq!(study.current_chapter().id, "chapter-1");
        assert!(!study.switch_chapter(5));
    }
}
