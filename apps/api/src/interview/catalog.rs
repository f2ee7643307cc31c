//! Section catalog: the fixed, ordered list of interview sections and the limits
//! that bound a session.

use serde::Serialize;

/// Built-in interview order: (key, label).
const STANDARD_SECTIONS: &[(&str, &str)] = &[
    ("introduction", "Introduction & Background"),
    ("technical", "Technical Skills"),
    ("problem_solving", "Problem Solving"),
    ("teamwork", "Teamwork & Communication"),
    ("career_goals", "Career Goals"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSpec {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub sections: Vec<SectionSpec>,
    pub questions_per_section: usize,
    pub max_questions: usize,
}

impl Catalog {
    pub fn new(
        sections: &[(&str, &str)],
        questions_per_section: usize,
        max_questions: usize,
    ) -> Self {
        Self {
            sections: sections
                .iter()
                .map(|(key, label)| SectionSpec {
                    key: key.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            questions_per_section,
            max_questions,
        }
    }

    pub fn standard(questions_per_section: usize, max_questions: usize) -> Self {
        Self::new(STANDARD_SECTIONS, questions_per_section, max_questions)
    }

    pub fn section(&self, index: usize) -> Option<&SectionSpec> {
        self.sections.get(index)
    }

    /// Index of the section that follows `index`, if any.
    pub fn next_after(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.sections.len()).then_some(next)
    }
}
