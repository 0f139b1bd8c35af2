//! Curriculum tables and the day resolver
//!
//! - [`tables`] - static phases and subject topics
//! - [`resolver`] - day -> (phase, subject, topic)
//! - [`check_coverage`] - diagnostics for gaps in the static tables

mod resolver;
mod tables;

pub use resolver::{ResolvedSlot, resolve};
pub use tables::{DEFAULT_TOPIC, FIRST_DAY, LAST_DAY, PHASES, Phase, SUBJECT_TOPICS, phase_for_day, topics_for};

use std::fmt;

use tracing::debug;

/// A problem found in the static curriculum tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageIssue {
    /// Days in the plan range that no phase covers
    Gap { from: u32, to: u32 },
    /// A day claimed by more than one phase
    Overlap { day: u32, first: &'static str, second: &'static str },
    /// A phase subject with no topic entry (resolves to the default topic)
    MissingTopics { phase: &'static str, subject: &'static str },
}

impl CoverageIssue {
    /// Gaps and overlaps change which phase a day resolves to; missing topics don't
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Gap { .. } | Self::Overlap { .. })
    }
}

impl fmt::Display for CoverageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gap { from, to } if from == to => write!(f, "day {} is not covered by any phase", from),
            Self::Gap { from, to } => write!(f, "days {}-{} are not covered by any phase", from, to),
            Self::Overlap { day, first, second } => {
                write!(f, "day {} is claimed by both '{}' and '{}'", day, first, second)
            }
            Self::MissingTopics { phase, subject } => write!(
                f,
                "subject '{}' in '{}' has no topics (uses '{}')",
                subject, phase, DEFAULT_TOPIC
            ),
        }
    }
}

/// Check the static tables against the [FIRST_DAY, LAST_DAY] plan range
///
/// The resolver never depends on this; it only reports what would make the
/// fallback rules kick in.
pub fn check_coverage() -> Vec<CoverageIssue> {
    check_phases(PHASES)
}

fn check_phases(phases: &'static [Phase]) -> Vec<CoverageIssue> {
    debug!(phase_count = phases.len(), "check_phases: called");
    let mut issues = Vec::new();

    let mut gap_start: Option<u32> = None;
    for day in FIRST_DAY..=LAST_DAY {
        let mut owners = phases.iter().filter(|p| p.contains(i64::from(day)));
        match (owners.next(), owners.next()) {
            (None, _) => {
                gap_start.get_or_insert(day);
            }
            (Some(first), second) => {
                if let Some(from) = gap_start.take() {
                    issues.push(CoverageIssue::Gap { from, to: day - 1 });
                }
                if let Some(second) = second {
                    issues.push(CoverageIssue::Overlap {
                        day,
                        first: first.name,
                        second: second.name,
                    });
                }
            }
        }
    }
    if let Some(from) = gap_start {
        issues.push(CoverageIssue::Gap { from, to: LAST_DAY });
    }

    for phase in phases {
        for subject in phase.subjects {
            if topics_for(subject).is_none() {
                issues.push(CoverageIssue::MissingTopics {
                    phase: phase.name,
                    subject,
                });
            }
        }
    }

    debug!(issue_count = issues.len(), "check_phases: done");
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_have_no_structural_issues() {
        let issues = check_coverage();
        assert!(issues.iter().all(|i| !i.is_structural()), "{:?}", issues);
    }

    #[test]
    fn test_builtin_tables_report_missing_topics() {
        let issues = check_coverage();
        assert!(issues.contains(&CoverageIssue::MissingTopics {
            phase: "Structural Superstructure",
            subject: "Steel Design",
        }));
        assert!(!issues.iter().any(|i| matches!(
            i,
            CoverageIssue::MissingTopics {
                subject: "Surveying",
                ..
            }
        )));
    }

    static GAPPY: &[Phase] = &[
        Phase {
            name: "A",
            start_day: 1,
            end_day: 100,
            description: "",
            subjects: &["Surveying"],
        },
        Phase {
            name: "B",
            start_day: 90,
            end_day: 300,
            description: "",
            subjects: &["Surveying"],
        },
    ];

    #[test]
    fn test_check_phases_reports_gaps_and_overlaps() {
        let issues = check_phases(GAPPY);
        assert!(issues.contains(&CoverageIssue::Gap { from: 301, to: 360 }));
        assert!(issues.contains(&CoverageIssue::Overlap {
            day: 90,
            first: "A",
            second: "B"
        }));
        let overlaps = issues.iter().filter(|i| matches!(i, CoverageIssue::Overlap { .. })).count();
        assert_eq!(overlaps, 11);
    }

    #[test]
    fn test_coverage_issue_display() {
        assert_eq!(
            CoverageIssue::Gap { from: 5, to: 5 }.to_string(),
            "day 5 is not covered by any phase"
        );
        assert_eq!(
            CoverageIssue::Gap { from: 301, to: 360 }.to_string(),
            "days 301-360 are not covered by any phase"
        );
    }
}
