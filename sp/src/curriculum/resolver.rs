//! Day resolver
//!
//! Maps a day number to its curriculum slot (phase, subject, topic). The mapping
//! is a pure function of the day and the static tables: subjects and topics are
//! both picked round-robin with `day mod len`.

use tracing::trace;

use super::tables::{DEFAULT_TOPIC, PHASES, Phase, topics_for};

/// One-element topic list used when a subject has no topic entry
static DEFAULT_TOPICS: &[&str] = &[DEFAULT_TOPIC];

/// The resolved (phase, subject, topic) triple for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlot {
    /// The day that was resolved
    pub day: i64,
    /// Phase whose range contains the day (or the first phase as a fallback)
    pub phase: &'static Phase,
    /// Subject drawn from the phase's subject list
    pub subject: &'static str,
    /// Topic drawn from the subject's topic list
    pub topic: &'static str,
}

/// Round-robin pick; `rem_euclid` keeps negative days in bounds
fn pick<'a>(items: &[&'a str], day: i64) -> &'a str {
    let idx = day.rem_euclid(items.len() as i64) as usize;
    items[idx]
}

/// Resolve a day to its curriculum slot
///
/// Any integer is accepted. Days outside every phase fall back to the first
/// phase, and subjects without topics fall back to "General Engineering", so
/// this never fails.
pub fn resolve(day: i64) -> ResolvedSlot {
    let phase = PHASES.iter().find(|p| p.contains(day)).unwrap_or(&PHASES[0]);
    let subject = pick(phase.subjects, day);
    let topics = topics_for(subject).unwrap_or(DEFAULT_TOPICS);
    let topic = pick(topics, day);
    trace!(day, phase = phase.name, subject, topic, "resolve: resolved");

    ResolvedSlot {
        day,
        phase,
        subject,
        topic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::{FIRST_DAY, LAST_DAY};
    use proptest::prelude::*;

    #[test]
    fn test_resolve_day_one() {
        let slot = resolve(1);
        assert_eq!(slot.phase.name, "Foundation & Site Prep");
        assert_eq!(slot.subject, "Soil Mechanics");
        assert_eq!(slot.topic, "Phase Diagram");
    }

    #[test]
    fn test_resolve_uses_topic_rotation() {
        // 3 mod 3 == 0 -> Surveying, 3 mod 8 == 3 -> Levelling
        let slot = resolve(3);
        assert_eq!(slot.subject, "Surveying");
        assert_eq!(slot.topic, "Levelling");

        // 63 mod 3 == 0 -> Environmental Engineering, 63 mod 6 == 3
        let slot = resolve(63);
        assert_eq!(slot.phase.name, "Basic Infrastructure");
        assert_eq!(slot.subject, "Environmental Engineering");
        assert_eq!(slot.topic, "Sewerage Systems");

        // 302 mod 2 == 0, 302 mod 5 == 2
        let slot = resolve(302);
        assert_eq!(slot.subject, "Estimating, Costing and Valuation");
        assert_eq!(slot.topic, "Valuation Concepts");
    }

    #[test]
    fn test_resolve_subject_without_topics_uses_default() {
        let slot = resolve(2);
        assert_eq!(slot.subject, "Building Materials (Stones, Bricks)");
        assert_eq!(slot.topic, DEFAULT_TOPIC);

        let slot = resolve(121);
        assert_eq!(slot.subject, "Steel Design");
        assert_eq!(slot.topic, DEFAULT_TOPIC);
    }

    #[test]
    fn test_resolve_out_of_range_falls_back_to_first_phase() {
        let slot = resolve(0);
        assert_eq!(slot.phase.name, PHASES[0].name);
        assert_eq!(slot.subject, "Surveying");
        assert_eq!(slot.topic, "Principles of Surveying");

        let slot = resolve(361);
        assert_eq!(slot.phase.name, PHASES[0].name);
        assert_eq!(slot.subject, "Soil Mechanics");
    }

    #[test]
    fn test_resolve_negative_day_stays_in_bounds() {
        // -5 rem_euclid 3 == 1, -5 rem_euclid 12 == 7
        let slot = resolve(-5);
        assert_eq!(slot.phase.name, PHASES[0].name);
        assert_eq!(slot.subject, "Soil Mechanics");
        assert_eq!(slot.topic, "Consolidation");
    }

    #[test]
    fn test_resolve_phase_boundaries() {
        assert_eq!(resolve(60).phase.name, "Foundation & Site Prep");
        assert_eq!(resolve(61).phase.name, "Basic Infrastructure");
        assert_eq!(resolve(210).phase.name, "Structural Superstructure");
        assert_eq!(resolve(211).phase.name, "Connectivity & Hydraulics");
        assert_eq!(resolve(360).phase.name, "Management & Valuation");
    }

    proptest! {
        #[test]
        fn prop_every_plan_day_resolves_inside_its_phase(day in FIRST_DAY..=LAST_DAY) {
            let slot = resolve(i64::from(day));
            prop_assert!(slot.phase.contains(i64::from(day)));
            prop_assert!(slot.phase.subjects.contains(&slot.subject));
            prop_assert!(!slot.topic.is_empty());
        }

        #[test]
        fn prop_resolve_is_deterministic(day in any::<i64>()) {
            prop_assert_eq!(resolve(day), resolve(day));
        }

        #[test]
        fn prop_subjects_rotate_within_phase(day in FIRST_DAY..=LAST_DAY) {
            let slot = resolve(i64::from(day));
            let k = slot.phase.subjects.len() as u32;
            if slot.phase.contains(i64::from(day + k)) {
                prop_assert_eq!(slot.subject, resolve(i64::from(day + k)).subject);
            }
        }

        #[test]
        fn prop_missing_topics_always_default(day in FIRST_DAY..=LAST_DAY) {
            let slot = resolve(i64::from(day));
            if topics_for(slot.subject).is_none() {
                prop_assert_eq!(slot.topic, DEFAULT_TOPIC);
            }
        }
    }
}
