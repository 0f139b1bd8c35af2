//! Static curriculum tables
//!
//! The 360-day plan is organised as five city-building phases. Each phase owns a
//! contiguous day range and a pool of subjects; each subject owns an ordered list
//! of topics. Nothing here is mutable.

use std::ops::RangeInclusive;

/// A contiguous block of curriculum days sharing a theme and subject pool
#[derive(Debug, PartialEq, Eq)]
pub struct Phase {
    /// Display name of the phase
    pub name: &'static str,
    /// First day of the phase (inclusive)
    pub start_day: u32,
    /// Last day of the phase (inclusive, >= start_day)
    pub end_day: u32,
    /// What the imaginary city gets during this phase; fed to the generator
    pub description: &'static str,
    /// Candidate subjects, rotated round-robin by day
    pub subjects: &'static [&'static str],
}

impl Phase {
    /// Check whether `day` falls inside this phase's range
    pub fn contains(&self, day: i64) -> bool {
        day >= i64::from(self.start_day) && day <= i64::from(self.end_day)
    }

    /// Number of days covered by this phase
    pub fn day_count(&self) -> u32 {
        self.end_day - self.start_day + 1
    }

    /// Every day in the phase, in order
    pub fn days(&self) -> RangeInclusive<u32> {
        self.start_day..=self.end_day
    }
}

/// First day of the plan
pub const FIRST_DAY: u32 = 1;

/// Last day of the plan
pub const LAST_DAY: u32 = 360;

/// Topic used when a subject has no entry in [`SUBJECT_TOPICS`]
pub const DEFAULT_TOPIC: &str = "General Engineering";

/// The ordered phases of the plan
pub static PHASES: &[Phase] = &[
    Phase {
        name: "Foundation & Site Prep",
        start_day: 1,
        end_day: 60,
        description: "Geotechnical investigation, surveying the terrain, and laying the groundwork.",
        subjects: &["Surveying", "Soil Mechanics", "Building Materials (Stones, Bricks)"],
    },
    Phase {
        name: "Basic Infrastructure",
        start_day: 61,
        end_day: 120,
        description: "Developing drainage, water supply networks, and primary access roads.",
        subjects: &[
            "Environmental Engineering",
            "Fluid Mechanics",
            "Transportation Engineering (Geometric Design)",
        ],
    },
    Phase {
        name: "Structural Superstructure",
        start_day: 121,
        end_day: 210,
        description: "Rising skylines, residential blocks, and industrial frameworks.",
        subjects: &["RCC Design", "Steel Design", "Theory of Structures", "Concrete Technology"],
    },
    Phase {
        name: "Connectivity & Hydraulics",
        start_day: 211,
        end_day: 300,
        description: "Bridges, complex interchanges, and dam-fed irrigation for the city outskirts.",
        subjects: &[
            "Irrigation Engineering",
            "Bridge Engineering",
            "Highway Materials",
            "Railway Engineering",
        ],
    },
    Phase {
        name: "Management & Valuation",
        start_day: 301,
        end_day: 360,
        description: "Project finishing, cost estimation, and municipal maintenance planning.",
        subjects: &["Estimating, Costing and Valuation", "Construction Management"],
    },
];

/// Subject name -> ordered topics
///
/// Keys are matched exactly. Several phase subjects (e.g. "Steel Design", or
/// "Building Materials (Stones, Bricks)" which differs from the "Building Materials"
/// key) have no entry and resolve to [`DEFAULT_TOPIC`].
pub static SUBJECT_TOPICS: &[(&str, &[&str])] = &[
    (
        "Surveying",
        &[
            "Principles of Surveying",
            "Compass Surveying",
            "Theodolite",
            "Levelling",
            "Contouring",
            "Tacheometry",
            "Curves",
            "GPS/GIS",
        ],
    ),
    (
        "Soil Mechanics",
        &[
            "Origin of Soils",
            "Phase Diagram",
            "Index Properties",
            "Classification",
            "Permeability",
            "Seepage",
            "Effective Stress",
            "Consolidation",
            "Shear Strength",
            "Earth Pressure",
            "Shallow Foundations",
            "Deep Foundations",
        ],
    ),
    (
        "Building Materials",
        &[
            "Physical & Chemical properties of Stones",
            "Bricks",
            "Cement",
            "Asbestos products",
            "Timber",
            "Glass",
            "Varnishes",
            "Plastics",
        ],
    ),
    (
        "RCC Design",
        &[
            "Working Stress Method",
            "Limit State Method",
            "Beams",
            "Slabs",
            "Columns",
            "Footings",
            "Retaining Walls",
        ],
    ),
    (
        "Environmental Engineering",
        &[
            "Water Quality",
            "Purification",
            "Distribution",
            "Sewerage Systems",
            "Sewage Treatment",
            "Air Pollution",
        ],
    ),
    (
        "Hydraulics",
        &[
            "Fluid Properties",
            "Hydrostatic Pressure",
            "Buoyancy",
            "Fluid Kinematics",
            "Orifices",
            "Open Channel Flow",
            "Pumps",
            "Turbines",
        ],
    ),
    (
        "Estimating, Costing and Valuation",
        &[
            "Methods of Estimation",
            "Analysis of Rates",
            "Valuation Concepts",
            "Contracts",
            "Tenders",
        ],
    ),
];

/// Look up the topic list for a subject
pub fn topics_for(subject: &str) -> Option<&'static [&'static str]> {
    SUBJECT_TOPICS
        .iter()
        .find(|(name, _)| *name == subject)
        .map(|(_, topics)| *topics)
}

/// Strict range lookup: the first phase containing `day`, if any
pub fn phase_for_day(day: i64) -> Option<&'static Phase> {
    PHASES.iter().find(|p| p.contains(day))
}
