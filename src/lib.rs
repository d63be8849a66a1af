//! Minimum-size course selections covering a set of requirement categories.
//!
//! Course selection is posed as a binary integer program: one variable per
//! candidate course, a coverage constraint per requested category, an
//! at-most-one constraint per family of sections of the same course, and the
//! number of selected courses as the objective. Distinct optimal selections
//! are enumerated by re-solving with no-good cuts.
//!
//! ```
//! use hub_select::{Catalog, Course, RequirementCounts, optimize_courses};
//!
//! let catalog = Catalog::new(
//!     vec!["Ethical Reasoning".into(), "Aesthetic Exploration".into()],
//!     vec![
//!         Course::new("CAS PH 150", "Introduction to Ethics").covering("Ethical Reasoning", 1),
//!         Course::new("CAS AR 100", "Drawing").covering("Aesthetic Exploration", 1),
//!     ],
//! );
//! let requirements = RequirementCounts::new()
//!     .with("Ethical Reasoning", 1)
//!     .with("Aesthetic Exploration", 1);
//!
//! let solutions = optimize_courses(&catalog, &requirements, 3).unwrap();
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions[0].len(), 2);
//! ```

pub mod cache;
pub mod config;
pub mod course;
pub mod error;
pub mod export;
pub mod filter;
pub mod load;
pub mod model;
pub mod optimizer;
pub mod requirements;
pub mod solver;

pub use course::{Catalog, Course, CourseCode};
pub use error::CoverError;
pub use filter::ExclusionFilters;
pub use model::Solution;
pub use optimizer::{optimize_courses, optimize_with};
pub use requirements::RequirementCounts;
