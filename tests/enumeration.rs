//! End-to-end checks of the optimizer against exhaustive search on small tables.

use hub_select::model::{SelectedCourse, SolutionEnumerator};
use hub_select::solver::microlp::MicroLpSolver;
use hub_select::{Catalog, Course, ExclusionFilters, RequirementCounts, Solution, optimize_courses};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const CATEGORIES: [&str; 3] = ["Historical Consciousness", "Ethical Reasoning", "Teamwork / Collaboration"];

fn random_catalog(seed: u64, size: usize) -> Catalog {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let courses = (0..size)
        .map(|i| {
            // five families, sections distinguished by a trailing qualifier
            let family: u32 = rng.random_range(0..5);
            let mut course = Course::new(format!("CAS HB {}0{} S{i}", family + 1, family), format!("Course {i}"));
            for category in CATEGORIES {
                if rng.random_range(0..3) == 0 {
                    course = course.covering(category, 1);
                }
            }
            course
        })
        .collect();
    Catalog::new(CATEGORIES.iter().map(|c| c.to_string()).collect(), courses)
}

fn requirements(hist: u32, ethics: u32, team: u32) -> RequirementCounts {
    RequirementCounts::new()
        .with(CATEGORIES[0], hist)
        .with(CATEGORIES[1], ethics)
        .with(CATEGORIES[2], team)
}

fn satisfies(catalog: &Catalog, requirements: &RequirementCounts, selected: &[usize]) -> bool {
    let covered = requirements.iter().all(|(name, count)| {
        if !catalog.has_category(name) {
            return true;
        }
        let total: u32 = selected.iter().map(|&i| catalog.courses[i].coverage_of(name)).sum();
        total >= count
    });
    let mut keys: Vec<String> = selected.iter().map(|&i| catalog.courses[i].code.family_key()).collect();
    keys.sort();
    let before = keys.len();
    keys.dedup();
    covered && keys.len() == before
}

/// Size of the smallest valid selection that is not a superset of any earlier one.
fn brute_force_min(catalog: &Catalog, requirements: &RequirementCounts, earlier: &[Solution]) -> Option<usize> {
    let n = catalog.len();
    (0u32..(1 << n))
        .map(|mask| (0..n).filter(|i| mask & (1 << i) != 0).collect::<Vec<usize>>())
        .filter(|subset| satisfies(catalog, requirements, subset))
        .filter(|subset| !earlier.iter().any(|p| p.indices.iter().all(|i| subset.contains(i))))
        .map(|subset| subset.len())
        .min()
}

fn check_run(catalog: &Catalog, requirements: &RequirementCounts, max_solutions: usize) -> Vec<Solution> {
    let found = optimize_courses(catalog, requirements, max_solutions).unwrap();
    assert!(found.len() <= max_solutions);

    for (k, solution) in found.iter().enumerate() {
        assert!(satisfies(catalog, requirements, &solution.indices), "solution {k} is invalid");
        assert_eq!(
            Some(solution.len()),
            brute_force_min(catalog, requirements, &found[..k]),
            "solution {k} is not minimal"
        );
        for earlier in &found[..k] {
            assert_ne!(earlier.indices, solution.indices, "solution {k} repeats an earlier one");
        }
        let labels: Vec<String> = solution.indices.iter().map(|&i| catalog.courses[i].label()).collect();
        assert_eq!(labels, solution.courses);
        let codes: Vec<&str> = solution.selected.iter().map(|c| c.code.as_str()).collect();
        let expected: Vec<&str> = solution.indices.iter().map(|&i| catalog.courses[i].code.as_str()).collect();
        assert_eq!(codes, expected);
    }

    // stopped early only because nothing else was admissible
    if found.len() < max_solutions {
        assert_eq!(brute_force_min(catalog, requirements, &found), None);
    }
    found
}

#[test]
fn random_tables_match_exhaustive_search() {
    for seed in 1..=12u64 {
        let catalog = random_catalog(seed * 7919, 8);
        for (h, e, t) in [(1, 1, 1), (2, 1, 0), (0, 2, 2), (3, 3, 3)] {
            check_run(&catalog, &requirements(h, e, t), 4);
        }
    }
}

#[test]
fn feasible_with_one_requested_gives_exactly_one() {
    let catalog = random_catalog(42, 8);
    let requirements = requirements(1, 0, 0);
    if brute_force_min(&catalog, &requirements, &[]).is_some() {
        assert_eq!(check_run(&catalog, &requirements, 1).len(), 1);
    }
}

#[test]
fn sections_of_one_course_are_mutually_exclusive() {
    let catalog = Catalog::new(
        vec!["X".into(), "Y".into()],
        vec![
            Course::new("CAS AA 101", "A1").covering("X", 1),
            Course::new("CAS AA 101 B", "A2").covering("X", 1),
            Course::new("CAS BB 201", "B1").covering("Y", 1),
        ],
    );
    let requirements = RequirementCounts::new().with("X", 1).with("Y", 1);

    let found = check_run(&catalog, &requirements, 10);
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|s| s.indices != vec![0, 1, 2]));
}

#[test]
fn all_zero_requirements_select_the_empty_set() {
    let catalog = Catalog::new(vec!["X".into()], vec![Course::new("CAS ZZ 100", "Nothing")]);
    let found = optimize_courses(&catalog, &RequirementCounts::new().with("X", 0), 1).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].is_empty());
    assert!(found[0].courses.is_empty());
}

#[test]
fn empty_candidate_set_has_no_solutions() {
    let catalog = Catalog::new(vec!["X".into()], Vec::new());
    let found = optimize_courses(&catalog, &RequirementCounts::new().with("X", 0), 5).unwrap();
    assert!(found.is_empty());
}

#[test]
fn requirement_beyond_available_coverage_is_infeasible() {
    let catalog = random_catalog(3, 6);
    let available: u32 = catalog.courses.iter().map(|c| c.coverage_of(CATEGORIES[1])).sum();
    let found = optimize_courses(&catalog, &requirements(0, available + 1, 0), 3).unwrap();
    assert!(found.is_empty());
}

#[test]
fn unknown_categories_are_ignored() {
    let catalog = random_catalog(11, 6);
    let plain = optimize_courses(&catalog, &requirements(1, 1, 0), 1).unwrap();
    let noisy = optimize_courses(
        &catalog,
        &requirements(1, 1, 0).with("Not A Column", 9),
        1,
    )
    .unwrap();
    assert_eq!(plain, noisy);
}

#[test]
fn single_solution_runs_are_repeatable() {
    let catalog = random_catalog(5, 8);
    let requirements = requirements(1, 1, 1);
    let first = optimize_courses(&catalog, &requirements, 1).unwrap();
    let second = optimize_courses(&catalog, &requirements, 1).unwrap();
    assert_eq!(first, second);
}

#[test]
fn filters_run_before_the_optimizer() {
    let catalog = Catalog::new(
        vec!["X".into()],
        vec![
            Course::new("SAR HS 300", "Health").covering("X", 1),
            Course::new("CAS HI 200", "History").covering("X", 1),
        ],
    );
    let filters = ExclusionFilters {
        departments: vec!["SAR".into()],
        ..Default::default()
    };
    let found = optimize_courses(&filters.apply(&catalog), &RequirementCounts::new().with("X", 1), 5).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].courses, vec!["CAS HI 200 - History"]);
}

#[test]
fn enumerator_keeps_variable_identities_across_cuts() {
    use hub_select::model::{ExclusionGroups, RequirementMatrix, build_model};

    let catalog = random_catalog(17, 7);
    let requirements = requirements(1, 1, 0);
    let matrix = RequirementMatrix::build(&catalog, &requirements);
    let model = build_model(&matrix, &ExclusionGroups::build(&catalog));
    let original = model.constraints().len();

    let candidates = catalog.courses.iter().map(SelectedCourse::from).collect();
    let mut solver = MicroLpSolver;
    let mut enumerator = SolutionEnumerator::new(model, candidates, &mut solver, 3);
    let mut seen = Vec::new();
    while let Some(solution) = enumerator.step().unwrap() {
        seen.push(solution.indices.clone());
    }

    let model = enumerator.model();
    assert_eq!(model.num_vars(), catalog.len());
    assert_eq!(model.constraints().len(), original + seen.len());
    for (cut, selected) in model.constraints()[original..].iter().zip(&seen) {
        let vars: Vec<usize> = cut.terms.iter().map(|(v, _)| *v).collect();
        assert_eq!(&vars, selected);
    }
}
