use super::model_context::LinearModel;
use crate::course::{Course, CourseCode};
use crate::error::CoverError;
use crate::solver::{IlpSolver, SolveOutcome};
use tracing::{debug, info};

/// Code and title of a candidate, as reported in solutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCourse {
    pub code: CourseCode,
    pub title: String,
}

impl SelectedCourse {
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.title)
    }
}

impl From<&Course> for SelectedCourse {
    fn from(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            title: course.title.clone(),
        }
    }
}

/// One minimal selection of courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Selected candidate indices, ascending.
    pub indices: Vec<usize>,
    /// `Code - Title` for each selected index, same order.
    pub courses: Vec<String>,
    /// Code and title for each selected index, same order.
    pub selected: Vec<SelectedCourse>,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumeratorState {
    Running,
    Done,
}

/// Repeated solve / cut loop collecting up to `max_solutions` distinct optima.
pub struct SolutionEnumerator<'s, S: IlpSolver + ?Sized> {
    model: LinearModel,
    candidates: Vec<SelectedCourse>,
    solver: &'s mut S,
    max_solutions: usize,
    state: EnumeratorState,
    found: Vec<Solution>,
}

impl<'s, S: IlpSolver + ?Sized> SolutionEnumerator<'s, S> {
    /// `candidates[i]` is the course behind variable `i`.
    pub fn new(
        model: LinearModel,
        candidates: Vec<SelectedCourse>,
        solver: &'s mut S,
        max_solutions: usize,
    ) -> Self {
        debug_assert_eq!(model.num_vars(), candidates.len());
        let state = if max_solutions == 0 || model.num_vars() == 0 {
            EnumeratorState::Done
        } else {
            EnumeratorState::Running
        };
        Self {
            model,
            candidates,
            solver,
            max_solutions,
            state,
            found: Vec::new(),
        }
    }

    pub fn state(&self) -> EnumeratorState {
        self.state
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.found
    }

    /// One solve. Returns the new solution, or `None` once the run is done.
    pub fn step(&mut self) -> Result<Option<&Solution>, CoverError> {
        if self.state == EnumeratorState::Done {
            return Ok(None);
        }

        let assignment = match self.solver.solve(&self.model)? {
            SolveOutcome::Infeasible => {
                debug!(
                    event = "solve_infeasible",
                    cuts = self.model.num_cuts(),
                    found = self.found.len(),
                );
                self.state = EnumeratorState::Done;
                return Ok(None);
            }
            SolveOutcome::Optimal(assignment) => assignment,
        };

        if !self.model.is_satisfied_by(&assignment) {
            return Err(CoverError::malfunction(
                self.solver.name(),
                "returned an assignment that violates the model",
            ));
        }

        let indices: Vec<usize> = assignment
            .iter()
            .enumerate()
            .filter(|(_, selected)| **selected)
            .map(|(i, _)| i)
            .collect();
        debug!(
            event = "solution_found",
            size = indices.len(),
            cuts = self.model.num_cuts(),
        );

        self.model.add_no_good_cut(&indices);
        let selected: Vec<SelectedCourse> = indices.iter().map(|&i| self.candidates[i].clone()).collect();
        let courses = selected.iter().map(SelectedCourse::label).collect();
        self.found.push(Solution {
            indices,
            courses,
            selected,
        });

        if self.found.len() >= self.max_solutions {
            self.state = EnumeratorState::Done;
        }
        Ok(self.found.last())
    }

    /// Step until done and hand back everything found, in discovery order.
    pub fn run(mut self) -> Result<Vec<Solution>, CoverError> {
        while self.step()?.is_some() {}
        info!(
            event = "enumeration_end",
            solutions = self.found.len(),
            max_solutions = self.max_solutions,
        );
        Ok(self.found)
    }
}
