use super::assertions::StepError;
use super::steps::Step;

#[derive(Debug)]
pub struct StepReport {
    pub step: Step,
    pub outcome: Result<(), StepError>,
}

impl StepReport {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Outcome of every step of one run, in run order.
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub steps: Vec<StepReport>,
}

impl SuiteReport {
    pub fn is_success(&self) -> bool {
        self.steps.iter().all(StepReport::passed)
    }

    pub fn passed_count(&self) -> usize {
        self.steps.iter().filter(|r| r.passed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (Step, &StepError)> {
        self.steps
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (r.step, e)))
    }

    pub fn outcome_of(&self, step: Step) -> Option<&Result<(), StepError>> {
        self.steps.iter().find(|r| r.step == step).map(|r| &r.outcome)
    }
}

impl std::fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for report in &self.steps {
            match &report.outcome {
                Ok(()) => writeln!(f, "PASS {}", report.step)?,
                Err(e) => writeln!(f, "FAIL {}: {}", report.step, e)?,
            }
        }
        write!(f, "{}/{} steps passed", self.passed_count(), self.steps.len())
    }
}
