use fairshare_i18n as i18n;
use fairshare_infrastructure::EvalOutcome;
use std::fmt::Write as _;

pub struct EvalPresenter;

impl EvalPresenter {
    /// `[case_id] scenario: PASS` per case, then a pass count.
    pub fn render(outcomes: &[EvalOutcome]) -> String {
        let mut report = String::with_capacity(64 * (outcomes.len() + 1));
        for outcome in outcomes {
            let verdict = if outcome.passed { i18n::PASS } else { i18n::FAIL };
            let _ = write!(report, "[{}] {}: {verdict}", outcome.id, outcome.scenario);
            if !outcome.passed {
                let _ = write!(
                    report,
                    " ({} != {})",
                    outcome.calculated_share, outcome.expected_share
                );
            }
            report.push('\n');
        }

        let passed = outcomes.iter().filter(|outcome| outcome.passed).count();
        report.push_str(&i18n::eval_summary(passed, outcomes.len()));
        report.push('\n');
        report
    }
}
