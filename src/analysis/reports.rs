use serde::Serialize;

/// How a report outcome is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatTest {
    /// Shapiro-Wilk normality test.
    Normality,
    /// Kruskal-Wallis comparison across original languages.
    LanguageComparison,
}

/// A statistical test result computed offline and shipped as constants.
///
/// Nothing here is derived from the loaded dataset; the UI labels these
/// values as precomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatReport {
    pub test: StatTest,
    pub statistic: f64,
    pub p_value: f64,
}

pub const NORMALITY: StatReport = StatReport {
    test: StatTest::Normality,
    statistic: 0.3681,
    p_value: 0.0000,
};

pub const LANGUAGE_COMPARISON: StatReport = StatReport {
    test: StatTest::LanguageComparison,
    statistic: 63.5410,
    p_value: 0.0000,
};

pub fn precomputed_reports() -> [StatReport; 2] {
    [NORMALITY, LANGUAGE_COMPARISON]
}

/// The text branch selected for a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportOutcome {
    pub severity: Severity,
    pub headline: &'static str,
    pub conclusion: &'static str,
}

impl StatReport {
    pub fn title(&self) -> &'static str {
        match self.test {
            StatTest::Normality => "Normality test (Shapiro-Wilk)",
            StatTest::LanguageComparison => "Comparison test (Kruskal-Wallis)",
        }
    }

    pub fn is_significant(&self, significance_level: f64) -> bool {
        self.p_value < significance_level
    }

    /// Statistic and p-value lines, four decimals each.
    pub fn value_lines(&self) -> [String; 2] {
        [
            format!("Statistic: {:.4}", self.statistic),
            format!("p-value: {:.4}", self.p_value),
        ]
    }

    pub fn outcome(&self, significance_level: f64) -> ReportOutcome {
        let significant = self.is_significant(significance_level);
        match (self.test, significant) {
            (StatTest::Normality, true) => ReportOutcome {
                severity: Severity::Error,
                headline: "The data does NOT appear to follow a normal distribution.",
                conclusion: "Since the data is not normal, non-parametric tests are \
                             recommended for comparisons between groups.",
            },
            (StatTest::Normality, false) => ReportOutcome {
                severity: Severity::Success,
                headline: "The data appears to follow a normal distribution.",
                conclusion: "Since the data is normal, parametric methods such as ANOVA \
                             or regression can be used.",
            },
            (StatTest::LanguageComparison, true) => ReportOutcome {
                severity: Severity::Warning,
                headline: "There are significant differences between languages.",
                conclusion: "The analysed variable differs in a statistically significant \
                             way across languages.",
            },
            (StatTest::LanguageComparison, false) => ReportOutcome {
                severity: Severity::Success,
                headline: "There are no significant differences between languages.",
                conclusion: "No meaningful differences between languages were found for \
                             the analysed variable.",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_p_value_selects_not_normal_branch() {
        let outcome = NORMALITY.outcome(0.05);
        assert_eq!(outcome.severity, Severity::Error);
        assert!(outcome.headline.contains("NOT"));
    }

    #[test]
    fn comparison_branch_flips_at_threshold() {
        assert_eq!(LANGUAGE_COMPARISON.outcome(0.05).severity, Severity::Warning);

        let borderline = StatReport {
            p_value: 0.05,
            ..LANGUAGE_COMPARISON
        };
        assert!(!borderline.is_significant(0.05));
        assert_eq!(borderline.outcome(0.05).severity, Severity::Success);
    }

    #[test]
    fn values_print_with_four_decimals() {
        assert_eq!(
            NORMALITY.value_lines(),
            ["Statistic: 0.3681".to_string(), "p-value: 0.0000".to_string()]
        );
        assert_eq!(LANGUAGE_COMPARISON.value_lines()[0], "Statistic: 63.5410");
    }
}
