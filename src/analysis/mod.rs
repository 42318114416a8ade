/// Analyses over the cleaned dataset.
///
/// Every view is a pure function of the shared `MovieDataset`: it filters or
/// groups a read-only subset and returns chart descriptions plus a fixed
/// conclusion. Views never see each other's output.

pub mod chart;
pub mod reports;
pub mod views;

use serde::Serialize;

use self::chart::ChartSpec;

/// The five independent analyses a user can switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    BudgetVsRevenue,
    RuntimeByLanguage,
    PopularityVsSlogan,
    RatingByLanguageOrCountry,
    CollectionVsRevenue,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::BudgetVsRevenue,
        ViewKind::RuntimeByLanguage,
        ViewKind::PopularityVsSlogan,
        ViewKind::RatingByLanguageOrCountry,
        ViewKind::CollectionVsRevenue,
    ];

    /// Text of the toggle that enables the view.
    pub fn question(self) -> &'static str {
        match self {
            ViewKind::BudgetVsRevenue => "Do bigger budgets bring bigger revenues?",
            ViewKind::RuntimeByLanguage => "Compare runtime by language",
            ViewKind::PopularityVsSlogan => "Are movies with a slogan more popular?",
            ViewKind::RatingByLanguageOrCountry => {
                "Do language or country influence the average rating?"
            }
            ViewKind::CollectionVsRevenue => "Does belonging to a collection affect revenue?",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::BudgetVsRevenue => "Budget vs Revenue",
            ViewKind::RuntimeByLanguage => "Runtime by Language",
            ViewKind::PopularityVsSlogan => "Popularity vs Slogan",
            ViewKind::RatingByLanguageOrCountry => "Rating by Language or Country",
            ViewKind::CollectionVsRevenue => "Revenue vs Collection",
        }
    }

    pub fn conclusion(self) -> &'static str {
        match self {
            ViewKind::BudgetVsRevenue => {
                "Although budget and revenue are somewhat related, a bigger budget does not \
                 always guarantee more box-office success. The spread of the data suggests \
                 other factors matter as well."
            }
            ViewKind::RuntimeByLanguage => {
                "Runtime varies considerably by language. Languages with more productions \
                 tend to show a wider range of runtimes, which may reflect cultural or \
                 industry differences."
            }
            ViewKind::PopularityVsSlogan => {
                "Movies with a slogan tend to be slightly more popular, possibly because a \
                 good slogan strengthens the film's marketing."
            }
            ViewKind::RatingByLanguageOrCountry => {
                "The average rating differs noticeably by language and by country. This may \
                 come from narrative styles, cultural preferences or production quality."
            }
            ViewKind::CollectionVsRevenue => {
                "Movies that belong to a collection usually earn more, which makes sense as \
                 they are part of franchises or sagas already known to the audience."
            }
        }
    }
}

/// Everything a renderer needs to draw one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewResult {
    pub kind: ViewKind,
    pub title: &'static str,
    pub charts: Vec<ChartSpec>,
    pub conclusion: &'static str,
}
