use std::fmt;

use crate::error::DashError;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// View state: the two user-controlled inputs
// ---------------------------------------------------------------------------

/// Value the site selector sends for "all sites".
pub const ALL_SITES: &str = "ALL";

/// Categorical site filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteSelection {
    All,
    Site(String),
}

impl SiteSelection {
    /// Validate a raw selector value against the dataset's known sites.
    pub fn parse(raw: &str, dataset: &LaunchDataset) -> Result<Self, DashError> {
        if raw == ALL_SITES {
            Ok(SiteSelection::All)
        } else if dataset.has_site(raw) {
            Ok(SiteSelection::Site(raw.to_string()))
        } else {
            Err(DashError::UnknownSite {
                site: raw.to_string(),
            })
        }
    }

    /// The value the selector widget uses for this selection.
    pub fn as_value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(site) => site,
        }
    }

    fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.site == *site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "all sites"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

/// User-selected payload bounds. Both finite; `low > high` is representable
/// and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadInterval {
    pub low: f64,
    pub high: f64,
}

impl PayloadInterval {
    pub fn new(low: f64, high: f64) -> Result<Self, DashError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(DashError::InvalidInterval { low, high });
        }
        Ok(PayloadInterval { low, high })
    }
}

/// How the payload interval treats records sitting exactly on a bound.
///
/// `Exclusive` drops boundary payloads even though the range selector's own
/// bounds are inclusive. It is the default because the published dashboard
/// behaves that way; switching to `Inclusive` is pending product-owner sign-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    #[default]
    Exclusive,
    Inclusive,
}

impl BoundaryPolicy {
    pub fn admits(self, interval: PayloadInterval, payload: f64) -> bool {
        match self {
            BoundaryPolicy::Exclusive => payload > interval.low && payload < interval.high,
            BoundaryPolicy::Inclusive => payload >= interval.low && payload <= interval.high,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoundaryPolicy::Exclusive => "exclusive",
            BoundaryPolicy::Inclusive => "inclusive",
        }
    }
}

/// Snapshot of the current UI selection. Handlers take it by reference and
/// never mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub site: SiteSelection,
    pub payload: PayloadInterval,
}

impl ViewState {
    /// All sites, full observed payload range.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        let range = dataset.payload_range();
        ViewState {
            site: SiteSelection::All,
            payload: PayloadInterval {
                low: range.min,
                high: range.max,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Recomputations
// ---------------------------------------------------------------------------

/// One slice of the proportion chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProportionSlice {
    pub label: String,
    pub count: usize,
}

/// Success proportions for the site selection.
///
/// * `All` → one slice per site counting its successful launches; sites
///   without a success are absent.
/// * `Site(s)` → one slice per outcome class among launches at `s`; a class
///   with no launches is absent.
///
/// Slices are ordered by count descending; ties keep first-appearance order.
pub fn success_proportion(dataset: &LaunchDataset, site: &SiteSelection) -> Vec<ProportionSlice> {
    let mut slices: Vec<ProportionSlice> = match site {
        SiteSelection::All => dataset
            .sites()
            .iter()
            .map(|s| ProportionSlice {
                label: s.clone(),
                count: dataset
                    .records()
                    .iter()
                    .filter(|r| r.site == *s && r.outcome.is_success())
                    .count(),
            })
            .collect(),
        SiteSelection::Site(_) => [Outcome::Success, Outcome::Failure]
            .into_iter()
            .map(|outcome| ProportionSlice {
                label: outcome.label().to_string(),
                count: dataset
                    .records()
                    .iter()
                    .filter(|r| site.matches(r) && r.outcome == outcome)
                    .count(),
            })
            .collect(),
    };

    slices.retain(|s| s.count > 0);
    // Stable: equal counts keep their original order.
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}

/// Records whose payload lies in the interval (per `policy`) and whose site
/// matches the selection, in dataset order.
///
/// An interval with `low >= high` matches nothing under either policy.
pub fn payload_outcome_points<'a>(
    dataset: &'a LaunchDataset,
    view: &ViewState,
    policy: BoundaryPolicy,
) -> Vec<&'a LaunchRecord> {
    if view.payload.low >= view.payload.high {
        return Vec::new();
    }
    dataset
        .records()
        .iter()
        .filter(|r| policy.admits(view.payload, r.payload_mass_kg))
        .filter(|r| view.site.matches(r))
        .collect()
}
