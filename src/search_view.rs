// Holiday search view: the search form state, the fetched results and the
// pagination cursor, driven by a single reducer.
//
// `reduce` is the only place the state changes. It returns an `Effect` when
// the transition needs the outside world, which `HolidaySearchView` carries
// out against a `HolidayApi` before feeding the outcome back in as an `Action`.

use crate::filters::{FilterSelection, HolidayQuery, HolidayType, Month};
use crate::holiday::HolidayRecord;
use crate::pagination::{self, PageMarker};
use crate::query_client::HolidayApi;
use tracing::{debug, info, warn};

pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch holidays. Please try again later.";
pub const NO_RESULTS_MESSAGE: &str = "No holidays found. Try adjusting your search criteria.";
pub const REQUIRED_FIELDS_NOTE: &str = "* Country and Year are required";

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub filters: FilterSelection,
    pub results: Vec<HolidayRecord>,
    // 1-based, always within 1..=max(1, total_pages)
    pub current_page: usize,
    pub selected: Option<HolidayRecord>,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            filters: FilterSelection::default(),
            results: Vec::new(),
            current_page: 1,
            selected: None,
            loading: false,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCountry(Option<String>),
    SetYear(Option<String>),
    SetMonth(Option<Month>),
    SetHolidayType(Option<HolidayType>),
    SetSearchText(String),
    // Search button
    Search,
    // Enter pressed in the search box
    SubmitSearchText,
    FetchSucceeded(Vec<HolidayRecord>),
    FetchFailed(String),
    PreviousPage,
    NextPage,
    GoToPage(usize),
    // Position of the record within the visible page, 0-based
    SelectHoliday(usize),
    DismissHoliday,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch(HolidayQuery),
}

impl SearchState {
    pub fn can_search(&self) -> bool {
        self.filters.is_valid() && !self.loading
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.results.len())
    }

    pub fn visible_holidays(&self) -> &[HolidayRecord] {
        pagination::page_slice(&self.results, self.current_page)
    }

    pub fn page_markers(&self) -> Vec<PageMarker> {
        pagination::page_markers(self.current_page, self.total_pages())
    }

    pub fn previous_disabled(&self) -> bool {
        pagination::is_first_page(self.current_page)
    }

    pub fn next_disabled(&self) -> bool {
        pagination::is_last_page(self.current_page, self.total_pages())
    }

    pub fn show_pagination(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn show_no_results(&self) -> bool {
        self.results.is_empty() && !self.loading
    }

    pub fn search_label(&self) -> &'static str {
        if self.loading {
            "Searching..."
        } else {
            "Search"
        }
    }

    pub fn result_count_label(&self) -> Option<String> {
        (!self.results.is_empty()).then(|| format!("Found {} holidays", self.results.len()))
    }
}

// Applies `action` to `state` and returns the side effect the caller has to
// run, if any. Actions not allowed in the current state leave it as is.
pub fn reduce(state: &mut SearchState, action: Action) -> Option<Effect> {
    match action {
        Action::SetCountry(country) => state.filters.country = country,
        Action::SetYear(year) => state.filters.year = year,
        Action::SetMonth(month) => state.filters.month = month,
        Action::SetHolidayType(holiday_type) => state.filters.holiday_type = holiday_type,
        Action::SetSearchText(text) => state.filters.search_text = text,
        Action::Search | Action::SubmitSearchText => {
            if state.loading {
                debug!("Search ignored, a request is already in flight");
                return None;
            }
            let query = state.filters.to_query()?;
            state.loading = true;
            state.last_error = None;
            return Some(Effect::Fetch(query));
        }
        Action::FetchSucceeded(holidays) => {
            // An open detail view stays open until dismissed, even when its
            // record is no longer part of the new results
            state.results = holidays;
            state.current_page = 1;
            state.loading = false;
        }
        Action::FetchFailed(reason) => {
            // Previous results stay on screen
            warn!(%reason, "Holiday search failed");
            state.last_error = Some(FETCH_ERROR_MESSAGE.to_string());
            state.loading = false;
        }
        Action::PreviousPage => {
            state.current_page = pagination::previous_page(state.current_page);
        }
        Action::NextPage => {
            state.current_page = pagination::next_page(state.current_page, state.total_pages());
        }
        Action::GoToPage(page) => {
            if pagination::is_selectable(page, state.current_page, state.total_pages()) {
                state.current_page = page;
            }
        }
        Action::SelectHoliday(index) => {
            if let Some(holiday) = state.visible_holidays().get(index) {
                state.selected = Some(holiday.clone());
            }
        }
        Action::DismissHoliday => state.selected = None,
    }
    None
}

pub struct HolidaySearchView<C: HolidayApi> {
    client: C,
    state: SearchState,
}

impl<C: HolidayApi> HolidaySearchView<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: SearchState::default(),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    // Applies an action and runs whatever fetch it asks for. Taking `&mut self`
    // keeps at most one request outstanding.
    pub async fn dispatch(&mut self, action: Action) {
        let Some(Effect::Fetch(query)) = reduce(&mut self.state, action) else {
            return;
        };

        let outcome = match self.client.fetch_holidays(&query).await {
            Ok(holidays) => {
                info!(
                    country = %query.country,
                    year = %query.year,
                    count = holidays.len(),
                    "Holiday search completed"
                );
                Action::FetchSucceeded(holidays)
            }
            Err(e) => Action::FetchFailed(e.to_string()),
        };
        reduce(&mut self.state, outcome);
    }

    pub async fn search(&mut self) {
        self.dispatch(Action::Search).await;
    }
}
