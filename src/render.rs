// Plain text rendering of the search screen
use crate::filters::country_label;
use crate::holiday::HolidayRecord;
use crate::pagination::PageMarker;
use crate::search_view::{SearchState, NO_RESULTS_MESSAGE, REQUIRED_FIELDS_NOTE};
use std::fmt::Write;

pub fn render(state: &SearchState) -> String {
    let mut out = String::new();
    render_form(&mut out, state);

    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "\n[!] {}", error);
    }

    if state.loading {
        out.push_str("\nLoading...\n");
    } else {
        render_results(&mut out, state);
        render_pagination(&mut out, state);
    }

    if let Some(holiday) = &state.selected {
        out.push('\n');
        out.push_str(&render_detail(holiday));
    }
    out
}

fn render_form(out: &mut String, state: &SearchState) {
    let filters = &state.filters;
    let country = match filters.country.as_deref() {
        Some(code) => match country_label(code) {
            Some(label) => format!("{} ({})", label, code),
            None => code.to_string(),
        },
        None => "-".to_string(),
    };

    let _ = writeln!(out, "Holiday Calendar");
    let _ = writeln!(out, "  Country:      {}", country);
    let _ = writeln!(out, "  Year:         {}", filters.year.as_deref().unwrap_or("-"));
    let _ = writeln!(
        out,
        "  Month:        {}",
        filters.month.map_or("(any)", |m| m.name())
    );
    let _ = writeln!(
        out,
        "  Holiday type: {}",
        filters.holiday_type.map_or("(any)", |t| t.label())
    );
    let _ = writeln!(out, "  Search:       {}", filters.search_text);

    let button = if state.can_search() {
        format!("[{}]", state.search_label())
    } else {
        format!("({}, disabled)", state.search_label())
    };
    let _ = writeln!(out, "  {}", button);
    let _ = writeln!(out, "  {}", REQUIRED_FIELDS_NOTE);
}

fn render_results(out: &mut String, state: &SearchState) {
    if let Some(count) = state.result_count_label() {
        let _ = writeln!(out, "\n{}", count);
    }

    for (i, holiday) in state.visible_holidays().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {}  {}  [{}]",
            i + 1,
            holiday.name,
            holiday.date.iso,
            holiday.kind
        );
    }

    if state.show_no_results() {
        let _ = writeln!(out, "\n{}", NO_RESULTS_MESSAGE);
    }
}

fn render_pagination(out: &mut String, state: &SearchState) {
    if !state.show_pagination() {
        return;
    }

    let mut bar = Vec::new();
    bar.push(if state.previous_disabled() {
        "(Previous)".to_string()
    } else {
        "<Previous>".to_string()
    });
    for marker in state.page_markers() {
        bar.push(match marker {
            PageMarker::Page(page) if page == state.current_page => format!("[{}]", page),
            PageMarker::Page(page) => page.to_string(),
            PageMarker::Ellipsis => "...".to_string(),
        });
    }
    bar.push(if state.next_disabled() {
        "(Next)".to_string()
    } else {
        "<Next>".to_string()
    });

    let _ = writeln!(out, "\n{}", bar.join(" "));
}

pub fn render_detail(holiday: &HolidayRecord) -> String {
    let mut out = String::new();
    let date = match holiday.calendar_date() {
        Some(day) => format!("{} ({})", holiday.date.iso, day.format("%A")),
        None => holiday.date.iso.clone(),
    };

    let _ = writeln!(out, "+-- {}", holiday.name);
    let _ = writeln!(out, "|  Date: {}", date);
    let _ = writeln!(out, "|  Description");
    let _ = writeln!(out, "|    {}", holiday.description_or_default());
    let _ = writeln!(out, "|  Type");
    let _ = writeln!(out, "|    {}", holiday.kind);
    let _ = writeln!(out, "+-- (close)");
    out
}
