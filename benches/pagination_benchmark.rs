use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use holiday_search::{reduce, Action, HolidayRecord, SearchState};
use rand::{thread_rng, Rng};

fn random_holidays(count: usize) -> Vec<HolidayRecord> {
    let mut rng = thread_rng();
    (0..count)
        .map(|i| {
            let month = rng.gen_range(1..=12);
            let day = rng.gen_range(1..=28);
            HolidayRecord::new(
                &format!("Holiday {}", i),
                &format!("2024-{:02}-{:02}", month, day),
                "National holiday",
            )
        })
        .collect()
}

// Walk every page of a loaded result set, deriving the slice and the page
// markers the way the renderer does on each step
pub fn pagination_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("holiday_pagination");

    for count in [25usize, 500, 10_000].iter() {
        let holidays = random_holidays(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                let mut state = SearchState::default();
                reduce(&mut state, Action::Search);
                reduce(&mut state, Action::FetchSucceeded(holidays.clone()));

                let mut shown = 0;
                for _ in 0..state.total_pages() {
                    shown += state.visible_holidays().len();
                    black_box(state.page_markers());
                    reduce(&mut state, Action::NextPage);
                }
                black_box(shown)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, pagination_benchmark);
criterion_main!(benches);
