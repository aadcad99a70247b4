//! Death-year estimator behaviour on concrete citation histories.

use paper_mortality::estimator::{CitationHistogram, DeathDefinition, Window, last_cited_year};
use paper_mortality::estimate_death_year;

fn window(years: u32, citations: u32) -> Window {
    Window::new(years, citations).unwrap()
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn test_burst_in_birth_year_survives_one_window() {
    // Window [2010, 2012] holds 5 >= 5; sliding to [2011, 2013] drops to 0.
    let death = estimate_death_year(window(3, 5), &[2010, 2010, 2010, 2010, 2010], 2010);
    assert_eq!(death, 2013);
}

#[test]
fn test_too_few_citations_die_at_birth() {
    let death = estimate_death_year(window(3, 5), &[2010, 2010], 2010);
    assert_eq!(death, 2010);
}

#[test]
fn test_one_citation_per_year_dies_when_padding_empties_the_window() {
    let years = [2010, 2011, 2012, 2013, 2014];
    // Padded histogram: [1, 1, 1, 1, 1, 0, 0]. The window ending at offset 6
    // covers the two padded years and sums to 0.
    assert_eq!(estimate_death_year(window(2, 1), &years, 2010), 2016);
}

#[test]
fn test_never_dying_returns_one_window_past_last_citation() {
    let years = [2010, 2011, 2012, 2013, 2014];
    // With no minimum every window passes: birth + padded length (5 + 2).
    assert_eq!(estimate_death_year(window(2, 0), &years, 2010), 2017);
}

// =============================================================================
// Boundary policy
// =============================================================================

#[test]
fn test_window_equal_to_threshold_is_alive() {
    // Four citations every year for six years, one-year window of four.
    let years: Vec<i32> = (2000..2006).flat_map(|y| [y; 4]).collect();
    assert_eq!(estimate_death_year(window(1, 4), &years, 2000), 2006);
    assert_eq!(estimate_death_year(window(1, 5), &years, 2000), 2000);
}

#[test]
fn test_death_reports_right_edge_of_failing_window() {
    // Alive windows: [2000,2002] = 6, [2001,2003] = 6. First failing window is
    // [2002,2004] = 3, reported at its right edge.
    let years = [2000, 2000, 2000, 2001, 2001, 2001, 2003, 2003, 2003];
    assert_eq!(estimate_death_year(window(3, 6), &years, 2000), 2004);
}

#[test]
fn test_pre_birth_citations_are_clamped() {
    let clamped = estimate_death_year(window(2, 3), &[1998, 2000, 2000], 2000);
    let direct = estimate_death_year(window(2, 3), &[2000, 2000, 2000], 2000);
    assert_eq!(clamped, direct);
    // Padded histogram [3, 0, 0]: [2000, 2001] holds 3, [2001, 2002] holds 0.
    assert_eq!(clamped, 2002);
}

#[test]
fn test_all_citations_before_birth_collapse_to_one_bucket() {
    let hist = CitationHistogram::build(2010, &[2001, 2002, 2003]);
    assert_eq!(hist.counts(), &[3]);
    assert_eq!(estimate_death_year(window(1, 3), &[2001, 2002, 2003], 2010), 2011);
}

#[test]
fn test_empty_citations() {
    assert_eq!(estimate_death_year(window(3, 1), &[], 1999), 1999);
    // Zero threshold: a single empty bucket plus three padded years.
    assert_eq!(estimate_death_year(window(3, 0), &[], 1999), 2003);
}

#[test]
fn test_unsorted_input_matches_sorted() {
    let sorted = [2000, 2001, 2001, 2002, 2005, 2006];
    let shuffled = [2005, 2001, 2000, 2006, 2002, 2001];
    let w = window(2, 2);
    assert_eq!(estimate_death_year(w, &sorted, 2000), estimate_death_year(w, &shuffled, 2000));
}

#[test]
fn test_window_estimate_matches_free_function() {
    let w = window(4, 7);
    let years = [2015, 2015, 2016, 2017, 2017, 2017, 2018, 2019, 2021];
    assert_eq!(w.estimate(&years, 2015), estimate_death_year(w, &years, 2015));
}

#[test]
fn test_zero_width_window_is_rejected() {
    assert!(Window::new(0, 1).unwrap_err().is_invalid_input());
}

// =============================================================================
// Last-cited definition
// =============================================================================

#[test]
fn test_last_cited_definition() {
    let years = [2004, 2019, 2008];
    assert_eq!(last_cited_year(&years, 2000), 2019);
    assert_eq!(DeathDefinition::LastCited.death_year(window(3, 5), &years, 2000), 2019);
    // A lone pre-birth citation never produces a death before birth.
    assert_eq!(last_cited_year(&[1995], 2000), 2000);
}
