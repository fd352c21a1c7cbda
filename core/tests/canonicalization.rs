use clubreport_core::canonical::{canonicalize, MATCH_THRESHOLD};

fn roster(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn exact_match_short_circuits_scoring() {
    // "John Smithson" would out-score plenty of candidates, but an exact
    // case-insensitive hit never enters the scoring loop at all.
    let r = roster(&["John Smithson", "John Smith"]);
    assert_eq!(canonicalize("john smith", &r), "John Smith");
    assert_eq!(canonicalize("JOHN SMITH", &r), "John Smith");
}

#[test]
fn comma_form_reaches_exact_match() {
    let r = roster(&["John Smith"]);
    assert_eq!(canonicalize("Smith, John", &r), "John Smith");
}

#[test]
fn score_of_fourteen_stays_unmatched() {
    // Two partial prefix hits (7 + 7), no surname bonus, and the
    // candidate's unaccounted "Smith" token blocks reverse coverage.
    let r = roster(&["Robert Johnson Smith"]);
    assert_eq!(canonicalize("Rob Joh", &r), "Rob Joh");
}

#[test]
fn score_of_fifteen_matches() {
    // "smith" exact (10) + "j" initial prefix of "john" (5); reversed
    // token order forfeits the surname bonus and reverse coverage.
    let r = roster(&["John Smith"]);
    assert_eq!(canonicalize("Smith J", &r), "John Smith");
    assert_eq!(MATCH_THRESHOLD, 15);
}

#[test]
fn surname_hit_alone_clears_threshold() {
    let r = roster(&["Jane Doe", "John Smith"]);
    assert_eq!(canonicalize("J Smith", &r), "John Smith");
}

#[test]
fn empty_roster_degrades_to_identity() {
    assert_eq!(canonicalize("Anyone At All", &[]), "Anyone At All");
    assert_eq!(canonicalize("   ", &[]), "");
}

#[test]
fn garbage_input_never_panics() {
    let r = roster(&["John Smith"]);
    for raw in [",,,", " , ", "!!!", "a", "John,,Smith,,Jr"] {
        let _ = canonicalize(raw, &r);
    }
}
