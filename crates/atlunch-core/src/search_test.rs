use super::*;
use crate::geo::Coordinate;

fn place(id: &str, name: &str, rating: Option<f64>) -> Place {
    let mut p = Place::new(id, name, Coordinate::new(36.4, -105.57).unwrap());
    p.rating = rating;
    p
}

fn ids(view: &[&Place]) -> Vec<String> {
    view.iter().map(|p| p.id.clone()).collect()
}

fn sample() -> Vec<Place> {
    vec![
        place("a", "Taos Pizza", Some(4.1)),
        place("b", "Burger Stand", None),
        place("c", "Orlando's", Some(4.7)),
        place("d", "pizza hut", Some(3.2)),
        place("e", "Michael's Kitchen", Some(4.1)),
    ]
}

#[test]
fn empty_query_matches_everything() {
    let places = sample();
    assert_eq!(view(&places, "", SortDirection::Descending).len(), places.len());
}

#[test]
fn filter_is_case_insensitive_substring() {
    let places = sample();
    let result = view(&places, "PIZZA", SortDirection::Descending);
    assert_eq!(ids(&result), vec!["a", "d"]);
}

#[test]
fn every_match_appears_exactly_once_and_nothing_else() {
    let places = sample();
    for query in ["", "a", "pizza", "'s", "zzz", "KITCHEN"] {
        let result = view(&places, query, SortDirection::Ascending);
        for p in &result {
            assert!(p.name.to_lowercase().contains(&query.to_lowercase()));
        }
        for p in places.iter().filter(|p| p.matches_query(query)) {
            assert_eq!(result.iter().filter(|r| r.id == p.id).count(), 1, "{query}");
        }
    }
}

#[test]
fn descending_puts_highest_first_and_unrated_last() {
    let places = sample();
    let result = view(&places, "", SortDirection::Descending);
    assert_eq!(ids(&result), vec!["c", "a", "e", "d", "b"]);
}

#[test]
fn ascending_ranks_unrated_as_lowest() {
    let places = sample();
    let result = view(&places, "", SortDirection::Ascending);
    assert_eq!(ids(&result), vec!["b", "d", "a", "e", "c"]);
}

#[test]
fn ties_keep_input_order_in_both_directions() {
    let places = vec![
        place("x", "First", Some(4.0)),
        place("y", "Second", Some(4.0)),
        place("z", "Third", Some(4.0)),
    ];
    assert_eq!(ids(&view(&places, "", SortDirection::Ascending)), vec!["x", "y", "z"]);
    assert_eq!(ids(&view(&places, "", SortDirection::Descending)), vec!["x", "y", "z"]);
}

#[test]
fn sorting_is_idempotent() {
    let places = sample();
    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        let once: Vec<Place> = view(&places, "", direction).into_iter().cloned().collect();
        let twice: Vec<Place> = view(&once, "", direction).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }
}

#[test]
fn sort_direction_parses_short_and_long_forms() {
    assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Ascending));
    assert_eq!("Descending".parse::<SortDirection>(), Ok(SortDirection::Descending));
    assert!("sideways".parse::<SortDirection>().is_err());
}
