//! Behaviour of the shared listing pipeline on real content types

use serde_json::json;
use wayfarer::prelude::*;

fn tour(id: u64, title: &str, duration: &str, price: f64) -> Tour {
    Tour {
        id,
        title: title.to_string(),
        duration: duration.to_string(),
        price,
        listed: true,
        ..Default::default()
    }
}

fn catalogue() -> Vec<Tour> {
    vec![
        tour(1, "Kailash Kora", "12 days", 3200.0),
        tour(2, "Lhasa Explorer", "3 days", 900.0),
        Tour {
            description: "Circuit around Mount KAILASH".to_string(),
            ..tour(3, "Saga Overland", "15 days", 2800.0)
        },
        tour(4, "Everest Base Camp", "7 days", 1500.0),
    ]
}

fn ids<'a>(tours: impl IntoIterator<Item = &'a Tour>) -> Vec<u64> {
    tours.into_iter().map(|t| t.id).collect()
}

mod filter_tests {
    use super::*;

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let items = catalogue();
        let found = Filters::new().with_search("kailash").apply(&items);
        assert_eq!(ids(found), vec![1, 3]);
    }

    #[test]
    fn test_search_includes_destination_names() {
        let destinations = vec![Destination {
            id: 9,
            name: "Ngari".to_string(),
            ..Default::default()
        }];
        let mut items = catalogue();
        items[1].primary_destination_id = Some(9);
        DestinationIndex::new(&destinations).annotate(&mut items);

        let found = Filters::new().with_search("ngari").apply(&items);
        assert_eq!(ids(found), vec![2]);
    }

    #[test]
    fn test_absent_listed_flag_counts_as_listed() {
        let items: Vec<Tour> = serde_json::from_value(json!([
            { "id": 1, "title": "Legacy record" },
            { "id": 2, "title": "Hidden", "listed": false }
        ]))
        .unwrap();

        let listed = Filters::new().with_equals("status", "listed").apply(&items);
        assert_eq!(ids(listed), vec![1]);

        let unlisted = Filters::new().with_equals("status", "unlisted").apply(&items);
        assert_eq!(ids(unlisted), vec![2]);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let mut items = catalogue();
        items[0].category = "Pilgrimage".to_string();
        items[2].category = "Pilgrimage".to_string();
        items[2].listed = false;

        let filters = Filters::new()
            .with_equals("category", "Pilgrimage")
            .with_equals("status", "listed");
        assert_eq!(ids(filters.apply(&items)), vec![1]);
    }
}

mod sort_tests {
    use super::*;

    #[test]
    fn test_price_descending_reverses_ascending() {
        let items = catalogue();
        let asc = ids(process(&items, &Filters::new(), Some(&SortSpec::ascending("price"))));
        let desc = ids(process(&items, &Filters::new(), Some(&SortSpec::descending("price"))));

        assert_eq!(asc, vec![2, 4, 3, 1]);
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn test_duration_sorts_numerically() {
        let items = catalogue();
        let sorted = process(&items, &Filters::new(), Some(&SortSpec::ascending("duration")));
        let durations: Vec<&str> = sorted.iter().map(|t| t.duration.as_str()).collect();
        assert_eq!(durations, vec!["3 days", "7 days", "12 days", "15 days"]);
    }

    #[test]
    fn test_clicking_same_column_toggles_direction() {
        let mut view = ListView::new(10).with_items(catalogue());

        view.sort_by("price");
        assert_eq!(view.sort().map(|s| s.direction), Some(SortDirection::Asc));
        view.sort_by("price");
        assert_eq!(view.sort().map(|s| s.direction), Some(SortDirection::Desc));
        view.sort_by("title");
        assert_eq!(view.sort().map(|s| s.direction), Some(SortDirection::Asc));
    }
}

mod pagination_tests {
    use super::*;

    fn twenty_five() -> ListView<Tour> {
        let items = (1..=25)
            .map(|i| tour(i, &format!("Tour {}", i), "5 days", 100.0))
            .collect();
        ListView::new(10).with_items(items)
    }

    #[test]
    fn test_pages_of_twenty_five_items() {
        let mut view = twenty_five();

        assert_eq!(ids(view.visible()), (1..=10).collect::<Vec<_>>());
        assert_eq!(view.meta().total_pages, 3);

        view.go_to_page(3);
        assert_eq!(ids(view.visible()), (21..=25).collect::<Vec<_>>());
        assert!(!view.meta().has_next);
        assert!(!view.next_page());
        assert_eq!(view.meta().page, 3);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let mut view = twenty_five();
        view.go_to_page(9);
        assert!(view.visible().is_empty());
    }

    #[test]
    fn test_previous_stops_at_first_page() {
        let mut view = twenty_five();
        assert!(!view.previous_page());
        assert!(view.next_page());
        assert!(view.previous_page());
        assert_eq!(view.meta().page, 1);
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut view = twenty_five();
        view.go_to_page(3);

        view.set_search("tour");
        assert_eq!(view.meta().page, 1);

        view.go_to_page(2);
        view.set_filter("status", "listed");
        assert_eq!(view.meta().page, 1);
    }
}
