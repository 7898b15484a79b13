use ens_search_core::{
    DropdownBuilder, HistoryItem, HistoryStore, MemHistory, NameType, SearchItem, SearchSession,
    MAX_DROPDOWN_ITEMS,
};
use std::time::Instant;

#[test]
fn never_exceeds_cap() {
    let history: Vec<_> = (0..20)
        .flat_map(|i| {
            [
                HistoryItem::new(format!("n{i}.eth"), NameType::Eth, i),
                HistoryItem::new(format!("n{i}.com"), NameType::Dns, i),
            ]
        })
        .collect();
    let b = DropdownBuilder::new();
    for input in ["", "n", "n1", "n1.eth", "n1.com", "n1.box", "a.b.c", "0x0000000000000000000000000000000000000000"] {
        let items = b.build(input, &history);
        assert!(items.len() <= MAX_DROPDOWN_ITEMS, "{input}: {items:?}");
        assert!(!items.is_empty());
    }
}

#[test]
fn eth_row_for_every_plain_label() {
    let b = DropdownBuilder::new();
    for input in ["a", "vitalik", "x1", "my-name"] {
        let items = b.build(input, &[]);
        assert_eq!(
            items[0],
            SearchItem::Eth {
                text: format!("{input}.eth")
            }
        );
    }
}

#[test]
fn selection_feeds_back_into_suggestions() {
    let store = MemHistory::new();
    let mut s = SearchSession::new();
    s.set_input("nick.xyz", &store.list().unwrap(), Instant::now());
    let nav = s.submit(&store).unwrap().expect("dns row");
    assert_eq!(nav.route, "/nick.xyz");

    // later, an empty box shows what was opened
    let items = DropdownBuilder::new().build("", &store.list().unwrap());
    assert_eq!(items.len(), 1);
    assert!(items[0].is_history());
    assert_eq!(items[0].name_type(), Some(NameType::Dns));
}
