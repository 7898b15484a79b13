//! Suggestion list for the search box.
//!
//! [`DropdownBuilder::build`] runs a fixed table of stages over an initially
//! empty list. Every stage adds at most one row, except the history stage
//! which fills whatever room is left under [`MAX_DROPDOWN_ITEMS`], and the
//! error stage which replaces the list outright.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;

use crate::address::is_address;
use crate::i18n::{Catalog, Translator, EMPTY_TEXT_KEY};
use crate::item::{HistoryItem, SearchItem};
use crate::validate::{EnsNameValidator, NameValidator, Validation};

pub const MAX_DROPDOWN_ITEMS: usize = 6;
pub const INVALID_NAME_TEXT: &str = "Invalid name";

static BOX_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?$").expect("box regex"));

/// `.box` names: one alphanumeric label of at most 63 characters, hyphens
/// allowed inside but not at either end.
pub fn is_box_valid(name: &str) -> bool {
    match name.strip_suffix(".box") {
        Some(label) => label.chars().count() <= 63 && BOX_LABEL_RE.is_match(label),
        None => false,
    }
}

struct Facts<'a> {
    input: &'a str,
    is_address: bool,
    validation: Validation,
    /// What history entries must contain to be offered.
    history_subject: &'a str,
    history: &'a [HistoryItem],
    translator: &'a dyn Translator,
}

type Stage = fn(&Facts<'_>, Vec<SearchItem>) -> Vec<SearchItem>;

const STAGES: [(&str, Stage); 8] = [
    ("eth", eth_stage),
    ("box", box_stage),
    ("dns", dns_stage),
    ("address", address_stage),
    ("tld", tld_stage),
    ("history", history_stage),
    ("error", error_stage),
    ("empty", empty_stage),
];

pub struct DropdownBuilder<V = EnsNameValidator, T = Catalog> {
    validator: V,
    translator: T,
}

impl Default for DropdownBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DropdownBuilder {
    pub fn new() -> Self {
        Self {
            validator: EnsNameValidator,
            translator: Catalog::new(),
        }
    }
}

impl<V: NameValidator, T: Translator> DropdownBuilder<V, T> {
    pub fn with_collaborators(validator: V, translator: T) -> Self {
        Self {
            validator,
            translator,
        }
    }

    pub fn with_validator<V2: NameValidator>(self, validator: V2) -> DropdownBuilder<V2, T> {
        DropdownBuilder {
            validator,
            translator: self.translator,
        }
    }

    pub fn with_translator<T2: Translator>(self, translator: T2) -> DropdownBuilder<V, T2> {
        DropdownBuilder {
            validator: self.validator,
            translator,
        }
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Suggestions for `input`. Pure: the same input and history always give
    /// the same list.
    pub fn build(&self, input: &str, history: &[HistoryItem]) -> Vec<SearchItem> {
        let input_is_address = is_address(input);
        let validation = if input_is_address {
            Validation {
                is_valid: true,
                is_eth: false,
                name: String::new(),
            }
        } else if input.is_empty() {
            Validation::default()
        } else {
            self.validator.validate(input)
        };
        let facts = Facts {
            input,
            is_address: input_is_address,
            history_subject: if input_is_address {
                input
            } else {
                validation.name.as_str()
            },
            validation: validation.clone(),
            history,
            translator: &self.translator,
        };

        let items = STAGES.iter().fold(Vec::new(), |items, (stage, run)| {
            let out = run(&facts, items);
            tracing::trace!(stage, len = out.len(), "dropdown stage");
            out
        });
        tracing::debug!(input, items = items.len(), "built dropdown");
        items
    }
}

fn name<'a>(f: &'a Facts<'_>) -> &'a str {
    f.validation.name.as_str()
}

fn eth_stage(f: &Facts<'_>, mut items: Vec<SearchItem>) -> Vec<SearchItem> {
    let name = name(f);
    let text = if name.is_empty() {
        return items;
    } else if f.validation.is_eth {
        name.to_string()
    } else if name.contains('.') {
        return items;
    } else {
        format!("{name}.eth")
    };
    items.insert(0, SearchItem::Eth { text });
    items
}

fn box_stage(f: &Facts<'_>, mut items: Vec<SearchItem>) -> Vec<SearchItem> {
    let name = name(f);
    let text = if name.is_empty() {
        return items;
    } else if name.ends_with(".box") {
        name.to_string()
    } else if name.contains('.') {
        return items;
    } else {
        format!("{name}.box")
    };
    let is_valid = f.validation.is_valid && is_box_valid(&text);
    items.push(SearchItem::Box { text, is_valid });
    items
}

fn dns_stage(f: &Facts<'_>, mut items: Vec<SearchItem>) -> Vec<SearchItem> {
    let name = name(f);
    if name.is_empty() || !name.contains('.') || name.ends_with(".box") || f.validation.is_eth {
        return items;
    }
    items.push(SearchItem::Dns {
        text: name.to_string(),
    });
    items
}

fn address_stage(f: &Facts<'_>, mut items: Vec<SearchItem>) -> Vec<SearchItem> {
    if f.is_address {
        items.insert(
            0,
            SearchItem::Address {
                text: f.input.to_string(),
            },
        );
    }
    items
}

fn tld_stage(f: &Facts<'_>, mut items: Vec<SearchItem>) -> Vec<SearchItem> {
    let name = name(f);
    if !name.is_empty() && !name.contains('.') {
        items.push(SearchItem::Tld {
            text: name.to_string(),
        });
    }
    items
}

fn history_stage(f: &Facts<'_>, mut items: Vec<SearchItem>) -> Vec<SearchItem> {
    let remaining = MAX_DROPDOWN_ITEMS.saturating_sub(items.len());
    if remaining == 0 {
        return items;
    }
    let mut matches: Vec<&HistoryItem> = f
        .history
        .iter()
        .filter(|h| h.text.contains(f.history_subject))
        .filter(|h| {
            !items
                .iter()
                .any(|it| it.text() == h.text && it.name_type() == Some(h.name_type))
        })
        .collect();
    matches.sort_by_key(|h| Reverse(h.last_accessed));
    items.extend(matches.into_iter().take(remaining).map(SearchItem::from));
    items
}

/// An invalid name leaves nothing else worth offering.
fn error_stage(f: &Facts<'_>, items: Vec<SearchItem>) -> Vec<SearchItem> {
    if f.input.is_empty() || f.validation.is_valid {
        return items;
    }
    vec![SearchItem::Error {
        text: INVALID_NAME_TEXT.to_string(),
    }]
}

fn empty_stage(f: &Facts<'_>, items: Vec<SearchItem>) -> Vec<SearchItem> {
    if !items.is_empty() {
        return items;
    }
    vec![SearchItem::Text {
        text: f.translator.translate(EMPTY_TEXT_KEY),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::NameType;

    fn build(input: &str, history: &[HistoryItem]) -> Vec<SearchItem> {
        DropdownBuilder::new().build(input, history)
    }

    fn eth(text: &str) -> SearchItem {
        SearchItem::Eth { text: text.into() }
    }

    #[test]
    fn bare_label_offers_eth_box_and_tld() {
        let items = build("jefflau", &[]);
        assert_eq!(
            items,
            vec![
                eth("jefflau.eth"),
                SearchItem::Box {
                    text: "jefflau.box".into(),
                    is_valid: true
                },
                SearchItem::Tld {
                    text: "jefflau".into()
                },
            ]
        );
    }

    #[test]
    fn eth_name_is_used_as_is() {
        let items = build("nick.eth", &[]);
        assert_eq!(items, vec![eth("nick.eth")]);
    }

    #[test]
    fn address_comes_first() {
        let addr = "0x866B3c4994e1416B7C738B9818b31dC246b95eEE";
        let items = build(addr, &[]);
        assert_eq!(items, vec![SearchItem::Address { text: addr.into() }]);
    }

    #[test]
    fn dotted_name_is_dns_only() {
        let items = build("sub.domain.com", &[]);
        assert_eq!(
            items,
            vec![SearchItem::Dns {
                text: "sub.domain.com".into()
            }]
        );
    }

    #[test]
    fn box_suffix_skips_dns_and_eth() {
        let items = build("my-shop.box", &[]);
        assert_eq!(
            items,
            vec![SearchItem::Box {
                text: "my-shop.box".into(),
                is_valid: true
            }]
        );
    }

    #[test]
    fn box_validity_rules() {
        assert!(is_box_valid("abc.box"));
        assert!(is_box_valid("a.box"));
        assert!(!is_box_valid("-abc.box"));
        assert!(!is_box_valid("abc-.box"));
        assert!(!is_box_valid("abc.eth"));
        assert!(!is_box_valid("a_b.box"));
        assert!(is_box_valid(&format!("{}.box", "a".repeat(63))));
        assert!(!is_box_valid(&format!("{}.box", "a".repeat(64))));
        // non-ascii labels are fine for .eth but not for .box
        let items = build("café", &[]);
        assert!(items.contains(&SearchItem::Box {
            text: "café.box".into(),
            is_valid: false
        }));
    }

    #[test]
    fn empty_input_shows_placeholder() {
        let items = build("", &[]);
        assert_eq!(
            items,
            vec![SearchItem::Text {
                text: "Type a name or address to search".into()
            }]
        );
    }

    #[test]
    fn placeholder_uses_translator() {
        let b = DropdownBuilder::new().with_translator(Catalog::with_overrides([(
            EMPTY_TEXT_KEY,
            "Nom ou adresse",
        )]));
        assert_eq!(b.build("", &[])[0].text(), "Nom ou adresse");
    }

    #[test]
    fn history_sorted_by_recency() {
        let history = vec![
            HistoryItem::new("a.eth", NameType::Eth, 100),
            HistoryItem::new("b.eth", NameType::Eth, 200),
        ];
        let items = build("", &history);
        let texts: Vec<_> = items.iter().map(|i| i.text()).collect();
        assert_eq!(texts, ["b.eth", "a.eth"]);
        assert!(items.iter().all(SearchItem::is_history));
    }

    #[test]
    fn history_skips_rows_already_listed() {
        let history = vec![
            HistoryItem::new("nick.eth", NameType::Eth, 5),
            HistoryItem::new("nick.box", NameType::Box, 4),
            HistoryItem::new("nick.eth", NameType::Dns, 3),
            HistoryItem::new("other.eth", NameType::Eth, 9),
        ];
        let items = build("nick", &history);
        let kinds: Vec<_> = items.iter().map(|i| (i.kind_label(), i.text())).collect();
        assert_eq!(
            kinds,
            [
                ("eth", "nick.eth"),
                ("box", "nick.box"),
                ("tld", "nick"),
                ("history", "nick.eth"),
            ]
        );
    }

    #[test]
    fn history_fills_only_remaining_capacity() {
        let history: Vec<_> = (0..10)
            .map(|i| HistoryItem::new(format!("name{i}.eth"), NameType::Eth, i))
            .collect();
        let items = build("name", &history);
        assert_eq!(items.len(), MAX_DROPDOWN_ITEMS);
        assert_eq!(items[3].text(), "name9.eth");
        assert_eq!(items[5].text(), "name7.eth");
    }

    #[test]
    fn address_history_matches_raw_input() {
        let addr = "0x866B3c4994e1416B7C738B9818b31dC246b95eEE";
        let history = vec![
            HistoryItem::new(addr, NameType::Address, 1),
            HistoryItem::new("other.eth", NameType::Eth, 2),
        ];
        let items = build(addr, &history);
        assert_eq!(items.len(), 1, "{items:?}");
    }

    #[test]
    fn invalid_input_yields_only_error() {
        let history = vec![HistoryItem::new("bad name.eth", NameType::Eth, 1)];
        let items = build("bad name", &history);
        assert_eq!(
            items,
            vec![SearchItem::Error {
                text: INVALID_NAME_TEXT.into()
            }]
        );
    }

    #[test]
    fn build_is_repeatable() {
        let history = vec![HistoryItem::new("x.eth", NameType::Eth, 1)];
        let b = DropdownBuilder::new();
        assert_eq!(b.build("x", &history), b.build("x", &history));
    }

    #[test]
    fn custom_validator_is_consulted() {
        let b = DropdownBuilder::new().with_validator(|input: &str| Validation {
            is_valid: true,
            is_eth: true,
            name: format!("{input}.eth"),
        });
        assert_eq!(b.build("vitalik", &[])[0], eth("vitalik.eth"));
    }
}
