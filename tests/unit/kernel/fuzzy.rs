use super::*;

const LABELS: &[&str] = &[
    "Readme.md",
    "main.rs",
    "src/kernel/fuzzy.rs",
    "navigator_search.rs",
    "SearchBoxDebounce",
    "Cargo.toml",
    "",
    "ünïcödé.txt",
];

fn is_subsequence(query: &str, label: &str) -> bool {
    let mut label_chars = label.chars().map(|c| c.to_lowercase().next().unwrap_or(c));
    query
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .all(|q| label_chars.any(|c| c == q))
}

#[test]
fn empty_query_matches_everything_with_zero_score() {
    let fuzzy = FuzzySearch::new();
    for label in LABELS {
        let result = fuzzy.match_label("", label);
        assert!(result.matched, "{label}");
        assert_eq!(result.score, 0);
        assert!(result.indices.is_empty());
        assert!(result.ranges().is_empty());
    }
}

#[test]
fn subsequence_queries_produce_valid_increasing_indices() {
    let fuzzy = FuzzySearch::new();
    let queries = ["r", "rm", "RM", "md", "src", "sbd", "ztoml", "cgo", "nvs", "ÜC", "kfz"];

    for label in LABELS {
        let len = label.chars().count();
        for query in queries {
            let result = fuzzy.match_label(query, label);
            assert_eq!(result.matched, is_subsequence(query, label), "{query} in {label}");
            if !result.matched {
                assert_eq!(result.score, 0);
                assert!(result.indices.is_empty());
                continue;
            }
            assert_eq!(result.indices.len(), query.chars().count());
            assert!(result.indices.windows(2).all(|w| w[0] < w[1]));
            assert!(result.indices.iter().all(|&i| i < len));
        }
    }
}

#[test]
fn greedy_takes_earliest_positions() {
    let fuzzy = FuzzySearch::new();
    let result = fuzzy.match_label("ab", "xaabb");
    assert_eq!(result.indices, vec![1, 3]);

    let result = fuzzy.match_label("rm", "Readme.md");
    assert!(result.matched);
    assert_eq!(result.indices, vec![0, 4]);
}

#[test]
fn matching_is_case_insensitive() {
    let fuzzy = FuzzySearch::new();
    assert!(fuzzy.match_label("README", "readme.md").matched);
    assert!(fuzzy.match_label("readme", "README.MD").matched);
    assert_eq!(
        fuzzy.match_label("ReAd", "readme"),
        fuzzy.match_label("read", "README")
    );
}

#[test]
fn non_subsequence_does_not_match() {
    let fuzzy = FuzzySearch::new();
    assert!(!fuzzy.match_label("ba", "ab").matched);
    assert!(!fuzzy.match_label("rm", "main.rs").matched);
    assert!(!fuzzy.match_label("x", "").matched);
}

#[test]
fn query_longer_than_label_never_matches() {
    let fuzzy = FuzzySearch::new();
    let result = fuzzy.match_label("abcd", "abc");
    assert_eq!(result, MatchResult::no_match());
}

#[test]
fn contiguous_match_scores_at_least_gapped_match() {
    let fuzzy = FuzzySearch::new();
    let contiguous = fuzzy.match_label("ab", "abx");
    let gapped = fuzzy.match_label("ab", "axb");
    assert!(contiguous.matched && gapped.matched);
    assert!(contiguous.score >= gapped.score);

    let tight = fuzzy.match_label("main", "main_rs_x");
    let loose = fuzzy.match_label("main", "mxaxixn_x");
    assert!(tight.score > loose.score);
}

#[test]
fn boundary_match_scores_above_mid_token_match() {
    let fuzzy = FuzzySearch::new();
    let boundary = fuzzy.match_label("b", "a_b");
    let mid = fuzzy.match_label("b", "aab");
    assert!(boundary.score > mid.score);

    let camel = fuzzy.match_label("d", "aaDx");
    let lower = fuzzy.match_label("d", "aadx");
    assert!(camel.score > lower.score);

    let dotted = fuzzy.match_label("m", "abc.m");
    let plain = fuzzy.match_label("m", "abcdm");
    assert!(dotted.score > plain.score);
}

#[test]
fn earlier_match_scores_above_later_match() {
    let fuzzy = FuzzySearch::new();
    let early = fuzzy.match_label("c", "cxxxx");
    let late = fuzzy.match_label("c", "xxxxc");
    assert!(early.score > late.score);
}

#[test]
fn matching_is_deterministic() {
    let fuzzy = FuzzySearch::new();
    for label in LABELS {
        assert_eq!(
            fuzzy.match_label("rs", label),
            FuzzySearch::default().match_label("rs", label)
        );
    }
}

#[test]
fn ranges_merge_contiguous_indices() {
    let fuzzy = FuzzySearch::new();
    let result = fuzzy.match_label("reme", "Readme.md");
    assert_eq!(result.indices, vec![0, 1, 4, 5]);
    assert_eq!(result.ranges(), vec![0..2, 4..6]);
}

#[test]
fn indices_are_char_positions() {
    let fuzzy = FuzzySearch::new();
    let result = fuzzy.match_label("ct", "ünïcödé.txt");
    assert_eq!(result.indices, vec![3, 8]);
}

#[test]
fn filter_sorts_by_score_and_keeps_ties_in_order() {
    let fuzzy = FuzzySearch::new();
    let items = vec!["axb", "abx", "zzz", "abx"];
    let matches = fuzzy.filter("ab", &items, |s| *s);

    let labels: Vec<&str> = matches.iter().map(|m| *m.item).collect();
    assert_eq!(labels, vec!["abx", "abx", "axb"]);
    assert!(std::ptr::eq(matches[0].item, &items[1]));
    assert!(std::ptr::eq(matches[1].item, &items[3]));
}

#[test]
fn filter_with_empty_query_returns_all_items() {
    let fuzzy = FuzzySearch::new();
    let items = vec!["b".to_string(), "a".to_string()];
    let matches = fuzzy.filter("", &items, |s| s.as_str());
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].item, "b");
    assert!(matches.iter().all(|m| m.result.score == 0));
}
