use super::{IndexKey, IndexTuple};

#[test]
fn test_positive_and_negative_positions() {
    let index: IndexTuple = ["sw", "north", "3"].into_iter().collect();
    assert_eq!(index.get(0), Some("sw"));
    assert_eq!(index.get(2), Some("3"));
    assert_eq!(index.get(-1), Some("3"));
    assert_eq!(index.get(-3), Some("sw"));
    assert_eq!(index.get(3), None);
    assert_eq!(index.get(-4), None);
}

#[test]
fn test_last_token_follows_tuple_length() {
    let short: IndexTuple = ["north", "1"].into_iter().collect();
    let long: IndexTuple = ["sw", "north", "7"].into_iter().collect();
    assert_eq!(short.get(-1), Some("1"));
    assert_eq!(long.get(-1), Some("7"));
    assert_eq!(IndexTuple::default().get(-1), None);
}

#[test]
fn test_key_ordering() {
    let mut keys = ["10", "b", "2", "a", "07", "-1"]
        .into_iter()
        .map(IndexKey::from)
        .collect::<Vec<_>>();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            IndexKey::Int(-1),
            IndexKey::Int(2),
            IndexKey::Int(10),
            IndexKey::Text("07".into()),
            IndexKey::Text("a".into()),
            IndexKey::Text("b".into()),
        ]
    );
    assert_eq!(IndexKey::from("07").to_string(), "07");
}
