use super::*;
use yare::parameterized;

#[parameterized(
    work = { "work", FocusTarget::Work },
    sleep = { "sleep", FocusTarget::Sleep },
    drive = { "drive", FocusTarget::Drive },
    dnd_camel = { "doNotDisturb", FocusTarget::DoNotDisturb },
    dnd_kebab = { "do-not-disturb", FocusTarget::DoNotDisturb },
    dnd_snake = { "do_not_disturb", FocusTarget::DoNotDisturb },
    none = { "none", FocusTarget::None },
)]
fn parses_known_targets(input: &str, expected: FocusTarget) {
    assert_eq!(input.parse::<FocusTarget>().unwrap(), expected);
}

#[parameterized(
    vacation = { "vacation" },
    empty = { "" },
    cased = { "Work" },
)]
fn rejects_unknown_targets(input: &str) {
    let err = input.parse::<FocusTarget>().unwrap_err();
    assert_eq!(err.to_string(), format!("Invalid status: {}", input));
}

#[test]
fn document_ids_are_distinct() {
    let mut ids: Vec<_> = FocusTarget::ALL.iter().map(|t| t.document_id()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), FocusTarget::ALL.len());
}

#[test]
fn display_matches_serde_representation() {
    for target in FocusTarget::ALL {
        let json = serde_json::to_string(&target).unwrap();
        assert_eq!(json, format!("\"{}\"", target));
    }
}

#[test]
fn serde_roundtrip_preserves_target() {
    let json = serde_json::to_string(&FocusTarget::DoNotDisturb).unwrap();
    assert_eq!(json, "\"doNotDisturb\"");
    let back: FocusTarget = serde_json::from_str(&json).unwrap();
    assert_eq!(back, FocusTarget::DoNotDisturb);
}
