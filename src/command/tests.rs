//! Unit tests for command matching.

use super::*;
use crate::domain::RawIntent;

fn nav(label: &str, room: Option<&str>) -> RawIntent {
    RawIntent::NavigateToLabel {
        label: label.to_string(),
        room_name: room.map(String::from),
    }
}

#[test]
fn test_room_rule_wins_over_bare_rule() {
    let matcher = CommandMatcher::new();

    let m = matcher.match_transcript("go to the lamp in the kitchen").unwrap();
    assert_eq!(m.rule, "navigate_in_room");
    assert_eq!(m.intent, nav("lamp", Some("kitchen")));
}

#[test]
fn test_bare_navigation() {
    let matcher = CommandMatcher::new();

    let m = matcher.match_transcript("navigate to the lamp").unwrap();
    assert_eq!(m.rule, "navigate");
    assert_eq!(m.intent, nav("lamp", None));

    let m = matcher.match_transcript("Head towards a coffee table").unwrap();
    assert_eq!(m.intent, nav("coffee table", None));
}

#[test]
fn test_multi_word_label_and_room() {
    let matcher = CommandMatcher::new();

    let m = matcher
        .match_transcript("drive to the coffee table inside the living room")
        .unwrap();
    assert_eq!(m.intent, nav("coffee table", Some("living room")));
}

#[test]
fn test_second_room_preposition_is_rejected() {
    let matcher = CommandMatcher::new();

    // Neither navigation rule may guess a segmentation here
    assert!(
        matcher
            .match_transcript("go to the lamp in the box in the kitchen")
            .is_none()
    );
}

#[test]
fn test_normalization() {
    let matcher = CommandMatcher::new();

    let m = matcher
        .match_transcript("   Navigate   to The CHAIR in the Kitchen.  ")
        .unwrap();
    assert_eq!(m.intent, nav("chair", Some("kitchen")));
    assert_eq!(m.transcript, "navigate to the chair in the kitchen");

    assert_eq!(normalize_transcript("  Stop Patrol!  "), "stop patrol");
}

#[test]
fn test_movement_primitives() {
    let matcher = CommandMatcher::new();

    assert_eq!(matcher.interpret("advance"), RawIntent::Advance);
    assert_eq!(matcher.interpret("please move forward"), RawIntent::Advance);
    assert_eq!(matcher.interpret("turn around"), RawIntent::TurnAround);
    assert_eq!(matcher.interpret("spin 360"), RawIntent::TurnAround);
    assert_eq!(matcher.interpret("move back"), RawIntent::MoveBack);
    assert_eq!(matcher.interpret("back up a bit"), RawIntent::MoveBack);
}

#[test]
fn test_patrol_commands() {
    let matcher = CommandMatcher::new();

    assert_eq!(matcher.interpret("start patrol"), RawIntent::PatrolStart);
    assert_eq!(matcher.interpret("begin the patrol"), RawIntent::PatrolStart);
    for phrase in ["stop patrol", "end patrol", "finish patrol", "terminate patrolling"] {
        assert_eq!(matcher.interpret(phrase), RawIntent::PatrolStop, "{}", phrase);
    }
}

#[test]
fn test_unrecognized_keeps_transcript() {
    let matcher = CommandMatcher::new();

    assert!(matcher.match_transcript("make me a sandwich").is_none());
    assert!(matcher.match_transcript("   ").is_none());
    assert_eq!(
        matcher.interpret("Make me a sandwich"),
        RawIntent::Unrecognized {
            transcript: "make me a sandwich".to_string()
        }
    );
}

#[test]
fn test_rule_order_is_fixed() {
    let names: Vec<_> = CommandMatcher::new().rules().iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec![
            "navigate_in_room",
            "navigate",
            "advance",
            "turn_around",
            "move_back",
            "patrol_start",
            "patrol_stop"
        ]
    );
}

#[test]
fn test_rule_examples_match_their_own_rule() {
    let matcher = CommandMatcher::new();
    for rule in matcher.rules() {
        let m = matcher.match_transcript(rule.example).unwrap();
        assert_eq!(m.rule, rule.name);
    }
}

#[test]
fn test_custom_grammar() {
    let grammar = Grammar {
        navigate_verbs: vec!["walk".to_string()],
        articles: vec!["the".to_string()],
        room_prepositions: vec!["at".to_string()],
    };
    let matcher = CommandMatcher::with_grammar(grammar).unwrap();

    assert_eq!(
        matcher.interpret("walk to the sofa at the lounge"),
        nav("sofa", Some("lounge"))
    );
    assert!(matcher.match_transcript("go to the sofa").is_none());
}

#[test]
fn test_invalid_grammar() {
    let empty = Grammar {
        navigate_verbs: vec![],
        ..Grammar::default()
    };
    assert!(matches!(
        CommandMatcher::with_grammar(empty),
        Err(GrammarError::EmptyList("navigate_verbs"))
    ));

    let multi = Grammar {
        room_prepositions: vec!["inside of".to_string()],
        ..Grammar::default()
    };
    assert!(matches!(
        CommandMatcher::with_grammar(multi),
        Err(GrammarError::MultiWordPreposition(_))
    ));
}

#[test]
fn test_strip_article() {
    let grammar = Grammar::default();
    assert_eq!(grammar.strip_article("the chair"), "chair");
    assert_eq!(grammar.strip_article("  an apple "), "apple");
    assert_eq!(grammar.strip_article("theater"), "theater");
    // Only one determiner is removed
    assert_eq!(grammar.strip_article("the the chair"), "the chair");
}
