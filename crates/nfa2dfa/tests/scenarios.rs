use std::fs;

use nfa2dfa::{
    ClassifierConfig, ConstructionConfig, EpsilonInWord, EpsilonNFA, LoadError, SubsetConstructor,
    Verdict, WordClassifier, WorklistOrder, classify_words, convert_to_dfa, load_automaton,
    parse_automaton,
};
use pretty_assertions::assert_eq;

const SAMPLE: &str = "\
a b
q0 q1
q1
q0
q0 a q1
q0 a q0
q1 b q1
";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn sample_words() {
    init_logging();
    let nfa = parse_automaton(SAMPLE).unwrap();
    let dfa = convert_to_dfa(&nfa);

    let verdicts = classify_words(&dfa, nfa.alphabet(), ["aab", "ab", "ba", "ac"]);
    let verdicts: Vec<(&str, Verdict)> = verdicts
        .iter()
        .map(|(word, verdict)| (word.as_str(), *verdict))
        .collect();

    assert_eq!(
        verdicts,
        vec![
            ("aab", Verdict::Accept),
            ("ab", Verdict::Accept),
            ("ba", Verdict::Reject),
            ("ac", Verdict::Invalid),
        ]
    );
}

#[test]
fn epsilon_to_final_accepts_empty_word() {
    init_logging();
    let source = format!("{SAMPLE}q0 & q1\n");
    let nfa = parse_automaton(&source).unwrap();
    let dfa = convert_to_dfa(&nfa);

    assert_eq!(WordClassifier::new(&dfa).classify(""), Verdict::Accept);
    assert_eq!(WordClassifier::new(&dfa).classify("b"), Verdict::Accept);
}

#[test]
fn without_epsilon_empty_word_is_rejected() {
    let nfa = parse_automaton(SAMPLE).unwrap();
    let dfa = convert_to_dfa(&nfa);
    assert_eq!(WordClassifier::new(&dfa).classify(""), Verdict::Reject);
}

#[test]
fn worklist_orders_agree() {
    // Words over {a, b, c} whose third-to-last symbol is 'a', with an
    // epsilon shortcut that also accepts words ending in "cc".
    let nfa = EpsilonNFA::builder()
        .symbols(['a', 'b', 'c'])
        .states(["s", "p1", "p2", "p3", "e", "c1", "c2"])
        .start_state("s")
        .final_state("p3")
        .final_state("c2")
        .transition("s", 'a', "s")
        .transition("s", 'b', "s")
        .transition("s", 'c', "s")
        .transition("s", 'a', "p1")
        .transition("p1", 'a', "p2")
        .transition("p1", 'b', "p2")
        .transition("p1", 'c', "p2")
        .transition("p2", 'a', "p3")
        .transition("p2", 'b', "p3")
        .transition("p2", 'c', "p3")
        .epsilon_transition("s", "e")
        .transition("e", 'c', "c1")
        .transition("c1", 'c', "c2")
        .epsilon_transition("c2", "s")
        .build()
        .unwrap();

    let stack = SubsetConstructor::new(ConstructionConfig::default())
        .build(&nfa)
        .unwrap();
    let queue =
        SubsetConstructor::new(ConstructionConfig::default().worklist_order(WorklistOrder::Queue))
            .build(&nfa)
            .unwrap();

    assert_eq!(stack.num_states(), queue.num_states());
    assert!(stack.num_states() as u64 <= 1 << nfa.num_states());

    let words = [
        "", "a", "abb", "bab", "cc", "acc", "ccb", "ccab", "aaa", "bbbb", "cabc", "ccaab",
    ];
    for word in words {
        assert_eq!(stack.accepts(word), nfa.accepts(word), "{word:?}");
        assert_eq!(queue.accepts(word), nfa.accepts(word), "{word:?}");
    }
}

#[test]
fn epsilon_marker_inside_words() {
    let nfa = parse_automaton(SAMPLE).unwrap();
    let dfa = convert_to_dfa(&nfa);

    let words = ["a&b", "&"];
    let default = WordClassifier::new(&dfa).classify_words(words);
    assert_eq!(default["a&b"], Verdict::Reject);
    assert_eq!(default["&"], Verdict::Reject);

    let skip = WordClassifier::new(&dfa)
        .config(ClassifierConfig::default().epsilon_in_word(EpsilonInWord::Skip))
        .classify_words(words);
    assert_eq!(skip["a&b"], Verdict::Accept);
    assert_eq!(skip["&"], Verdict::Reject);

    let invalid = WordClassifier::new(&dfa)
        .config(ClassifierConfig::default().epsilon_in_word(EpsilonInWord::Invalid))
        .classify_words(words);
    assert_eq!(invalid["a&b"], Verdict::Invalid);
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("nfa2dfa-sample-{}.txt", std::process::id()));
    fs::write(&path, SAMPLE).unwrap();

    let loaded = load_automaton(&path);
    fs::remove_file(&path).unwrap();

    let dfa = convert_to_dfa(&loaded.unwrap());
    assert!(dfa.accepts("aab"));
}

#[test]
fn load_missing_file() {
    let err = load_automaton("this/file/does/not/exist.txt").unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
    assert_eq!(err.to_string(), "file not found: this/file/does/not/exist.txt");
}

#[test]
fn describe_serializes_to_json() {
    let source = "a\nq0 q1\nq1\nq0\nq0 a q1\n";
    let dfa = convert_to_dfa(&parse_automaton(source).unwrap());

    let json = serde_json::to_value(dfa.describe()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "states": ["S0", "S1"],
            "alphabet": ["a"],
            "transitions": [
                { "origin": "S0", "symbol": "a", "destination": "S1" }
            ],
            "initial": "S0",
            "finals": ["S1"],
        })
    );

    let verdicts = WordClassifier::new(&dfa).classify_words(["a", "aa", "b"]);
    assert_eq!(
        serde_json::to_string(&verdicts).unwrap(),
        r#"{"a":"ACCEPT","aa":"REJECT","b":"INVALID"}"#
    );
}
