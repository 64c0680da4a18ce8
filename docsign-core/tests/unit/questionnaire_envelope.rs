use docsign_core::domain::questionnaire::{parse_generated_questions, QuestionKind};
use docsign_core::foundation::SignatureError;

#[test]
fn every_envelope_shape_yields_the_same_questions() {
    let question = r#"{"text":"Did the training meet your expectations?","type":"yes_no"}"#;
    let shapes = [
        format!("[{question}]"),
        format!(r#"{{"questions":[{question}]}}"#),
        format!(r#"{{"items":[{question}]}}"#),
        format!(r#"{{"data":[{question}]}}"#),
        format!("```json\n[{question}]\n```"),
        format!("```\n{{\"questions\":[{question}]}}\n```"),
    ];
    for raw in shapes {
        let questions = parse_generated_questions(&raw).expect("recognized shape");
        assert_eq!(questions.len(), 1, "{raw}");
        assert_eq!(questions[0].text, "Did the training meet your expectations?");
        assert_eq!(questions[0].kind, QuestionKind::YesNo);
    }
}

#[test]
fn aliases_and_defaults_apply() {
    let raw = r#"[
        {"question":"Which module helped most?","kind":"checkbox","options":["Ownership","Traits"]},
        {"label":"Any comments?"},
        {"text":"Capital of France?","type":"single","options":["Paris","Lyon"],"answer":"Paris"}
    ]"#;
    let questions = parse_generated_questions(raw).expect("parse");
    assert_eq!(questions[0].kind, QuestionKind::MultipleChoice);
    assert_eq!(questions[0].options.len(), 2);
    assert_eq!(questions[1].kind, QuestionKind::FreeText);
    assert!(questions[1].options.is_empty());
    assert_eq!(questions[2].correct_answer.as_deref(), Some("Paris"));
}

#[test]
fn blank_questions_are_dropped() {
    let questions = parse_generated_questions(r#"[{"text":"  "},{"text":"Rate the room","type":"rating"}]"#).expect("parse");
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].kind, QuestionKind::Rating);
}

#[test]
fn unknown_shapes_are_errors() {
    for raw in [r#"{"answer":"[]"}"#, r#""just a string""#, "[1, 2, 3]", r#"[{"text":"  "}]"#] {
        let err = parse_generated_questions(raw).expect_err("unrecognized");
        assert!(matches!(err, SignatureError::UnrecognizedResponseShape { .. }), "{raw}");
    }
}
