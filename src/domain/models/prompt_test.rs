use super::PromptBuilder;
use super::PromptRole;
use crate::domain::models::Persona;

#[test]
fn it_builds_two_ordered_parts() {
    let persona = Persona::find("Assistant").unwrap();
    let request = PromptBuilder::build(&persona, "Explain quantum computing");
    let parts = request.parts();

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].role, PromptRole::System);
    assert_eq!(parts[0].content, persona.system_prompt);
    assert_eq!(parts[1].role, PromptRole::User);
    assert_eq!(parts[1].content, "Explain quantum computing");
}

#[test]
fn it_keeps_user_text_verbatim() {
    let persona = Persona::find("Code Helper").unwrap();
    let request = PromptBuilder::build(&persona, "  why does this\tpanic?  ");

    assert_eq!(request.user(), "  why does this\tpanic?  ");
    assert_eq!(request.system(), persona.system_prompt);
}

#[test]
fn it_serializes_parts_for_chat_apis() {
    let persona = Persona::find("Teacher").unwrap();
    let request = PromptBuilder::build(&persona, "What is gravity?");

    insta::assert_json_snapshot!(request.parts(), @r###"
    [
      {
        "role": "system",
        "content": "You are an educational assistant. Explain concepts clearly with examples."
      },
      {
        "role": "user",
        "content": "What is gravity?"
      }
    ]
    "###);
}

#[test]
fn it_resolves_quick_prompts() {
    assert_eq!(
        PromptBuilder::quick_prompt(1),
        Some("Explain quantum computing")
    );
    assert_eq!(
        PromptBuilder::quick_prompt(4),
        Some("Summarize latest AI news")
    );
    assert_eq!(PromptBuilder::quick_prompt(0), None);
    assert_eq!(PromptBuilder::quick_prompt(5), None);
}
