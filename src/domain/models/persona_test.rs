use super::Persona;

#[test]
fn it_finds_by_name() {
    let persona = Persona::find("Teacher").unwrap();
    assert_eq!(
        persona.system_prompt,
        "You are an educational assistant. Explain concepts clearly with examples."
    );
}

#[test]
fn it_does_not_find_unknown_names() {
    assert!(Persona::find("Pirate").is_none());
    assert!(Persona::find("teacher").is_none());
}

#[test]
fn it_resolves_by_index() {
    assert_eq!(Persona::resolve("2").unwrap().name, "Creative Writer");
    assert_eq!(Persona::resolve(" Code Helper ").unwrap().name, "Code Helper");
    assert!(Persona::resolve("0").is_none());
    assert!(Persona::resolve("5").is_none());
}

#[test]
fn it_defaults_to_assistant() {
    assert_eq!(Persona::default().name, "Assistant");
}

#[test]
fn it_lists_names_in_order() {
    assert_eq!(
        Persona::names(),
        vec!["Assistant", "Creative Writer", "Code Helper", "Teacher"]
    );
}
